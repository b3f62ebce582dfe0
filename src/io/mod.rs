//! IO module - SAM input, output streams and the load summary

pub mod sam;
pub mod stream;
pub mod summary;
