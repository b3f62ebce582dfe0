//! Quantification module - per-sample read counts and the counts matrix

pub mod counts;
pub mod matrix;
pub mod template;
