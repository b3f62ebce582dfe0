//! Pipeline module - end-to-end counting runs

pub mod count_matrix;
