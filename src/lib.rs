//! SMR: SAM mapped reads
//!
//! Tabulates mapped read counts per molecule (reference sequence) across one
//! or more SAM files, one column per sample.

pub mod cli_main;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod quant;

pub use config::SmrConfig;
pub use error::{Result, SmrError};
pub use quant::counts::SampleCounts;
pub use quant::matrix::{assemble, write_counts_matrix, IdPolicy, MatrixFormat, MatrixRow};
