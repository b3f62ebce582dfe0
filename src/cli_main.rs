use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "smr",
    version,
    about = "SMR: SAM mapped reads",
    long_about = "The input to SMR is 1 or more SAM files. The output is a table (1 column for\n\
                  each input file) showing the number of reads that map to each sequence.\n\n\
                  By default every sequence observed in the input is reported. Giving --idrange\n\
                  or --idfmt reports a fixed range of molecule IDs instead."
)]
pub struct Cli {
    /// Input SAM files, one per sample (gzipped files must end in .gz)
    #[arg(value_name = "SAM")]
    pub inputs: Vec<PathBuf>,

    /// Delimiter for output data ('\t' for tab); default is comma, or tab in fixed-range mode
    #[arg(short, long, value_name = "CHAR")]
    pub delim: Option<String>,

    /// Format of the molecule IDs in printf style; default is 'gene%05d'
    #[arg(short, long, value_name = "STRING")]
    pub idfmt: Option<String>,

    /// Range of IDs to print, e.g. '1-10000' for 10,000 molecules; default is '1-10'
    #[arg(short = 'r', long, value_name = "INT-INT")]
    pub idrange: Option<String>,

    /// Do not print molecule IDs, only the read counts
    #[arg(short, long)]
    pub noids: bool,

    /// File to which read counts will be written; default is stdout
    #[arg(short, long, value_name = "FILE")]
    pub outfile: Option<PathBuf>,

    /// Optional path to write per-sample load statistics as JSON
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
