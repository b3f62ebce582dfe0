use std::path::PathBuf;

use tracing::warn;

use crate::cli_main::Cli;
use crate::error::{Result, SmrError};
use crate::quant::matrix::{IdPolicy, MatrixFormat};
use crate::quant::template::{IdTemplate, DEFAULT_ID_FORMAT};

pub const DEFAULT_ID_RANGE: (u64, u64) = (1, 10);

/// Validated settings for one run, built once from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmrConfig {
    pub inputs: Vec<PathBuf>,
    /// `None` writes to stdout
    pub outfile: Option<PathBuf>,
    pub format: MatrixFormat,
    pub policy: IdPolicy,
    pub summary: Option<PathBuf>,
}

impl SmrConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let policy = if cli.idrange.is_some() || cli.idfmt.is_some() {
            let template = IdTemplate::parse(cli.idfmt.as_deref().unwrap_or(DEFAULT_ID_FORMAT))?;
            let (start, end) = match cli.idrange.as_deref() {
                Some(range) => parse_id_range(range)?,
                None => DEFAULT_ID_RANGE,
            };
            IdPolicy::FixedRange { template, start, end }
        } else {
            IdPolicy::Discovery
        };

        let delimiter = match cli.delim.as_deref() {
            Some(delim) => parse_delimiter(delim)?,
            None if policy.is_discovery() => ',',
            None => '\t',
        };

        if cli.noids && policy.is_discovery() {
            warn!("--noids without a fixed ID range: rows cannot be matched to molecules");
        }

        if cli.inputs.is_empty() {
            return Err(SmrError::NoInputFiles);
        }

        let outfile = cli
            .outfile
            .clone()
            .filter(|path| path.as_os_str() != "-" && path.as_os_str() != "stdout");

        Ok(SmrConfig {
            inputs: cli.inputs.clone(),
            outfile,
            format: MatrixFormat {
                delimiter,
                include_ids: !cli.noids,
            },
            policy,
            summary: cli.summary.clone(),
        })
    }

    /// Short name of the active ID policy, for logs and the load summary
    pub fn mode_name(&self) -> &'static str {
        match self.policy {
            IdPolicy::Discovery => "discovery",
            IdPolicy::FixedRange { .. } => "fixed-range",
        }
    }
}

/// Parse an inclusive `START-END` molecule index range
pub fn parse_id_range(range: &str) -> Result<(u64, u64)> {
    let malformed = || SmrError::Config(format!("invalid ID range '{}', expected INT-INT", range));

    let (start, end) = range.trim().split_once('-').ok_or_else(malformed)?;
    let start: u64 = start.trim().parse().map_err(|_| malformed())?;
    let end: u64 = end.trim().parse().map_err(|_| malformed())?;
    if start > end {
        return Err(SmrError::InvalidRange { start, end });
    }
    Ok((start, end))
}

/// Resolve the output delimiter; `\t` spelled out means a tab
pub fn parse_delimiter(delim: &str) -> Result<char> {
    if delim == "\\t" {
        return Ok('\t');
    }
    let mut chars = delim.chars();
    let first = chars
        .next()
        .ok_or_else(|| SmrError::Config("empty string provided for delimiter".to_string()))?;
    if chars.next().is_some() {
        warn!("string '{}' provided for delimiter, using only '{}'", delim, first);
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Result<SmrConfig> {
        let cli = Cli::try_parse_from(std::iter::once("smr").chain(args.iter().copied())).unwrap();
        SmrConfig::from_cli(&cli)
    }

    #[test]
    fn test_parse_id_range() {
        assert_eq!(parse_id_range("1-10").unwrap(), (1, 10));
        assert_eq!(parse_id_range("7-7").unwrap(), (7, 7));
        assert!(matches!(parse_id_range("10-1"), Err(SmrError::InvalidRange { start: 10, end: 1 })));
        assert!(parse_id_range("10").is_err());
        assert!(parse_id_range("a-b").is_err());
        assert!(parse_id_range("-5").is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert_eq!(parse_delimiter("\\t").unwrap(), '\t');
        assert_eq!(parse_delimiter("\t").unwrap(), '\t');
        assert_eq!(parse_delimiter(";;").unwrap(), ';');
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_discovery_defaults() {
        let cfg = config(&["a.sam", "b.sam"]).unwrap();
        assert_eq!(cfg.policy, IdPolicy::Discovery);
        assert_eq!(cfg.format, MatrixFormat { delimiter: ',', include_ids: true });
        assert_eq!(cfg.inputs.len(), 2);
        assert_eq!(cfg.outfile, None);
        assert_eq!(cfg.mode_name(), "discovery");
    }

    #[test]
    fn test_fixed_range_selected_by_either_flag() {
        let cfg = config(&["--idrange", "1-3", "a.sam"]).unwrap();
        assert_eq!(
            cfg.policy,
            IdPolicy::FixedRange { template: IdTemplate::default(), start: 1, end: 3 }
        );
        assert_eq!(cfg.format.delimiter, '\t');

        let cfg = config(&["--idfmt", "tx%d", "--noids", "-o", "out.tsv", "a.sam"]).unwrap();
        assert_eq!(
            cfg.policy,
            IdPolicy::FixedRange { template: IdTemplate::parse("tx%d").unwrap(), start: 1, end: 10 }
        );
        assert!(!cfg.format.include_ids);
        assert_eq!(cfg.outfile, Some(PathBuf::from("out.tsv")));
    }

    #[test]
    fn test_configuration_errors() {
        assert!(matches!(config(&[]), Err(SmrError::NoInputFiles)));
        assert!(matches!(config(&["-r", "5-2", "a.sam"]), Err(SmrError::InvalidRange { .. })));
        assert!(matches!(config(&["-i", "gene%s", "a.sam"]), Err(SmrError::InvalidTemplate { .. })));
    }

    #[test]
    fn test_stdout_aliases() {
        assert_eq!(config(&["-o", "-", "a.sam"]).unwrap().outfile, None);
        assert_eq!(config(&["-o", "stdout", "a.sam"]).unwrap().outfile, None);
    }
}
