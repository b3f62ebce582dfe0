use std::io::BufRead;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SmrError};
use crate::io::stream::open_input;
use crate::quant::counts::SampleCounts;

/// SAM flag bit: segment unmapped
pub const FLAG_UNMAPPED: u16 = 0x4;

/// The two fields of an alignment line that matter for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamHit<'a> {
    pub flag: u16,
    pub molecule_id: &'a str,
}

impl SamHit<'_> {
    pub fn is_mapped(&self) -> bool {
        self.flag & FLAG_UNMAPPED == 0
    }
}

/// Per-file tallies collected while loading a sample
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub source: String,
    pub header_lines: u64,
    pub records: u64,
    pub unmapped: u64,
    pub mapped: u64,
    pub molecules: usize,
}

/// Split an alignment line into its flag and reference name
///
/// Returns the reason string on failure so the caller can attach location.
pub fn parse_hit(line: &str) -> std::result::Result<SamHit<'_>, &'static str> {
    let mut fields = line.split('\t');
    let (Some(_qname), Some(flag), Some(molecule_id)) = (fields.next(), fields.next(), fields.next()) else {
        return Err("expected at least 3 tab-separated fields");
    };
    let flag = flag.parse::<u16>().map_err(|_| "invalid FLAG field")?;
    Ok(SamHit { flag, molecule_id })
}

/// Count mapped reads per molecule from a SAM stream
///
/// # Arguments
/// * `reader` - Buffered SAM text
/// * `source` - Name used in error messages and stats (usually the file path)
///
/// # Returns
/// * Per-molecule counts and the tallies gathered along the way
pub fn count_mapped_reads<R: BufRead>(reader: R, source: &str) -> Result<(SampleCounts, LoadStats)> {
    let mut counts = SampleCounts::new();
    let mut stats = LoadStats {
        source: source.to_string(),
        ..LoadStats::default()
    };

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| SmrError::Read {
            source_name: source.to_string(),
            source: e,
        })?;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if line.starts_with('@') {
            stats.header_lines += 1;
            continue;
        }
        let hit = parse_hit(line).map_err(|reason| SmrError::Parse {
            source_name: source.to_string(),
            line: idx + 1,
            reason,
            content: line.to_string(),
        })?;

        stats.records += 1;
        if hit.is_mapped() {
            stats.mapped += 1;
            counts.increment(hit.molecule_id);
        } else {
            stats.unmapped += 1;
        }
    }

    stats.molecules = counts.len();
    debug!(
        "{}: {} header lines, {} records, {} unmapped, {} mapped to {} molecules",
        source, stats.header_lines, stats.records, stats.unmapped, stats.mapped, stats.molecules
    );
    Ok((counts, stats))
}

/// Load one sample from a SAM file (optionally gzipped)
pub fn load_sample(path: &Path) -> Result<(SampleCounts, LoadStats)> {
    let reader = open_input(path)?;
    count_mapped_reads(reader, &path.display().to_string())
}
