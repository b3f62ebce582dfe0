use std::io::Write;
use std::time::Instant;

use tracing::info;

use crate::config::SmrConfig;
use crate::error::Result;
use crate::io::sam::{load_sample, LoadStats};
use crate::io::stream::OutputSink;
use crate::io::summary::{write_load_summary, RunSummary};
use crate::quant::counts::SampleCounts;
use crate::quant::matrix::{assemble, write_counts_matrix};

/// Load every input sample, in argument order
///
/// Stops at the first file that cannot be opened or parsed.
pub fn load_samples(config: &SmrConfig) -> Result<(Vec<SampleCounts>, Vec<LoadStats>)> {
    let mut samples = Vec::with_capacity(config.inputs.len());
    let mut stats = Vec::with_capacity(config.inputs.len());

    for path in &config.inputs {
        let (counts, file_stats) = load_sample(path)?;
        info!(
            "Loaded {}: {} mapped reads across {} molecules",
            path.display(),
            file_stats.mapped,
            file_stats.molecules
        );
        samples.push(counts);
        stats.push(file_stats);
    }

    Ok((samples, stats))
}

/// Assemble the loaded samples and render the counts matrix to `writer`
///
/// Returns the number of rows written.
pub fn render_count_matrix<W: Write>(config: &SmrConfig, samples: &[SampleCounts], writer: &mut W) -> Result<usize> {
    let rows = write_counts_matrix(writer, assemble(samples, &config.policy), &config.format)?;
    Ok(rows)
}

/// Run the whole counting pipeline: load, assemble, write output and summary
pub fn run_count_matrix(config: &SmrConfig) -> Result<usize> {
    info!(
        "Counting mapped reads for {} sample(s) in {} mode",
        config.inputs.len(),
        config.mode_name()
    );
    let start = Instant::now();

    // All inputs must load before the output file is created
    let (samples, stats) = load_samples(config)?;

    let mut sink = OutputSink::create(config.outfile.as_deref())?;
    let rows = render_count_matrix(config, &samples, &mut sink)?;
    sink.finish()?;

    if let Some(summary_path) = &config.summary {
        let summary = RunSummary {
            mode: config.mode_name(),
            rows,
            samples: &stats,
        };
        write_load_summary(&summary, summary_path)?;
        info!("Load summary written to {}", summary_path.display());
    }

    info!("Wrote {} rows in {:.2}s", rows, start.elapsed().as_secs_f32());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quant::matrix::{IdPolicy, MatrixFormat};
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn sam_file(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    fn discovery_config(inputs: Vec<PathBuf>) -> SmrConfig {
        SmrConfig {
            inputs,
            outfile: None,
            format: MatrixFormat { delimiter: ',', include_ids: true },
            policy: IdPolicy::Discovery,
            summary: None,
        }
    }

    #[test]
    fn test_render_count_matrix_two_samples() {
        let a = sam_file(&["@HD\tVN:1.6", "r1\t0\tGENE1", "r2\t0\tGENE1", "r3\t0\tGENE1"]);
        let b = sam_file(&["r1\t0\tGENE2", "r2\t4\tGENE1", "r3\t16\tGENE2"]);
        let config = discovery_config(vec![a.path().to_path_buf(), b.path().to_path_buf()]);

        let (samples, stats) = load_samples(&config).unwrap();
        let mut out = Vec::new();
        let rows = render_count_matrix(&config, &samples, &mut out).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "GENE1,3,0\nGENE2,0,2\n");
        assert_eq!(stats[0].header_lines, 1);
        assert_eq!(stats[1].unmapped, 1);
    }

    #[test]
    fn test_missing_sample_fails_whole_run() {
        let a = sam_file(&["r1\t0\tGENE1"]);
        let config = discovery_config(vec![a.path().to_path_buf(), PathBuf::from("/nonexistent/b.sam")]);

        assert!(load_samples(&config).is_err());
    }
}
