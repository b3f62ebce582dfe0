use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, SmrError};
use crate::io::sam::LoadStats;

/// Load summary for a whole run, one entry per input sample
#[derive(Serialize, Debug)]
pub struct RunSummary<'a> {
    pub mode: &'static str,
    pub rows: usize,
    pub samples: &'a [LoadStats],
}

/// Write the per-sample load stats to a JSON file
pub fn write_load_summary(summary: &RunSummary<'_>, output: &Path) -> Result<()> {
    let file = File::create(output).map_err(|source| SmrError::CreateOutput {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)
        .and_then(|()| writer.flush().map_err(serde_json::Error::io))
        .map_err(|source| SmrError::Summary {
            path: output.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_load_summary() {
        let stats = vec![LoadStats {
            source: "a.sam".to_string(),
            header_lines: 2,
            records: 5,
            unmapped: 1,
            mapped: 4,
            molecules: 3,
        }];
        let summary = RunSummary { mode: "discovery", rows: 3, samples: &stats };

        let temp_file = NamedTempFile::new().unwrap();
        write_load_summary(&summary, temp_file.path()).unwrap();

        let contents = std::fs::read_to_string(temp_file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["mode"], "discovery");
        assert_eq!(value["rows"], 3);
        assert_eq!(value["samples"][0]["source"], "a.sam");
        assert_eq!(value["samples"][0]["mapped"], 4);
    }

    #[test]
    fn test_summary_errors_name_the_summary_file() {
        let dir = tempfile::tempdir().unwrap();
        let summary = RunSummary { mode: "discovery", rows: 0, samples: &[] };

        // a directory cannot be opened as the summary file
        let err = write_load_summary(&summary, dir.path()).unwrap_err();
        assert!(matches!(err, SmrError::CreateOutput { ref path, .. } if path == dir.path()));

        let err = SmrError::Summary {
            path: dir.path().join("summary.json"),
            source: serde_json::Error::io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")),
        };
        let msg = err.to_string();
        assert!(msg.contains("summary.json"));
        assert!(msg.contains("disk full"));
    }
}
