use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Stdout, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Result, SmrError};

fn is_gzipped(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

/// Open an alignment file for reading, handles gzipped files automatically
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| SmrError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Destination for the rendered matrix
pub enum OutputSink {
    Stdout(BufWriter<Stdout>),
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

impl OutputSink {
    /// Open `path` for writing, or stdout when no path is given
    pub fn create(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(OutputSink::Stdout(BufWriter::new(io::stdout())));
        };
        let file = File::create(path).map_err(|source| SmrError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })?;
        if is_gzipped(path) {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(OutputSink::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(OutputSink::Plain(BufWriter::new(file)))
        }
    }

    /// Flush buffered rows and write the gzip trailer if compressing
    pub fn finish(self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(mut writer) => writer.flush(),
            OutputSink::Plain(mut writer) => writer.flush(),
            OutputSink::Compressed(writer) => {
                let encoder = writer.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?.flush()
            }
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout(writer) => writer.write(buf),
            OutputSink::Plain(writer) => writer.write(buf),
            OutputSink::Compressed(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(writer) => writer.flush(),
            OutputSink::Plain(writer) => writer.flush(),
            OutputSink::Compressed(writer) => writer.flush(),
        }
    }
}
