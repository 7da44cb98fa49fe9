// LogAnalyzer - platform/fs.rs
//
// Filesystem access for the log file: path validation, buffered opening,
// and lossy line reading.

use crate::util::error::FileError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Confirm `path` names an existing regular file and return its size in bytes.
pub fn check_log_file(path: &Path) -> Result<u64, FileError> {
    let metadata = std::fs::metadata(path).map_err(|_| FileError::NotFound {
        path: path.to_path_buf(),
    })?;
    if !metadata.is_file() {
        return Err(FileError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(metadata.len())
}

/// Open the log file for one sequential pass. Closed when the reader drops.
pub fn open_log_file(path: &Path) -> io::Result<BufReader<File>> {
    let file = File::open(path)?;
    tracing::debug!(path = %path.display(), "Opened log file");
    Ok(BufReader::new(file))
}

/// Read the next line into `buf`, without its `\n` / `\r\n` terminator.
///
/// Invalid UTF-8 is replaced rather than rejected so one corrupt line never
/// aborts a pass. Returns `Ok(false)` at end of input.
pub fn read_line_lossy<R: BufRead>(
    reader: &mut R,
    bytes: &mut Vec<u8>,
    buf: &mut String,
) -> io::Result<bool> {
    bytes.clear();
    buf.clear();
    if reader.read_until(b'\n', bytes)? == 0 {
        return Ok(false);
    }
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    buf.push_str(&String::from_utf8_lossy(bytes));
    Ok(true)
}
