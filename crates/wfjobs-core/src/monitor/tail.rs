//! Bounded tail reads.
//!
//! Only the last `TAIL_BLOCK_BYTES * max(1, tail_lines / 4)` bytes of a file
//! are read, however large it has grown.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

pub const TAIL_BLOCK_BYTES: u64 = 4096;

/// Size of the trailing byte window read for `tail_lines` lines.
pub fn tail_window_bytes(tail_lines: usize) -> u64 {
    TAIL_BLOCK_BYTES.saturating_mul((tail_lines / 4).max(1) as u64)
}

/// Returns up to the last `tail_lines` complete lines of `path`.
///
/// When the window starts mid-line, that partial first line is dropped. The
/// final line is returned even without a trailing newline; the writer may be
/// in the middle of it, so callers must tolerate truncated content. Invalid
/// UTF-8 is replaced rather than rejected.
pub fn read_tail_lines(path: &Path, tail_lines: usize) -> io::Result<Vec<String>> {
    if tail_lines == 0 {
        return Ok(Vec::new());
    }
    let mut file = File::open(path)?;
    let size = file.metadata()?.len();
    let offset = size.saturating_sub(tail_window_bytes(tail_lines));
    // One byte before the window tells whether it starts on a line boundary.
    let read_from = offset.saturating_sub(1);
    file.seek(SeekFrom::Start(read_from))?;

    let mut buf = Vec::with_capacity((size - read_from) as usize);
    file.take(size - read_from).read_to_end(&mut buf)?;

    let mut data = buf.as_slice();
    if offset > 0 {
        data = match data.iter().position(|&b| b == b'\n') {
            Some(nl) => &data[nl + 1..],
            None => &[],
        };
    }

    let text = String::from_utf8_lossy(data);
    let lines: Vec<&str> = text.lines().collect();
    let skip = lines.len().saturating_sub(tail_lines);
    Ok(lines[skip..].iter().map(|l| l.to_string()).collect())
}
