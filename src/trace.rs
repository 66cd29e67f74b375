//! Reading branch traces.
//!
//! A trace is a text file with one conditional branch per line: the
//! program counter in hexadecimal, then the outcome (`1` for taken, `0`
//! for not-taken), separated by whitespace:
//!
//! ```text
//! 0x401000 1
//! 0x401004 0
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

pub mod synth;

use std::fs::File;
use std::io::{ BufRead, BufReader };
use std::path::{ Path, PathBuf };

use crate::branch::*;
use crate::error::TraceError;

/// A trace read from a text file.
#[derive(Clone, Debug)]
pub struct TextTrace {
    pub name: String,
    pub data: Vec<BranchRecord>,
}
impl TextTrace {
    /// Read a [TextTrace] from a file. The file name becomes the trace name.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path.file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(name, BufReader::new(f))
    }

    /// Read a [TextTrace] from any buffered reader. Stops at the first
    /// malformed line.
    pub fn from_reader(name: impl Into<String>, reader: impl BufRead)
        -> Result<Self, TraceError>
    {
        let name = name.into();
        let mut data = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| TraceError::Io {
                path: PathBuf::from(&name),
                source,
            })?;
            let record = parse_line(&line).map_err(|reason| {
                TraceError::Malformed { line: idx + 1, reason }
            })?;
            if let Some(record) = record {
                data.push(record);
            }
        }
        Ok(Self { name, data })
    }

    pub fn name(&self) -> &str { &self.name }

    /// Return the number of records
    pub fn num_entries(&self) -> usize { self.data.len() }

    /// Return a slice of records.
    pub fn as_slice(&self) -> &[BranchRecord] { &self.data }

    /// Return a truncated slice of records
    pub fn as_slice_trunc(&self, limit: usize) -> &[BranchRecord] {
        &self.data[..limit.min(self.data.len())]
    }
}

/// Parse a single line of a text trace. Returns [None] for lines that
/// carry no record.
pub fn parse_line(line: &str) -> Result<Option<BranchRecord>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let (Some(pc), Some(outcome), None) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err(format!("expected '<pc> <outcome>', found '{}'", line));
    };

    let digits = pc.strip_prefix("0x")
        .or_else(|| pc.strip_prefix("0X"))
        .unwrap_or(pc);
    let pc = u64::from_str_radix(digits, 16)
        .map_err(|e| format!("bad program counter '{}': {}", pc, e))?;

    // Any non-zero value counts as taken
    let outcome = outcome.parse::<u64>()
        .map_err(|e| format!("bad outcome '{}': {}", outcome, e))?;

    Ok(Some(BranchRecord::new(pc, Outcome::from_bool(outcome != 0))))
}
