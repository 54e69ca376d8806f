use super::{parse_f64, TimeHistorySource};
use crate::Result;
use rsgen::TimeHistory;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed width columns layout, e.g. Fortran `8F9.6`
///
/// The file does not carry the time step, it is given with the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixedWidthFormat {
    /// File extension
    pub extension: String,
    /// Time step in seconds
    pub dt: f64,
    /// Number of header lines
    pub header: usize,
    /// Number of values per line
    pub columns: usize,
    /// Number of characters per value
    pub width: usize,
}
impl Default for FixedWidthFormat {
    fn default() -> Self {
        Self {
            extension: "txt".into(),
            dt: 0.01,
            header: 8,
            columns: 8,
            width: 9,
        }
    }
}

/// Fixed width columns acceleration time history
///
/// After the header, the values are read line after line, in fields of `width` characters.
/// Characters past the `columns` fields of a line are ignored and so are blank fields.
#[derive(Debug, Clone)]
pub struct FixedWidth {
    path: PathBuf,
    format: FixedWidthFormat,
}
impl FixedWidth {
    pub fn new<P: Into<PathBuf>>(path: P, format: FixedWidthFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

impl TimeHistorySource for FixedWidth {
    fn path(&self) -> &Path {
        &self.path
    }
    fn parse(&self, content: &str) -> Result<Vec<TimeHistory>> {
        let path = self.path.as_path();
        let FixedWidthFormat {
            dt,
            header,
            columns,
            width,
            ..
        } = self.format;
        let mut samples = vec![];
        for (i, line) in content.lines().enumerate().skip(header) {
            let chars: Vec<char> = line.chars().collect();
            for field in chars.chunks(width.max(1)).take(columns) {
                let field: String = field.iter().collect();
                if field.trim().is_empty() {
                    continue;
                }
                samples.push(parse_f64(path, i, &field)?);
            }
        }
        if samples.is_empty() {
            return Ok(vec![]);
        }
        Ok(vec![TimeHistory::new(samples, dt)?.with_name(self.stem())])
    }
}
