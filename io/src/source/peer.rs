use super::{parse_error, parse_f64, TimeHistorySource};
use crate::Result;
use rsgen::TimeHistory;
use std::path::{Path, PathBuf};

/// Number of header lines
const HEADER: usize = 4;

/// PEER NGA strong motion database `.AT2` record
///
/// The 2nd header line holds the record name, date, station and direction,
/// the 4th line holds the number of samples `NPTS=` and the time step `DT=`.
#[derive(Debug, Clone)]
pub struct PeerAt2 {
    path: PathBuf,
}
impl PeerAt2 {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

// Returns the text following `key` up to the first character that can't be part of a number
fn field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let start = line.find(key)? + key.len();
    let rest = line[start..].trim_start();
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

impl TimeHistorySource for PeerAt2 {
    fn path(&self) -> &Path {
        &self.path
    }
    fn parse(&self, content: &str) -> Result<Vec<TimeHistory>> {
        let path = self.path.as_path();
        let mut lines = content.lines();
        let header: Vec<&str> = lines.by_ref().take(HEADER).collect();
        if header.len() < HEADER {
            return Ok(vec![]);
        }
        let line = header[3].to_uppercase();
        let npts = field(&line, "NPTS=")
            .ok_or_else(|| parse_error(path, 3, "missing NPTS="))?
            .parse::<usize>()
            .map_err(|e| parse_error(path, 3, format!("NPTS: {e}")))?;
        let dt = field(&line, "DT=")
            .ok_or_else(|| parse_error(path, 3, "missing DT="))
            .and_then(|token| parse_f64(path, 3, token))?;

        let mut samples = Vec::with_capacity(npts);
        for (i, line) in lines.enumerate() {
            for token in line.split_whitespace() {
                samples.push(parse_f64(path, i + HEADER, token)?);
            }
        }
        if samples.len() < npts {
            return Err(parse_error(
                path,
                3,
                format!("expected {npts} samples, found {}", samples.len()),
            ));
        }
        if samples.len() > npts {
            log::warn!(
                "{path:?}: {} samples found, keeping the first NPTS={npts}",
                samples.len()
            );
            samples.truncate(npts);
        }

        let name = header[1]
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let name = if name.is_empty() { self.stem() } else { name };
        Ok(vec![TimeHistory::new(samples, dt)?.with_name(name)])
    }
}
