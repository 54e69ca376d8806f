use super::{parse_error, parse_f64, TimeHistorySource};
use crate::Result;
use rsgen::TimeHistory;
use std::path::{Path, PathBuf};

/// Index of the line holding the time step as its last token
const DT_LINE: usize = 5;

/// D-MOD `.acc` layers acceleration time histories
///
/// The time step is the last token of the 6th line.
/// The table starts at the first line whose time (1st column) is the time step
/// and ends at a line with a time of 0.
/// The 2nd column is the surface acceleration and the last column is the base acceleration,
/// they are returned as 2 time histories: `<file> surface` and `<file> base`.
#[derive(Debug, Clone)]
pub struct DmodAcc {
    path: PathBuf,
}
impl DmodAcc {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl TimeHistorySource for DmodAcc {
    fn path(&self) -> &Path {
        &self.path
    }
    fn parse(&self, content: &str) -> Result<Vec<TimeHistory>> {
        let path = self.path.as_path();
        let mut lines = content.lines().enumerate();
        let Some((i, line)) = lines.by_ref().nth(DT_LINE) else {
            return Ok(vec![]);
        };
        let dt = line
            .split_whitespace()
            .last()
            .ok_or_else(|| parse_error(path, i, "missing time step"))
            .and_then(|token| parse_f64(path, i, token))?;

        let mut started = false;
        let mut surface = vec![];
        let mut base = vec![];
        for (i, line) in lines {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(time) = tokens.first().and_then(|t| t.parse::<f64>().ok()) else {
                if started && !tokens.is_empty() {
                    return Err(parse_error(path, i, "invalid time value"));
                }
                continue;
            };
            if !started {
                started = (time - dt).abs() <= 1e-9 * dt.abs();
                if !started {
                    continue;
                }
            }
            if time == 0f64 {
                break;
            }
            if tokens.len() < 3 {
                return Err(parse_error(
                    path,
                    i,
                    format!("expected at least 3 columns, found {}", tokens.len()),
                ));
            }
            surface.push(parse_f64(path, i, tokens[1])?);
            base.push(parse_f64(path, i, tokens[tokens.len() - 1])?);
        }
        if surface.is_empty() {
            return Ok(vec![]);
        }
        let stem = self.stem();
        Ok(vec![
            TimeHistory::new(surface, dt)?.with_name(format!("{stem} surface")),
            TimeHistory::new(base, dt)?.with_name(format!("{stem} base")),
        ])
    }
}
