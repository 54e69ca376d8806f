use super::{parse_error, parse_f64, TimeHistorySource};
use crate::{IoError, Result};
use rsgen::TimeHistory;
use std::path::{Path, PathBuf};

/// Relative tolerance on the time step uniformity
pub const STEP_TOLERANCE: f64 = 1e-2;

/// LS-DYNA style `.csv` time histories
///
/// The first line of the file is skipped and the second line holds the columns name.
/// The first column is the time and each of the other columns is an acceleration time history.
/// The time step is the mean time step, every time step must be within [STEP_TOLERANCE] of it.
/// Columns without a name are ignored and columns with missing, non-numeric or non-finite values are skipped.
#[derive(Debug, Clone)]
pub struct LsDynaCsv {
    path: PathBuf,
}
impl LsDynaCsv {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

struct Column {
    name: String,
    index: usize,
    samples: Option<Vec<f64>>,
}

impl TimeHistorySource for LsDynaCsv {
    fn path(&self) -> &Path {
        &self.path
    }
    fn parse(&self, content: &str) -> Result<Vec<TimeHistory>> {
        let path = self.path.as_path();
        let Some((_, body)) = content.split_once('\n') else {
            return Ok(vec![]);
        };
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());
        let mut columns: Vec<Column> = rdr
            .headers()?
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, name)| !name.is_empty())
            .map(|(index, name)| Column {
                name: name.to_string(),
                index,
                samples: Some(vec![]),
            })
            .collect();

        let mut time = vec![];
        for record in rdr.records() {
            let record = record?;
            // 0-based line index in the file, accounting for the skipped line
            let line = record.position().map_or(0, |p| p.line() as usize);
            if record.iter().all(str::is_empty) {
                continue;
            }
            let t = record
                .get(0)
                .ok_or_else(|| parse_error(path, line, "missing time value"))?;
            time.push(parse_f64(path, line, t)?);
            for column in columns.iter_mut() {
                let Some(samples) = column.samples.as_mut() else {
                    continue;
                };
                match record.get(column.index).map(|a| a.parse::<f64>()) {
                    Some(Ok(a)) if a.is_finite() => samples.push(a),
                    _ => {
                        log::warn!(
                            "{path:?}: invalid value in column {:?} (line {}), column skipped",
                            column.name,
                            line + 1
                        );
                        column.samples = None;
                    }
                }
            }
        }

        let n = time.len();
        if n < 2 {
            return Ok(vec![]);
        }
        let dt = (time[n - 1] - time[0]) / (n - 1) as f64;
        if let Some((index, step)) = time
            .windows(2)
            .map(|w| w[1] - w[0])
            .enumerate()
            .find(|(_, step)| !((step - dt).abs() <= STEP_TOLERANCE * dt.abs()))
        {
            return Err(IoError::NonUniformStep {
                path: path.to_path_buf(),
                dt,
                step,
                index: index + 1,
            });
        }

        columns
            .into_iter()
            .filter_map(|column| column.samples.map(|samples| (column.name, samples)))
            .map(|(name, samples)| Ok(TimeHistory::new(samples, dt)?.with_name(name)))
            .collect()
    }
}
