use super::{parse_error, parse_f64, TimeHistorySource};
use crate::Result;
use rsgen::TimeHistory;
use std::path::{Path, PathBuf};

/// Number of header lines
const HEADER: usize = 3;

/// SHAKE `.ahl` acceleration time history
///
/// The file starts with 3 header lines, the time step is the 3rd token of the 2nd line.
/// All the tokens after the header are acceleration samples.
#[derive(Debug, Clone)]
pub struct Ahl {
    path: PathBuf,
}
impl Ahl {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}
impl TimeHistorySource for Ahl {
    fn path(&self) -> &Path {
        &self.path
    }
    fn parse(&self, content: &str) -> Result<Vec<TimeHistory>> {
        let path = self.path.as_path();
        let mut lines = content.lines().enumerate();
        let mut dt = None;
        for (i, line) in lines.by_ref().take(HEADER) {
            if i == 1 {
                let token = line
                    .split_whitespace()
                    .nth(2)
                    .ok_or_else(|| parse_error(path, i, "missing time step"))?;
                dt = Some(parse_f64(path, i, token)?);
            }
        }
        let dt = dt.ok_or_else(|| parse_error(path, 1, "missing time step"))?;
        let mut samples = vec![];
        for (i, line) in lines {
            for token in line.split_whitespace() {
                samples.push(parse_f64(path, i, token)?);
            }
        }
        if samples.is_empty() {
            return Ok(vec![]);
        }
        let th = TimeHistory::new(samples, dt)?.with_name(self.stem());
        Ok(vec![th])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IoError;

    const AHL: &str = "\
Acceleration time history at layer 1
  NV=8  DT= 0.005  outcrop
  units: g
 0.0010 0.0020 -0.0030 0.0040
 -0.0050 0.0060 0.0070 -0.0080
";

    #[test]
    fn parse() {
        let th = Ahl::new("data/H1.ahl").parse(AHL).unwrap();
        assert_eq!(th.len(), 1);
        assert_eq!(th[0].name(), Some("H1"));
        assert_eq!(th[0].dt(), 0.005);
        assert_eq!(th[0].len(), 8);
        assert_eq!(th[0].samples()[7], -0.008);
    }

    #[test]
    fn bad_time_step() {
        let content = AHL.replace("DT= 0.005", "DT= zero");
        let err = Ahl::new("H1.ahl").parse(&content).unwrap_err();
        assert!(
            matches!(&err, IoError::Parse { line: 2, msg, .. } if msg.contains("zero")),
            "{err}"
        );
    }

    #[test]
    fn missing_time_step() {
        let content = AHL.replace("  NV=8  DT= 0.005  outcrop", "  NV=8");
        let err = Ahl::new("H1.ahl").parse(&content).unwrap_err();
        assert!(
            matches!(&err, IoError::Parse { line: 2, msg, .. } if msg == "missing time step"),
            "{err}"
        );
    }

    #[test]
    fn header_only() {
        let content: String = AHL.lines().take(3).collect::<Vec<_>>().join("\n");
        assert!(Ahl::new("H1.ahl").parse(&content).unwrap().is_empty());
    }
}
