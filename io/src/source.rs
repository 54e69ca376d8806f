//! # Time histories sources
//!
//! A [TimeHistorySource] turns the content of a file into [TimeHistory]s.
//! The source is selected from the file extension with [source]:
//!  * `.ahl`: SHAKE acceleration time history, see [Ahl],
//!  * `.csv`: LS-DYNA multi-columns time histories, see [LsDynaCsv],
//!  * `.at2`: PEER NGA strong motion record, see [PeerAt2],
//!  * `.acc`: D-MOD surface and base acceleration time histories, see [DmodAcc].
//!
//! Fixed width columns files do not carry the time step and are read with [FixedWidth]
//! given a [FixedWidthFormat].

use crate::{IoError, Result};
use rsgen::TimeHistory;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

mod ahl;
mod dmod;
mod fixed;
mod lsdyna;
mod peer;
pub use ahl::Ahl;
pub use dmod::DmodAcc;
pub use fixed::{FixedWidth, FixedWidthFormat};
pub use lsdyna::LsDynaCsv;
pub use peer::PeerAt2;

/// Supported file extensions
pub const EXTENSIONS: [&str; 4] = ["ahl", "csv", "at2", "acc"];

/// Time histories source interface
pub trait TimeHistorySource: Send + Sync {
    /// Source file
    fn path(&self) -> &Path;
    /// Parses the time histories from the file content
    fn parse(&self, content: &str) -> Result<Vec<TimeHistory>>;
    /// Reads the time histories from the file
    fn read(&self) -> Result<Vec<TimeHistory>> {
        let path = self.path();
        log::info!("reading {path:?}");
        let content =
            fs::read_to_string(path).map_err(|e| IoError::Open(e, path.to_path_buf()))?;
        let time_histories = self.parse(&content)?;
        if time_histories.is_empty() {
            return Err(IoError::Empty(path.to_path_buf()));
        }
        for th in &time_histories {
            log::debug!("{th}");
        }
        Ok(time_histories)
    }
    /// Source file name without extension
    fn stem(&self) -> String {
        self.path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Returns the time histories source matching the file extension
pub fn source<P: AsRef<Path>>(path: P) -> Result<Box<dyn TimeHistorySource>> {
    let path = path.as_ref().to_path_buf();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "ahl" => Ok(Box::new(Ahl::new(path))),
        "csv" => Ok(Box::new(LsDynaCsv::new(path))),
        "at2" => Ok(Box::new(PeerAt2::new(path))),
        "acc" => Ok(Box::new(DmodAcc::new(path))),
        _ => Err(IoError::Unsupported(path)),
    }
}

/// Returns true if the file extension is supported
pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| EXTENSIONS.contains(&e.as_str()))
}

/// Returns the files of a folder accepted by `supported`, sorted by name
pub fn scan<P, F>(folder: P, supported: F) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    F: Fn(&Path) -> bool,
{
    let folder = folder.as_ref();
    let mut files: Vec<PathBuf> = fs::read_dir(folder)
        .map_err(|e| IoError::Open(e, folder.to_path_buf()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.is_file() && supported(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Returns the output file name stem of each time histories file
///
/// The stem is the file name without extension, unless several files share
/// the same stem (ignoring case), then the extension is appended: `H1_ahl`, `H1_csv`.
pub fn output_stems(paths: &[PathBuf]) -> Vec<String> {
    let stem = |path: &PathBuf| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    };
    let mut count: HashMap<String, usize> = HashMap::new();
    for path in paths {
        *count.entry(stem(path).to_lowercase()).or_default() += 1;
    }
    paths
        .iter()
        .map(|path| {
            let name = stem(path);
            if count.get(&name.to_lowercase()).copied().unwrap_or_default() > 1 {
                let ext = path
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                format!("{name}_{ext}")
            } else {
                name
            }
        })
        .collect()
}

pub(crate) fn parse_f64(path: &Path, line: usize, token: &str) -> Result<f64> {
    token.trim().parse::<f64>().map_err(|e| IoError::Parse {
        path: path.to_path_buf(),
        line: line + 1,
        msg: format!("{token:?}: {e}"),
    })
}

pub(crate) fn parse_error<S: Into<String>>(path: &Path, line: usize, msg: S) -> IoError {
    IoError::Parse {
        path: PathBuf::from(path),
        line: line + 1,
        msg: msg.into(),
    }
}
