/*!
# rsgen_io

Input/output for [rsgen]:
 - [mod@source]: time histories readers, one per file format, behind the [TimeHistorySource] interface,
 - [Settings]: the response spectra generation settings file,
 - [SpectraTable]: the response spectra CSV writer,
 - [filing]: binary serialization of the response spectra.
*/

use std::path::PathBuf;

pub mod filing;
mod settings;
pub mod source;
mod writer;

pub use filing::{Codec, Filing};
pub use settings::{Method, Settings, SETTINGS_FILE};
pub use source::{source, FixedWidthFormat, TimeHistorySource, EXTENSIONS};
pub use writer::{Ordinate, SpectraTable};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("i/o error")]
    IO(#[from] std::io::Error),
    #[error("can't open file {1:?}")]
    Open(#[source] std::io::Error, PathBuf),
    #[error("can't create file {1:?}")]
    Create(#[source] std::io::Error, PathBuf),
    #[error("{path:?} (line {line}): {msg}")]
    Parse {
        path: PathBuf,
        line: usize,
        msg: String,
    },
    #[error("{0:?}: no time history found")]
    Empty(PathBuf),
    #[error("{path:?}: non uniform time step, expected {dt}s found {step}s at sample #{index}")]
    NonUniformStep {
        path: PathBuf,
        dt: f64,
        step: f64,
        index: usize,
    },
    #[error("{0:?}: unsupported file format")]
    Unsupported(PathBuf),
    #[error("CSV error")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Spectrum(#[from] rsgen::SpectrumError),
    #[error("failed to parse the settings")]
    SettingsDecode(#[from] toml::de::Error),
    #[error("failed to write the settings")]
    SettingsEncode(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Settings(String),
    #[error("spectra mismatch: {0}")]
    Mismatch(String),
    #[error("decoder error")]
    Decoder(#[from] bincode::error::DecodeError),
    #[error("encoder error")]
    Encoder(#[from] bincode::error::EncodeError),
}

pub type Result<T> = std::result::Result<T, IoError>;
