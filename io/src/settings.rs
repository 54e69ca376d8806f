use crate::{
    source::{self, FixedWidth, FixedWidthFormat, TimeHistorySource},
    IoError, Result,
};
use rsgen::{Frequencies, SpectrumBuilder};
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Default settings file name
pub const SETTINGS_FILE: &str = "RS_settings.toml";

/// Oscillators response method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Exact recursion for piecewise linear base acceleration
    #[default]
    #[serde(alias = "shake")]
    Step,
}
impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Step => write!(f, "step"),
        }
    }
}

/// Response spectra generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Folder with the input time histories
    pub folder: PathBuf,
    /// Damping ratios
    pub damping: Vec<f64>,
    /// Frequencies up to 1000Hz instead of 100Hz
    pub high_frequency: bool,
    /// Adds the rigid oscillator (T=0s)
    pub rigid: bool,
    /// Oscillators periods, overriding the frequencies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<f64>>,
    /// Oscillators response method
    pub method: Method,
    /// Writes the spectra to a binary file as well
    pub binary: bool,
    /// Fixed width columns time histories layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_width: Option<FixedWidthFormat>,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            damping: vec![0.05],
            high_frequency: false,
            rigid: true,
            periods: None,
            method: Method::Step,
            binary: false,
            fixed_width: None,
        }
    }
}

const TEMPLATE: &str = r#"# Response spectra generator settings

# Folder with the input time histories (.ahl, .csv, .at2 or .acc files)
folder = "."

# Critical damping ratios, each in [0,1[
damping = [0.05]

# Spectra up to 1000Hz (true) or up to 100Hz (false)
high_frequency = false

# Adds the rigid oscillator (T=0s), its pseudo-acceleration is the peak ground acceleration
rigid = true

# Oscillators periods in seconds, in strictly increasing order, overriding the default frequencies
# periods = [0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0]

# Oscillators response method, only "step" is available
method = "step"

# Writes the spectra to a binary file next to the CSV file
binary = false

# Fixed width columns time histories (e.g. Fortran 8F9.6), the time step is not in the files
# [fixed_width]
# extension = "txt"
# dt = 0.01
# header = 8
# columns = 8
# width = 9
"#;

impl Settings {
    /// Loads the settings from a TOML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| IoError::Open(e, path.to_path_buf()))?;
        let settings: Self = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }
    /// Checks the settings values
    pub fn validate(&self) -> Result<()> {
        if self.damping.is_empty() {
            return Err(IoError::Settings("no damping ratio".into()));
        }
        if let Some(zeta) = self
            .damping
            .iter()
            .find(|zeta| !(zeta.is_finite() && (0f64..1f64).contains(*zeta)))
        {
            return Err(IoError::Settings(format!(
                "damping ratio must be in [0,1[, found {zeta}"
            )));
        }
        if let Some(periods) = &self.periods {
            if periods.is_empty() {
                return Err(IoError::Settings("no period".into()));
            }
            if let Some(period) = periods.iter().find(|p| !(p.is_finite() && **p >= 0f64)) {
                return Err(IoError::Settings(format!(
                    "periods must be positive, found {period}"
                )));
            }
        }
        if let Some(format) = &self.fixed_width {
            if !(format.dt.is_finite() && format.dt > 0f64) {
                return Err(IoError::Settings(format!(
                    "fixed width time step must be positive, found {}",
                    format.dt
                )));
            }
            if format.columns == 0 || format.width == 0 {
                return Err(IoError::Settings(
                    "fixed width columns and width must be positive".into(),
                ));
            }
        }
        Ok(())
    }
    /// Default settings file content with comments
    pub fn template() -> &'static str {
        TEMPLATE
    }
    /// Writes the default settings to a new file
    ///
    /// Fails if the file already exists
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| IoError::Create(e, path.to_path_buf()))?;
        file.write_all(TEMPLATE.as_bytes())?;
        log::info!("default settings written to {path:?}");
        Ok(())
    }
    /// Serializes the settings to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
    /// Oscillators periods
    ///
    /// The given periods are used as is, otherwise the periods are derived from the standard frequencies
    pub fn periods(&self) -> Vec<f64> {
        match &self.periods {
            Some(periods) => periods.clone(),
            None => Frequencies::Standard {
                high_frequency: self.high_frequency,
            }
            .periods(self.rigid),
        }
    }
    /// Returns the response spectra builder matching the settings
    pub fn spectrum_builder(&self) -> Result<SpectrumBuilder> {
        Ok(SpectrumBuilder::new(self.periods(), self.damping.clone())?)
    }
    fn is_fixed_width(&self, path: &Path) -> bool {
        self.fixed_width.as_ref().is_some_and(|format| {
            path.extension()
                .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(&format.extension))
        })
    }
    /// Returns true if the file is a time histories file
    pub fn is_supported<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        self.is_fixed_width(path) || source::is_supported(path)
    }
    /// Returns the time histories source of a file
    pub fn source<P: AsRef<Path>>(&self, path: P) -> Result<Box<dyn TimeHistorySource>> {
        let path = path.as_ref();
        match &self.fixed_width {
            Some(format) if self.is_fixed_width(path) => {
                Ok(Box::new(FixedWidth::new(path, format.clone())))
            }
            _ => source::source(path),
        }
    }
    /// Returns the time histories files of the folder, sorted by name
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        source::scan(&self.folder, |path| self.is_supported(path))
    }
    /// Time histories files extensions
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions = source::EXTENSIONS.to_vec();
        if let Some(format) = &self.fixed_width {
            extensions.push(format.extension.as_str());
        }
        extensions
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "folder = {:?}", self.folder)?;
        writeln!(f, "damping = {:?}", self.damping)?;
        match &self.periods {
            Some(periods) => writeln!(f, "periods = {} user defined", periods.len())?,
            None => {
                writeln!(f, "high_frequency = {}", self.high_frequency)?;
                writeln!(f, "rigid = {}", self.rigid)?;
            }
        }
        writeln!(f, "method = {}", self.method)?;
        write!(f, "binary = {}", self.binary)?;
        if let Some(format) = &self.fixed_width {
            write!(
                f,
                "\nfixed_width = .{} files, dt = {}s, {} header lines, {} values of {} characters per line",
                format.extension, format.dt, format.header, format.columns, format.width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_default() {
        let settings: Settings = toml::from_str(Settings::template()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial() {
        let settings: Settings = toml::from_str("damping = [0.02, 0.05]\nmethod = \"shake\"").unwrap();
        assert_eq!(settings.damping, vec![0.02, 0.05]);
        assert_eq!(settings.method, Method::Step);
        assert!(settings.rigid);
        assert_eq!(settings.periods().len(), 101);
    }

    #[test]
    fn high_frequency() {
        let settings = Settings {
            high_frequency: true,
            rigid: false,
            ..Default::default()
        };
        assert_eq!(settings.spectrum_builder().unwrap().bank().n_period(), 115);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(toml::from_str::<Settings>("method = \"fft\"").is_err());
        assert!(toml::from_str::<Settings>("zeta = 0.05").is_err());
        let settings: Settings = toml::from_str("damping = [0.05, 1.2]").unwrap();
        assert!(matches!(settings.validate(), Err(IoError::Settings(_))));
        let settings: Settings = toml::from_str("periods = [-1.0]").unwrap();
        assert!(matches!(settings.validate(), Err(IoError::Settings(_))));
    }

    #[test]
    fn unordered_periods() {
        let settings = Settings {
            periods: Some(vec![1., 0.5]),
            ..Default::default()
        };
        assert!(matches!(
            settings.spectrum_builder(),
            Err(IoError::Spectrum(rsgen::SpectrumError::UnorderedPeriods { .. }))
        ));
    }

    #[test]
    fn fixed_width_files() {
        let settings: Settings =
            toml::from_str("[fixed_width]\nextension = \"dat\"\ndt = 0.005").unwrap();
        settings.validate().unwrap();
        let format = settings.fixed_width.clone().unwrap();
        assert_eq!((format.header, format.columns, format.width), (8, 8, 9));
        assert!(settings.is_supported("motions/M1.DAT"));
        assert!(settings.is_supported("motions/H1.ahl"));
        assert!(!settings.is_supported("motions/notes.txt"));
        assert!(settings.source("motions/M1.dat").is_ok());
        assert!(matches!(
            settings.source("motions/notes.txt"),
            Err(IoError::Unsupported(_))
        ));
        assert_eq!(settings.extensions(), vec!["ahl", "csv", "at2", "acc", "dat"]);

        assert!(!Settings::default().is_supported("motions/M1.txt"));
        let settings: Settings = toml::from_str("[fixed_width]\ndt = 0.0").unwrap();
        assert!(matches!(settings.validate(), Err(IoError::Settings(_))));
    }

    #[test]
    fn write_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        Settings::write_default(&path).unwrap();
        assert_eq!(Settings::from_path(&path).unwrap(), Settings::default());
        assert!(matches!(
            Settings::write_default(&path),
            Err(IoError::Create(..))
        ));
    }
}
