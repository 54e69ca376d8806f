use crate::{IoError, Result};
use rsgen::{SpectrumPoint, SpectrumSet};
use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Spectral ordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordinate {
    /// spectral displacement
    Sd,
    /// pseudo-velocity
    Sv,
    /// pseudo-acceleration
    Sa,
    /// peak absolute acceleration
    SaAbs,
}
impl Ordinate {
    pub const ALL: [Ordinate; 4] = [Ordinate::Sd, Ordinate::Sv, Ordinate::Sa, Ordinate::SaAbs];
    pub fn value(&self, point: &SpectrumPoint) -> f64 {
        match self {
            Ordinate::Sd => point.sd,
            Ordinate::Sv => point.sv,
            Ordinate::Sa => point.sa,
            Ordinate::SaAbs => point.peak_acceleration,
        }
    }
}
impl fmt::Display for Ordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ordinate::Sd => write!(f, "Sd"),
            Ordinate::Sv => write!(f, "Sv"),
            Ordinate::Sa => write!(f, "Sa"),
            Ordinate::SaAbs => write!(f, "Sa_abs"),
        }
    }
}

/// Response spectra CSV table
///
/// The table starts with the title and the notes, each on its own line,
/// followed by a blank line and the table itself.
/// The first 2 columns are the periods and the frequencies,
/// the other columns are the ordinates of each spectrum of each of the spectra sets.
pub struct SpectraTable<'a> {
    sets: &'a [SpectrumSet],
    title: Option<String>,
    notes: Vec<String>,
    ordinates: Vec<Ordinate>,
}
impl<'a> SpectraTable<'a> {
    pub fn new(sets: &'a [SpectrumSet]) -> Self {
        Self {
            sets,
            title: None,
            notes: vec![],
            ordinates: Ordinate::ALL.to_vec(),
        }
    }
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }
    /// Adds a line of notes
    pub fn note<S: Into<String>>(mut self, note: S) -> Self {
        self.notes.push(note.into());
        self
    }
    /// Sets the ordinates written for each spectrum (default: all)
    pub fn ordinates(mut self, ordinates: Vec<Ordinate>) -> Self {
        self.ordinates = ordinates;
        self
    }
    // periods common to all the spectra
    fn periods(&self) -> Result<Vec<f64>> {
        let Some(first) = self.sets.first() else {
            return Err(IoError::Mismatch("no response spectra".into()));
        };
        let periods = first.periods();
        for set in self.sets {
            for spectrum in set {
                if spectrum.periods() != periods {
                    return Err(IoError::Mismatch(format!(
                        "{} (zeta={}) periods differ from {} periods",
                        set.label(),
                        spectrum.damping,
                        first.label()
                    )));
                }
            }
        }
        Ok(periods)
    }
    /// Writes the table
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        let periods = self.periods()?;
        if let Some(title) = &self.title {
            writeln!(writer, "{title}")?;
        }
        for note in &self.notes {
            writeln!(writer, "{note}")?;
        }
        if self.title.is_some() || !self.notes.is_empty() {
            writeln!(writer)?;
        }

        let mut wtr = csv::WriterBuilder::new().from_writer(writer);
        let mut header = vec!["Period (s)".to_string(), "Frequency (Hz)".to_string()];
        for set in self.sets {
            for spectrum in set {
                for ordinate in &self.ordinates {
                    header.push(format!(
                        "{} {ordinate} (zeta={})",
                        set.label(),
                        spectrum.damping
                    ));
                }
            }
        }
        wtr.write_record(&header)?;

        for (i, period) in periods.iter().enumerate() {
            let mut row = vec![format!("{period:.6e}"), format!("{:.6e}", period.recip())];
            for set in self.sets {
                for spectrum in set {
                    for ordinate in &self.ordinates {
                        row.push(format!("{:.6e}", ordinate.value(&spectrum.points[i])));
                    }
                }
            }
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }
    /// Writes the table to a file
    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| IoError::Create(e, path.to_path_buf()))?;
        self.write(BufWriter::new(file))?;
        log::info!("response spectra written to {path:?}");
        Ok(())
    }
}
