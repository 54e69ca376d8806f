#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpectrumError {
    #[error("invalid time history: {0}")]
    InvalidTimeHistory(String),
    #[error("invalid oscillator (T={period}s, zeta={damping}): {reason}")]
    InvalidOscillator {
        period: f64,
        damping: f64,
        reason: String,
    },
    #[error("empty grid: no {0} configured")]
    EmptyGrid(&'static str),
    #[error("periods must be strictly increasing: {period}s found at #{index} after {previous}s")]
    UnorderedPeriods {
        index: usize,
        previous: f64,
        period: f64,
    },
    #[error("numerical degeneracy (T={period}s, zeta={damping}, dt={dt}s): {what} is not finite")]
    NumericalDegeneracy {
        period: f64,
        damping: f64,
        dt: f64,
        what: &'static str,
    },
    #[error("time history {name:?} failed")]
    Record {
        name: String,
        #[source]
        source: Box<SpectrumError>,
    },
}

pub type Result<T> = std::result::Result<T, SpectrumError>;

impl SpectrumError {
    /// Wraps the error with the name of the time history it originates from
    pub fn in_record<S: Into<String>>(self, name: S) -> Self {
        SpectrumError::Record {
            name: name.into(),
            source: Box::new(self),
        }
    }
    /// Returns the innermost error, skipping the record context
    pub fn root(&self) -> &SpectrumError {
        match self {
            SpectrumError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}
