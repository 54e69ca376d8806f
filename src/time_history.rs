use crate::{Integration, Result, SpectrumError};

/// Uniformly sampled ground acceleration record
///
/// The samples can be given in any consistent acceleration unit,
/// the spectral ordinates inherit that unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TimeHistory {
    name: Option<String>,
    dt: f64,
    samples: Vec<f64>,
}

impl TimeHistory {
    /// Creates a new time history from acceleration `samples` with a time step `dt` in seconds
    ///
    /// Fails if `dt` is not strictly positive, if there is less than 2 samples
    /// or if any sample is not finite
    pub fn new(samples: Vec<f64>, dt: f64) -> Result<Self> {
        let this = Self {
            name: None,
            dt,
            samples,
        };
        this.validate()?;
        Ok(this)
    }
    /// Sets the time history name
    pub fn with_name<S: Into<String>>(self, name: S) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }
    /// Checks the time history invariants
    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0f64) {
            return Err(SpectrumError::InvalidTimeHistory(format!(
                "time step must be strictly positive, found {}",
                self.dt
            )));
        }
        if self.samples.len() < 2 {
            return Err(SpectrumError::InvalidTimeHistory(format!(
                "at least 2 samples are required, found {}",
                self.samples.len()
            )));
        }
        if let Some((i, a)) = self
            .samples
            .iter()
            .enumerate()
            .find(|(_, a)| !a.is_finite())
        {
            return Err(SpectrumError::InvalidTimeHistory(format!(
                "sample #{i} is not finite ({a})"
            )));
        }
        Ok(())
    }
    /// Returns the time history name or `"unnamed"`
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
    /// Time history name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    /// Time step in seconds
    pub fn dt(&self) -> f64 {
        self.dt
    }
    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
    /// Record duration in seconds
    pub fn duration(&self) -> f64 {
        self.dt * self.samples.len().saturating_sub(1) as f64
    }
    /// Peak absolute acceleration
    pub fn peak(&self) -> f64 {
        peak(&self.samples)
    }
    /// Ground velocity, at rest at the start of the record
    pub fn velocity(&self, rule: Integration) -> Vec<f64> {
        rule.cumulative(&self.samples, self.dt, 0f64)
    }
    /// Ground displacement, at rest at the start of the record
    pub fn displacement(&self, rule: Integration) -> Vec<f64> {
        rule.cumulative(&self.velocity(rule), self.dt, 0f64)
    }
    /// Peak absolute ground velocity with the trapezoidal rule
    pub fn peak_velocity(&self) -> f64 {
        peak(&self.velocity(Integration::Trapezoidal))
    }
    /// Peak absolute ground displacement with the trapezoidal rule
    pub fn peak_displacement(&self) -> f64 {
        peak(&self.displacement(Integration::Trapezoidal))
    }
    /// Iterator over consecutive pairs of samples `(a_i, a_i+1)`
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.windows(2).map(|w| (w[0], w[1]))
    }
}

fn peak(values: &[f64]) -> f64 {
    values.iter().fold(0f64, |m, a| m.max(a.abs()))
}

impl std::fmt::Display for TimeHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} samples @ {}s ({:.3}s), PGA={:.4e}",
            self.label(),
            self.len(),
            self.dt,
            self.duration(),
            self.peak()
        )
    }
}
