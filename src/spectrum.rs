use crate::{OscillatorSpec, PeakResponse};
use std::fmt;

/// Response spectra ordinates at a given period
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SpectrumPoint {
    /// period [s]
    pub period: f64,
    /// spectral displacement: peak relative displacement
    pub sd: f64,
    /// pseudo-velocity: `omega Sd`
    pub sv: f64,
    /// pseudo-acceleration: `omega^2 Sd`
    pub sa: f64,
    /// peak relative velocity
    pub peak_velocity: f64,
    /// peak absolute acceleration
    pub peak_acceleration: f64,
}

impl SpectrumPoint {
    /// Derives the spectral ordinates from the oscillator peak response
    pub fn new(oscillator: OscillatorSpec, peak: PeakResponse) -> Self {
        if oscillator.is_rigid() {
            return Self {
                period: 0f64,
                sa: peak.acceleration,
                peak_acceleration: peak.acceleration,
                ..Default::default()
            };
        }
        let omega = oscillator.omega();
        let sd = peak.displacement;
        if oscillator.is_quasi_static() {
            // omega^2 Sd tends to the peak ground acceleration
            return Self {
                period: oscillator.period,
                sd,
                sv: peak.acceleration / omega,
                sa: peak.acceleration,
                peak_velocity: peak.velocity,
                peak_acceleration: peak.acceleration,
            };
        }
        Self {
            period: oscillator.period,
            sd,
            sv: omega * sd,
            sa: omega * omega * sd,
            peak_velocity: peak.velocity,
            peak_acceleration: peak.acceleration,
        }
    }
    /// Frequency [Hz], infinite for the rigid oscillator
    pub fn frequency(&self) -> f64 {
        self.period.recip()
    }
}

/// Response spectrum for a given damping ratio
///
/// The points are sorted in ascending period order
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub damping: f64,
    pub points: Vec<SpectrumPoint>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &SpectrumPoint> {
        self.points.iter()
    }
    pub fn periods(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.period).collect()
    }
    pub fn sd(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.sd).collect()
    }
    pub fn sv(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.sv).collect()
    }
    pub fn sa(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.sa).collect()
    }
    /// Returns the point with the largest pseudo-acceleration
    pub fn peak_sa(&self) -> Option<&SpectrumPoint> {
        self.points
            .iter()
            .max_by(|a, b| a.sa.total_cmp(&b.sa))
    }
}

/// Response spectra of a time history, one [Spectrum] per damping ratio
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumSet {
    /// time history name
    pub name: Option<String>,
    /// time history sampling time step [s]
    pub dt: f64,
    /// spectra in the damping ratios order they were requested
    pub spectra: Vec<Spectrum>,
}

impl SpectrumSet {
    /// Returns the spectrum for the given damping ratio
    pub fn get(&self, damping: f64) -> Option<&Spectrum> {
        self.spectra.iter().find(|s| s.damping == damping)
    }
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
    pub fn dampings(&self) -> Vec<f64> {
        self.spectra.iter().map(|s| s.damping).collect()
    }
    /// Spectra periods, identical for all the damping ratios
    pub fn periods(&self) -> Vec<f64> {
        self.spectra
            .first()
            .map(|s| s.periods())
            .unwrap_or_default()
    }
    pub fn len(&self) -> usize {
        self.spectra.len()
    }
    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Spectrum> {
        self.spectra.iter()
    }
}

impl<'a> IntoIterator for &'a SpectrumSet {
    type Item = &'a Spectrum;
    type IntoIter = std::slice::Iter<'a, Spectrum>;
    fn into_iter(self) -> Self::IntoIter {
        self.spectra.iter()
    }
}

impl fmt::Display for SpectrumSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} response spectra (dt={}s):", self.label(), self.dt)?;
        for spectrum in &self.spectra {
            match spectrum.peak_sa() {
                Some(p) => writeln!(
                    f,
                    " - zeta={:.3}: {} periods, peak Sa={:.4e} @ {:.3}s",
                    spectrum.damping,
                    spectrum.len(),
                    p.sa,
                    p.period
                )?,
                None => writeln!(f, " - zeta={:.3}: empty", spectrum.damping)?,
            }
        }
        Ok(())
    }
}
