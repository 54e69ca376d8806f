use crate::{Result, SpectrumError};
use std::f64::consts::PI;

/// Angular frequency above which the oscillator follows the base acceleration statically
///
/// Beyond it `omega^2` runs out of the `f64` range and the relative displacement
/// is `x = -a/omega^2`.
pub const QUASI_STATIC_OMEGA: f64 = 1e150;

/// Linear viscously damped single degree of freedom oscillator
///
/// A period of 0 stands for the rigid oscillator.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorSpec {
    /// natural period in seconds
    pub period: f64,
    /// fraction of critical damping
    pub damping: f64,
}

impl OscillatorSpec {
    pub fn new(period: f64, damping: f64) -> Self {
        Self { period, damping }
    }
    /// Checks that `T>=0` and `0<=zeta<1`
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| SpectrumError::InvalidOscillator {
            period: self.period,
            damping: self.damping,
            reason: reason.to_string(),
        };
        if !self.period.is_finite() || self.period < 0f64 {
            return Err(invalid("the period must be a finite positive number"));
        }
        if !(0f64..1f64).contains(&self.damping) {
            return Err(invalid(
                "the damping ratio must be in [0,1) (sub-critical damping only)",
            ));
        }
        Ok(())
    }
    pub fn is_rigid(&self) -> bool {
        self.period == 0f64
    }
    /// True for a non-rigid oscillator with `omega` larger than [QUASI_STATIC_OMEGA]
    pub fn is_quasi_static(&self) -> bool {
        !self.is_rigid() && self.omega() > QUASI_STATIC_OMEGA
    }
    /// Natural angular frequency `2pi/T` in rd/s, infinite for the rigid oscillator
    pub fn omega(&self) -> f64 {
        if self.is_rigid() {
            f64::INFINITY
        } else {
            2. * PI / self.period
        }
    }
    /// Damped angular frequency `omega sqrt(1-zeta^2)` in rd/s
    pub fn damped_omega(&self) -> f64 {
        self.omega() * (1f64 - self.damping * self.damping).sqrt()
    }
    /// Natural frequency in Hz
    pub fn frequency(&self) -> f64 {
        self.period.recip()
    }
}

/// Periods and damping ratios grid
///
/// The grid entries are enumerated damping ratio first, then period
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorBank {
    periods: Vec<f64>,
    dampings: Vec<f64>,
}

impl OscillatorBank {
    /// Creates a new grid of oscillators
    ///
    /// The periods must be strictly increasing, neither the periods or the damping ratios can be empty.
    /// The values themselves are checked by the solver for each oscillator.
    pub fn new(periods: Vec<f64>, dampings: Vec<f64>) -> Result<Self> {
        if periods.is_empty() {
            return Err(SpectrumError::EmptyGrid("periods"));
        }
        if dampings.is_empty() {
            return Err(SpectrumError::EmptyGrid("damping ratios"));
        }
        if let Some((index, w)) = periods
            .windows(2)
            .enumerate()
            .find(|(_, w)| !(w[1] > w[0]))
        {
            return Err(SpectrumError::UnorderedPeriods {
                index: index + 1,
                previous: w[0],
                period: w[1],
            });
        }
        Ok(Self { periods, dampings })
    }
    pub fn periods(&self) -> &[f64] {
        &self.periods
    }
    pub fn dampings(&self) -> &[f64] {
        &self.dampings
    }
    pub fn n_period(&self) -> usize {
        self.periods.len()
    }
    pub fn n_damping(&self) -> usize {
        self.dampings.len()
    }
    /// Total number of oscillators
    pub fn len(&self) -> usize {
        self.n_period() * self.n_damping()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the oscillator at the flat index `k`
    pub fn get(&self, k: usize) -> Option<OscillatorSpec> {
        let n = self.n_period();
        let (i, j) = (k / n, k % n);
        self.dampings
            .get(i)
            .map(|&damping| OscillatorSpec::new(self.periods[j], damping))
    }
    /// Iterator over all the oscillators
    pub fn iter(&self) -> impl Iterator<Item = OscillatorSpec> + '_ {
        self.dampings.iter().flat_map(move |&damping| {
            self.periods
                .iter()
                .map(move |&period| OscillatorSpec::new(period, damping))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid() {
        assert_eq!(
            OscillatorBank::new(vec![], vec![0.05]),
            Err(SpectrumError::EmptyGrid("periods"))
        );
        assert_eq!(
            OscillatorBank::new(vec![0.1, 1.], vec![]),
            Err(SpectrumError::EmptyGrid("damping ratios"))
        );
    }

    #[test]
    fn unordered_periods() {
        let err = OscillatorBank::new(vec![0., 0.1, 0.1, 1.], vec![0.05]).unwrap_err();
        assert!(matches!(
            err,
            SpectrumError::UnorderedPeriods { index: 2, .. }
        ));
        assert!(OscillatorBank::new(vec![0.1, f64::NAN], vec![0.05]).is_err());
    }

    #[test]
    fn enumeration() {
        let bank = OscillatorBank::new(vec![0., 0.5, 1.], vec![0.02, 0.05]).unwrap();
        assert_eq!(bank.len(), 6);
        let oscs: Vec<_> = bank.iter().collect();
        assert_eq!(oscs[0], OscillatorSpec::new(0., 0.02));
        assert_eq!(oscs[4], OscillatorSpec::new(0.5, 0.05));
        assert_eq!(bank.get(4), Some(oscs[4]));
        assert_eq!(bank.get(6), None);
    }

    #[test]
    fn oscillator_validation() {
        assert!(OscillatorSpec::new(1., 0.).validate().is_ok());
        assert!(OscillatorSpec::new(0., 0.5).validate().is_ok());
        assert!(OscillatorSpec::new(-1., 0.05).validate().is_err());
        assert!(OscillatorSpec::new(1., 1.).validate().is_err());
        assert!(OscillatorSpec::new(1., -0.01).validate().is_err());
        assert!(OscillatorSpec::new(f64::INFINITY, 0.05).validate().is_err());
    }

    #[test]
    fn omega() {
        let osc = OscillatorSpec::new(0.5, 0.);
        assert!((osc.omega() - 4. * PI).abs() < 1e-12);
        assert_eq!(osc.damped_omega(), osc.omega());
        assert!(OscillatorSpec::new(0., 0.05).omega().is_infinite());
    }
}
