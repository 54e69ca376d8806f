use crate::{
    solver::{self, Exponential, Solver},
    Frequencies, OscillatorBank, OscillatorSpec, Result, Spectrum, SpectrumPoint, SpectrumSet,
    TimeHistory,
};
use rayon::prelude::*;
use std::{fmt, marker::PhantomData, time::Instant};

/// Response spectra builder
///
/// The builder holds the grid of oscillators and computes the [SpectrumSet] of a [TimeHistory].
/// All the oscillators are solved concurrently.
///
/// # Example
/// ```
/// use rsgen::{SpectrumBuilder, TimeHistory};
///
/// # fn main() -> rsgen::Result<()> {
/// let th = TimeHistory::new(vec![0., 0.1, -0.2, 0.05, 0.], 0.01)?;
/// let spectra = SpectrumBuilder::new(vec![0., 0.1, 0.5, 1.], vec![0.02, 0.05])?.build(&th)?;
/// assert_eq!(spectra.len(), 2);
/// assert_eq!(spectra.get(0.05).unwrap().len(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumBuilder<T: Solver = Exponential> {
    bank: OscillatorBank,
    solver: PhantomData<T>,
}

impl SpectrumBuilder {
    /// Creates a builder for the given periods `[s]` and damping ratios
    pub fn new(periods: Vec<f64>, dampings: Vec<f64>) -> Result<Self> {
        OscillatorBank::new(periods, dampings).map(Self::from)
    }
    /// Creates a builder for the periods of given frequencies
    ///
    /// The rigid oscillator (`T=0`) is included if `rigid` is true
    pub fn from_frequencies<F: Into<Frequencies>>(
        frequencies: F,
        rigid: bool,
        dampings: Vec<f64>,
    ) -> Result<Self> {
        Self::new(frequencies.into().periods(rigid), dampings)
    }
}

impl<T: Solver> From<OscillatorBank> for SpectrumBuilder<T> {
    fn from(bank: OscillatorBank) -> Self {
        Self {
            bank,
            solver: PhantomData,
        }
    }
}

impl<T: Solver> SpectrumBuilder<T> {
    pub fn bank(&self) -> &OscillatorBank {
        &self.bank
    }
    /// Computes the response spectra of a time history
    ///
    /// The computation stops at the first oscillator that fails
    pub fn build(&self, time_history: &TimeHistory) -> Result<SpectrumSet> {
        let label = time_history.label();
        time_history.validate().map_err(|e| e.in_record(label))?;
        let now = Instant::now();
        let oscillators: Vec<OscillatorSpec> = self.bank.iter().collect();
        let points = oscillators
            .into_par_iter()
            .map(|oscillator| {
                solver::oscillator_point::<T>(time_history, oscillator)
            })
            .collect::<Result<Vec<SpectrumPoint>>>()
            .map_err(|e| e.in_record(label))?;
        let spectra: Vec<Spectrum> = points
            .chunks(self.bank.n_period())
            .zip(self.bank.dampings())
            .map(|(points, &damping)| Spectrum {
                damping,
                points: points.to_vec(),
            })
            .collect();
        log::debug!(
            "{label}: {} oscillators solved in {}ms",
            self.bank.len(),
            now.elapsed().as_millis()
        );
        Ok(SpectrumSet {
            name: time_history.name().map(|s| s.to_string()),
            dt: time_history.dt(),
            spectra,
        })
    }
    /// Computes concurrently the response spectra of several time histories
    ///
    /// A failing time history does not prevent the others to be processed
    pub fn build_all(&self, time_histories: &[TimeHistory]) -> Vec<Result<SpectrumSet>> {
        time_histories
            .par_iter()
            .map(|time_history| self.build(time_history))
            .collect()
    }
}

impl<T: Solver> fmt::Display for SpectrumBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let periods = self.bank.periods();
        write!(
            f,
            "SpectrumBuilder: {} periods in [{}, {}]s x damping ratios {:?}",
            periods.len(),
            periods.first().copied().unwrap_or_default(),
            periods.last().copied().unwrap_or_default(),
            self.bank.dampings()
        )
    }
}
