/*!
# rsgen

Earthquake engineering response spectra.

A response spectrum is the peak response of linear single degree of freedom (SDOF) oscillators,
with natural periods `T` and damping ratios `zeta`, subjected to a base acceleration [TimeHistory].
For each oscillator, the spectral displacement `Sd` is the peak relative displacement,
the pseudo-velocity is `Sv = omega Sd` and the pseudo-acceleration is `Sa = omega^2 Sd`, with `omega=2pi/T`.

The oscillators response is computed with the [Exponential] solver,
an exact recursion for base accelerations varying linearly between samples,
that is stable for any ratio between the oscillator period and the sampling time step.

The oscillators of an [OscillatorBank] are independent from each other, the [SpectrumBuilder]
solves them concurrently and assembles the results into a [SpectrumSet].

# Example
```
use rsgen::{Frequencies, SpectrumBuilder, TimeHistory};

# fn main() -> rsgen::Result<()> {
let dt = 0.005;
let samples: Vec<f64> = (0..2000)
    .map(|i| (2. * std::f64::consts::PI * 2.5 * i as f64 * dt).sin())
    .collect();
let th = TimeHistory::new(samples, dt)?.with_name("2.5Hz sine");
let spectra = SpectrumBuilder::from_frequencies(Frequencies::default(), true, vec![0.05])?
    .build(&th)?;
let peak = spectra.get(0.05).and_then(|s| s.peak_sa()).unwrap();
assert!((peak.frequency() - 2.5).abs() < 0.3);
# Ok(())
# }
```
*/

mod error;
pub use error::{Result, SpectrumError};
mod integration;
pub use integration::Integration;
mod time_history;
pub use time_history::TimeHistory;
mod oscillator;
pub use oscillator::{OscillatorBank, OscillatorSpec, QUASI_STATIC_OMEGA};
pub mod solver;
pub use solver::{peak_displacement, peak_response, Exponential, PeakResponse, Solver};
mod frequencies;
pub use frequencies::Frequencies;
mod spectrum;
pub use spectrum::{Spectrum, SpectrumPoint, SpectrumSet};
mod builder;
pub use builder::SpectrumBuilder;
