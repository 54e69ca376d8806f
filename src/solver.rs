//! SDOF oscillator response
//!
//! The relative displacement `x` of a linear oscillator with natural angular frequency `omega`
//! and damping ratio `zeta` subjected to the base acceleration `a` is solution of
//! `x'' + 2 zeta omega x' + omega^2 x = -a`.
//! The base acceleration is assumed to vary linearly between consecutive samples,
//! under this assumption the discrete state space model implemented by [Exponential] is exact.

use crate::{OscillatorSpec, Result, SpectrumError, SpectrumPoint, TimeHistory};

mod exponential;
pub use exponential::{Exponential, SERIES_ORDER, SERIES_THRESHOLD};

/// Peak values of the oscillator response
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PeakResponse {
    /// peak relative displacement
    pub displacement: f64,
    /// peak relative velocity
    pub velocity: f64,
    /// peak absolute acceleration
    pub acceleration: f64,
}

/// Discrete time solver of the equation of motion of a SDOF oscillator
pub trait Solver: Send + Sync + Sized {
    /// Creates the solver for the time step `tau`, the natural angular frequency `omega` and the damping ratio `zeta`
    fn from_second_order(tau: f64, omega: f64, zeta: f64) -> Result<Self>;
    /// Integrates the oscillator response to the base acceleration starting from rest
    fn peak_response(&self, time_history: &TimeHistory) -> PeakResponse;
}

/// Returns the peak response of the oscillator to the time history
///
/// The rigid oscillator (`T=0`) follows the ground: its relative response is zero
/// and its acceleration is the peak ground acceleration.
/// Oscillators stiffer than [QUASI_STATIC_OMEGA](crate::QUASI_STATIC_OMEGA) follow the ground
/// acceleration statically, see [quasi_static_response].
pub fn peak_response<T: Solver>(
    time_history: &TimeHistory,
    oscillator: OscillatorSpec,
) -> Result<PeakResponse> {
    time_history.validate()?;
    oscillator_response::<T>(time_history, oscillator)
}

// the time history is assumed valid
pub(crate) fn oscillator_response<T: Solver>(
    time_history: &TimeHistory,
    oscillator: OscillatorSpec,
) -> Result<PeakResponse> {
    oscillator.validate()?;
    if oscillator.is_rigid() {
        return Ok(PeakResponse {
            acceleration: time_history.peak(),
            ..Default::default()
        });
    }
    if oscillator.is_quasi_static() {
        return Ok(quasi_static_response(time_history, oscillator.omega()));
    }
    let solver = T::from_second_order(time_history.dt(), oscillator.omega(), oscillator.damping)
        .map_err(|e| with_period(e, oscillator))?;
    let peak = solver.peak_response(time_history);
    if [peak.displacement, peak.velocity, peak.acceleration]
        .iter()
        .all(|x| x.is_finite())
    {
        Ok(peak)
    } else {
        Err(SpectrumError::NumericalDegeneracy {
            period: oscillator.period,
            damping: oscillator.damping,
            dt: time_history.dt(),
            what: "peak response",
        })
    }
}

// the time history is assumed valid
pub(crate) fn oscillator_point<T: Solver>(
    time_history: &TimeHistory,
    oscillator: OscillatorSpec,
) -> Result<SpectrumPoint> {
    let point = SpectrumPoint::new(oscillator, oscillator_response::<T>(time_history, oscillator)?);
    if [point.sd, point.sv, point.sa, point.peak_velocity, point.peak_acceleration]
        .iter()
        .all(|x| x.is_finite())
    {
        Ok(point)
    } else {
        Err(SpectrumError::NumericalDegeneracy {
            period: oscillator.period,
            damping: oscillator.damping,
            dt: time_history.dt(),
            what: "spectral ordinates",
        })
    }
}

/// Peak response of an oscillator following the base acceleration statically
///
/// With `x = -a/omega^2` and `x' = -a'/omega^2`, the absolute acceleration is the base acceleration.
/// As for the dynamic response, the peaks are taken from the 2nd sample onward.
pub fn quasi_static_response(time_history: &TimeHistory, omega: f64) -> PeakResponse {
    let tau_omega = time_history.dt() * omega;
    time_history
        .intervals()
        .fold(PeakResponse::default(), |peak, (a0, a1)| PeakResponse {
            displacement: peak.displacement.max(a1.abs() / omega / omega),
            velocity: peak.velocity.max((a1 - a0).abs() / tau_omega / omega),
            acceleration: peak.acceleration.max(a1.abs()),
        })
}

/// Peak update that keeps a NaN once it shows up
pub(crate) fn max_abs(peak: f64, x: f64) -> f64 {
    if x.is_nan() || x.abs() > peak {
        x.abs()
    } else {
        peak
    }
}

/// Returns the peak relative displacement of the oscillator to the time history
pub fn peak_displacement(time_history: &TimeHistory, oscillator: OscillatorSpec) -> Result<f64> {
    peak_response::<Exponential>(time_history, oscillator).map(|peak| peak.displacement)
}

// solvers only know about omega, the period is restored here
fn with_period(e: SpectrumError, oscillator: OscillatorSpec) -> SpectrumError {
    match e {
        SpectrumError::NumericalDegeneracy { dt, what, .. } => SpectrumError::NumericalDegeneracy {
            period: oscillator.period,
            damping: oscillator.damping,
            dt,
            what,
        },
        e => e,
    }
}
