//! # Piecewise exact discrete state space model
//!
//! With the state `z=[x,x']` the equation of motion reads `z' = F z + G a` with
//! `F = [[0,1],[-omega^2,-2 zeta omega]]` and `G = [0,-1]`.
//! For an acceleration varying linearly from `a_i` to `a_i+1` over the time step `tau`,
//! the state at the end of the step is
//! `z_i+1 = A z_i + B [a_i,a_i+1]` with
//!  * `A = exp(F tau)`,
//!  * `B = [Gamma_0 - Gamma_1, Gamma_1]`,
//!  * `Gamma_0 = tau phi_1(F tau) G`, `Gamma_1 = tau phi_2(F tau) G`,
//!
//! where `phi_1(X) = X^-1 (exp(X) - I)` and `phi_2(X) = X^-1 (phi_1(X) - I)`.
//!
//! The closed form of `A` (Nigam & Jennings, 1969) is used from which `Gamma_0` and `Gamma_1`
//! are derived with `F^-1`.
//! For `omega tau` smaller than [SERIES_THRESHOLD] the terms `A - I` and `Gamma_0/tau - G`
//! are computed with a relative error growing like `1/(omega tau)^2`,
//! in that case the 3 matrix functions are evaluated with their Taylor series
//! `phi_k(X) = sum_j X^j/(j+k)!` truncated after [SERIES_ORDER].

use super::{max_abs, PeakResponse, Solver};
use crate::{Result, SpectrumError, TimeHistory};
use nalgebra::{Matrix2, Vector2};
use std::f64::consts::PI;

/// Value of `omega tau` below which the coefficients are computed with Taylor series
///
/// At the threshold, the closed form loses about 3 significant digits
/// and the series truncation error is below `(2 x 0.05)^13/13! ~ 1e-23`.
pub const SERIES_THRESHOLD: f64 = 0.05;
/// Highest power of `F tau` retained in the Taylor series
pub const SERIES_ORDER: usize = 12;

/// Exact discretization of a SDOF oscillator for piecewise linear excitation
#[derive(Debug, Clone, PartialEq)]
pub struct Exponential {
    /// sampling time step [s]
    pub tau: f64,
    /// natural angular frequency [rd/s]
    pub omega: f64,
    /// damping ratio
    pub zeta: f64,
    /// state transition matrix
    pub a: Matrix2<f64>,
    /// input matrix
    pub b: Matrix2<f64>,
}

impl Exponential {
    /// `omega tau`: the oscillator angular sampling step
    pub fn omega_tau(&self) -> f64 {
        self.omega * self.tau
    }
    fn closed_form(tau: f64, omega: f64, zeta: f64) -> (Matrix2<f64>, Matrix2<f64>) {
        let zs = (1f64 - zeta * zeta).sqrt();
        let omegad = omega * zs;
        let e = (-zeta * omega * tau).exp();
        let (s, c) = (omegad * tau).sin_cos();
        let a = Matrix2::new(
            e * (c + s * zeta / zs),
            e * s / omegad,
            -e * s * omega / zs,
            e * (c - s * zeta / zs),
        );
        let f_inv = Matrix2::new(-2. * zeta / omega, -(omega * omega).recip(), 1., 0.);
        let g = Vector2::new(0., -1.);
        let gamma_0 = f_inv * (a - Matrix2::identity()) * g;
        let gamma_1 = f_inv * (gamma_0 / tau - g);
        (a, Matrix2::from_columns(&[gamma_0 - gamma_1, gamma_1]))
    }
    fn series(tau: f64, omega: f64, zeta: f64) -> (Matrix2<f64>, Matrix2<f64>) {
        let x = Matrix2::new(0., tau, -omega * omega * tau, -2. * zeta * omega * tau);
        // X^j/j!
        let mut term = Matrix2::<f64>::identity();
        let mut phi = [Matrix2::<f64>::zeros(); 3];
        for j in 0..=SERIES_ORDER {
            let k1 = (j + 1) as f64;
            let k2 = k1 * (j + 2) as f64;
            phi[0] += term;
            phi[1] += term / k1;
            phi[2] += term / k2;
            term = term * x / k1;
        }
        let g = Vector2::new(0., -1.);
        let gamma_0 = phi[1] * g * tau;
        let gamma_1 = phi[2] * g * tau;
        (phi[0], Matrix2::from_columns(&[gamma_0 - gamma_1, gamma_1]))
    }
}

impl Solver for Exponential {
    fn from_second_order(tau: f64, omega: f64, zeta: f64) -> Result<Self> {
        let degenerate = |what| SpectrumError::NumericalDegeneracy {
            period: 2. * PI / omega,
            damping: zeta,
            dt: tau,
            what,
        };
        if !(omega.is_finite() && omega > 0f64 && tau.is_finite() && tau > 0f64) {
            return Err(degenerate("omega tau"));
        }
        let omega_tau = omega * tau;
        let (a, b) = if omega_tau < SERIES_THRESHOLD {
            log::trace!("omega tau = {omega_tau:.3e}: series expansion of the coefficients");
            Self::series(tau, omega, zeta)
        } else {
            Self::closed_form(tau, omega, zeta)
        };
        if a.iter().any(|x| !x.is_finite()) {
            return Err(degenerate("state transition matrix"));
        }
        if b.iter().any(|x| !x.is_finite()) {
            return Err(degenerate("input matrix"));
        }
        Ok(Self {
            tau,
            omega,
            zeta,
            a,
            b,
        })
    }

    fn peak_response(&self, time_history: &TimeHistory) -> PeakResponse {
        let omega2 = self.omega * self.omega;
        let two_zeta_omega = 2. * self.zeta * self.omega;
        let mut peak = PeakResponse::default();
        // at rest when the record starts
        let mut z = Vector2::<f64>::zeros();
        for (a0, a1) in time_history.intervals() {
            z = self.a * z + self.b * Vector2::new(a0, a1);
            let (x, v) = (z[0], z[1]);
            peak.displacement = max_abs(peak.displacement, x);
            peak.velocity = max_abs(peak.velocity, v);
            peak.acceleration = max_abs(peak.acceleration, omega2 * x + two_zeta_omega * v);
        }
        peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_err(a: f64, b: f64) -> f64 {
        (a - b).abs() / b.abs().max(f64::MIN_POSITIVE)
    }

    fn max_rel_err(a: &Matrix2<f64>, b: &Matrix2<f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(a, b)| (a - b).abs() / b.abs().max(1e-300))
            .fold(0f64, f64::max)
    }

    #[test]
    fn closed_form_vs_series() {
        for zeta in [0., 0.02, 0.05, 0.2, 0.7] {
            for omega_tau in [0.5 * SERIES_THRESHOLD, SERIES_THRESHOLD, 2. * SERIES_THRESHOLD] {
                let tau = 0.01;
                let omega = omega_tau / tau;
                let (a_cf, b_cf) = Exponential::closed_form(tau, omega, zeta);
                let (a_s, b_s) = Exponential::series(tau, omega, zeta);
                let ea = max_rel_err(&a_cf, &a_s);
                let eb = max_rel_err(&b_cf, &b_s);
                assert!(ea < 1e-10, "A: {ea:e} (zeta={zeta}, omega tau={omega_tau})");
                assert!(eb < 1e-9, "B: {eb:e} (zeta={zeta}, omega tau={omega_tau})");
            }
        }
    }

    #[test]
    fn transition_matrix_determinant() {
        // det(exp(F tau)) = exp(trace(F) tau)
        for omega_tau in [1e-6, 1e-3, 0.04, 0.06, 1., 50.] {
            let tau = 0.005;
            let omega = omega_tau / tau;
            let zeta = 0.05;
            let ss = Exponential::from_second_order(tau, omega, zeta).unwrap();
            let det = ss.a.determinant();
            let expected = (-2. * zeta * omega_tau).exp();
            assert!(rel_err(det, expected) < 1e-11, "{omega_tau}: {det} vs {expected}");
        }
    }

    #[test]
    fn constant_input_is_static_gain() {
        // a constant input held for a long time leads to x=-a/omega^2
        let (tau, omega, zeta) = (0.01, 2. * PI, 0.3);
        let ss = Exponential::from_second_order(tau, omega, zeta).unwrap();
        let mut z = Vector2::zeros();
        for _ in 0..10_000 {
            z = ss.a * z + ss.b * Vector2::new(1., 1.);
        }
        assert!(rel_err(z[0], -1. / (omega * omega)) < 1e-10);
        assert!(z[1].abs() < 1e-10);
    }

    #[test]
    fn undamped_step_response() {
        // x(t) = -(1-cos(omega t))/omega^2, peak 2/omega^2 at t=T/2
        let period = 1.;
        let omega = 2. * PI / period;
        let tau = period / 200.;
        let th = TimeHistory::new(vec![1.; 301], tau).unwrap();
        let ss = Exponential::from_second_order(tau, omega, 0.).unwrap();
        let peak = ss.peak_response(&th);
        assert!(rel_err(peak.displacement, 2. / (omega * omega)) < 1e-10);
        assert!(rel_err(peak.velocity, 1. / omega) < 1e-4);
    }

    #[test]
    fn long_period_series_branch() {
        let period = 1000.;
        let omega = 2. * PI / period;
        let tau = 0.01;
        let th = TimeHistory::new(vec![1.; 101], tau).unwrap();
        let ss = Exponential::from_second_order(tau, omega, 0.).unwrap();
        assert!(ss.omega_tau() < SERIES_THRESHOLD);
        let peak = ss.peak_response(&th);
        let t = 1.;
        let expected = 2. * (0.5 * omega * t).sin().powi(2) / (omega * omega);
        assert!(
            rel_err(peak.displacement, expected) < 1e-9,
            "{} vs {}",
            peak.displacement,
            expected
        );
    }

    #[test]
    fn short_period() {
        // T << dt: bounded by twice the static response
        let period = 1e-3;
        let omega = 2. * PI / period;
        let tau = 0.01;
        let samples: Vec<f64> = (0..500).map(|i| (i as f64 * 0.05).sin()).collect();
        let th = TimeHistory::new(samples, tau).unwrap();
        for zeta in [0., 0.05] {
            let ss = Exponential::from_second_order(tau, omega, zeta).unwrap();
            let peak = ss.peak_response(&th);
            assert!(peak.displacement.is_finite());
            assert!(peak.displacement <= 2. / (omega * omega) * (1. + 1e-9));
        }
    }

    #[test]
    fn invalid_omega_tau() {
        assert!(Exponential::from_second_order(0., 1., 0.05).is_err());
        assert!(Exponential::from_second_order(0.01, f64::INFINITY, 0.05).is_err());
    }
}
