/// Cumulative integration rules for uniformly sampled signals
///
/// The Simpson rules estimate each interval from every parabola (resp. cubic)
/// through consecutive samples that spans it, and average the estimates.
/// They fall back to the lower order rules when there are not enough samples.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Integration {
    /// Exact for signals varying linearly between samples
    #[default]
    Trapezoidal,
    /// Simpson 1/3 rule, exact for quadratics
    Simpson,
    /// Simpson 3/8 rule, exact for cubics
    Simpson38,
}

impl Integration {
    fn fallback(self, n: usize) -> Self {
        match self {
            Self::Simpson38 if n < 4 => Self::Simpson.fallback(n),
            Self::Simpson if n < 3 => Self::Trapezoidal,
            rule => rule,
        }
    }
    /// Integral of `y` over the interval `[x_k, x_k+1]`
    fn interval(self, y: &[f64], dx: f64, k: usize) -> f64 {
        let n = y.len();
        match self {
            Self::Trapezoidal => 0.5 * dx * (y[k] + y[k + 1]),
            Self::Simpson => {
                let estimates = [
                    (k + 2 < n).then(|| 5. * y[k] + 8. * y[k + 1] - y[k + 2]),
                    (k >= 1).then(|| -y[k - 1] + 8. * y[k] + 5. * y[k + 1]),
                ];
                dx * mean(&estimates) / 12.
            }
            Self::Simpson38 => {
                let estimates = [
                    (k + 3 < n).then(|| 9. * y[k] + 19. * y[k + 1] - 5. * y[k + 2] + y[k + 3]),
                    (k >= 1 && k + 2 < n)
                        .then(|| -y[k - 1] + 13. * y[k] + 13. * y[k + 1] - y[k + 2]),
                    (k >= 2).then(|| y[k - 2] - 5. * y[k - 1] + 19. * y[k] + 9. * y[k + 1]),
                ];
                dx * mean(&estimates) / 24.
            }
        }
    }
    /// Cumulative integral of `y` sampled every `dx`, starting from `initial`
    ///
    /// The integral has the same number of samples than `y`.
    pub fn cumulative(self, y: &[f64], dx: f64, initial: f64) -> Vec<f64> {
        let n = y.len();
        if n == 0 {
            return vec![];
        }
        let rule = self.fallback(n);
        let mut integral = Vec::with_capacity(n);
        integral.push(initial);
        let mut sum = initial;
        for k in 0..n - 1 {
            sum += rule.interval(y, dx, k);
            integral.push(sum);
        }
        integral
    }
}

/// Mean of the available estimates
fn mean(estimates: &[Option<f64>]) -> f64 {
    let (sum, count) = estimates
        .iter()
        .flatten()
        .fold((0f64, 0usize), |(s, c), e| (s + e, c + 1));
    sum / count as f64
}

impl std::fmt::Display for Integration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trapezoidal => write!(f, "trapezoidal"),
            Self::Simpson => write!(f, "simpson 1/3"),
            Self::Simpson38 => write!(f, "simpson 3/8"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize, dx: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * dx).collect()
    }

    fn max_error(a: &[f64], b: &[f64]) -> f64 {
        assert_eq!(a.len(), b.len());
        a.iter().zip(b).fold(0f64, |e, (a, b)| e.max((a - b).abs()))
    }

    #[test]
    fn trapezoidal_linear() {
        let x = grid(21, 0.1);
        let y: Vec<f64> = x.iter().map(|x| 2. * x + 1.).collect();
        let expected: Vec<f64> = x.iter().map(|x| x * x + x + 3.).collect();
        let integral = Integration::Trapezoidal.cumulative(&y, 0.1, 3.);
        assert!(max_error(&integral, &expected) < 1e-12);
    }

    #[test]
    fn simpson_quadratic() {
        let x = grid(11, 0.1);
        let y: Vec<f64> = x.iter().map(|x| x * x).collect();
        let expected: Vec<f64> = x.iter().map(|x| x.powi(3) / 3.).collect();
        let integral = Integration::Simpson.cumulative(&y, 0.1, 0.);
        assert!(max_error(&integral, &expected) < 1e-12);
        let trapezoidal = Integration::Trapezoidal.cumulative(&y, 0.1, 0.);
        assert!(max_error(&trapezoidal, &expected) > 1e-4);
    }

    #[test]
    fn simpson38_cubic() {
        let x = grid(9, 0.25);
        let y: Vec<f64> = x.iter().map(|x| x.powi(3) - x).collect();
        let expected: Vec<f64> = x.iter().map(|x| x.powi(4) / 4. - x * x / 2.).collect();
        let integral = Integration::Simpson38.cumulative(&y, 0.25, 0.);
        assert!(max_error(&integral, &expected) < 1e-12);
    }

    #[test]
    fn short_signals() {
        assert!(Integration::Simpson38.cumulative(&[], 0.1, 0.).is_empty());
        assert_eq!(Integration::Simpson.cumulative(&[1.], 0.1, 2.), vec![2.]);
        assert_eq!(Integration::Simpson38.cumulative(&[1., 3.], 0.5, 0.), vec![0., 1.]);
        let integral = Integration::Simpson38.cumulative(&[0., 1., 4.], 1., 0.);
        assert!(max_error(&integral, &[0., 1. / 3., 8. / 3.]) < 1e-12);
    }
}
