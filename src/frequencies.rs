//! Spectra frequency sampling
//!
//! The frequencies units is Hz

/// Frequency sampling options
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Frequencies {
    /// a single frequency
    Single(f64),
    /// logarithmic sampling of the interval `[lower,upper]` with `n` samples
    LogSpace { lower: f64, upper: f64, n: usize },
    /// regular sampling of the interval `[lower,upper]` with `n` samples
    LinSpace { lower: f64, upper: f64, n: usize },
    /// a given set of frequencies
    Set(Vec<f64>),
    /// ASME BPVC Section III Division 1, Appendix N, Table N-1226-1
    Asme,
    /// ASME frequencies up to 100Hz (100 samples) or up to 1000Hz (115 samples)
    Standard { high_frequency: bool },
}
impl Default for Frequencies {
    fn default() -> Self {
        Frequencies::Standard {
            high_frequency: false,
        }
    }
}
impl From<f64> for Frequencies {
    fn from(value: f64) -> Self {
        Frequencies::Single(value)
    }
}
impl From<Vec<f64>> for Frequencies {
    fn from(value: Vec<f64>) -> Self {
        Frequencies::Set(value)
    }
}
impl Frequencies {
    pub fn logspace(lower: f64, upper: f64, n: usize) -> Self {
        Self::LogSpace { lower, upper, n }
    }
    pub fn linspace(lower: f64, upper: f64, n: usize) -> Self {
        Self::LinSpace { lower, upper, n }
    }
    /// Returns the frequencies
    pub fn values(&self) -> Vec<f64> {
        match self {
            Frequencies::Single(nu) => vec![*nu],
            Frequencies::LogSpace { lower, upper, n } => geomspace(*lower, *upper, *n),
            Frequencies::LinSpace { lower, upper, n } => match n {
                0 => vec![],
                1 => vec![*lower],
                n => {
                    let step = (upper - lower) / (n - 1) as f64;
                    (0..*n).map(|i| lower + step * i as f64).collect()
                }
            },
            Frequencies::Set(nu) => nu.clone(),
            Frequencies::Asme => asme(),
            Frequencies::Standard { high_frequency } => standard(*high_frequency),
        }
    }
    /// Returns the periods in ascending order
    ///
    /// The period of the rigid oscillator (0s) is prepended if `rigid` is true
    pub fn periods(&self, rigid: bool) -> Vec<f64> {
        let mut periods: Vec<f64> = self.values().into_iter().map(f64::recip).collect();
        periods.sort_by(f64::total_cmp);
        if rigid {
            periods.insert(0, 0f64);
        }
        periods
    }
}

// logarithmic sampling including both ends
fn geomspace(lower: f64, upper: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![lower],
        n => {
            let log_step = (upper.log10() - lower.log10()) / (n - 1) as f64;
            (0..n)
                .map(|i| 10f64.powf(lower.log10() + log_step * i as f64))
                .collect()
        }
    }
}

fn asme() -> Vec<f64> {
    const RANGES: [(f64, f64, f64); 8] = [
        (0.1, 3., 0.1),
        (3., 3.6, 0.15),
        (3.6, 5., 0.2),
        (5., 8., 0.25),
        (8., 15., 0.5),
        (15., 18., 1.),
        (18., 22., 2.),
        (22., 34., 3.),
    ];
    let mut nu: Vec<f64> = RANGES
        .iter()
        .flat_map(|&(start, stop, step)| {
            let n = ((stop - start) / step).round() as usize;
            (0..n).map(move |i| start + step * i as f64)
        })
        .collect();
    nu.push(34.);
    nu
}

// extends the frequencies up to `upper` with `n` log spaced frequencies rounded to the Hz
fn extend_rounded(nu: &mut Vec<f64>, upper: f64, n: usize) {
    let Some(&lower) = nu.last() else {
        return;
    };
    for f in geomspace(lower, upper, n + 1).into_iter().skip(1) {
        let f = f.round();
        if nu.last().map_or(true, |&last| f > last) {
            nu.push(f);
        }
    }
}

fn standard(high_frequency: bool) -> Vec<f64> {
    let mut nu = asme();
    let n = 100 - nu.len();
    extend_rounded(&mut nu, 100., n);
    if high_frequency {
        extend_rounded(&mut nu, 1000., 15);
    }
    nu
}
