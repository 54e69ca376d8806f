use rsgen::{
    peak_displacement, peak_response, Exponential, OscillatorSpec, SpectrumBuilder, SpectrumError,
    TimeHistory,
};
use std::f64::consts::PI;

fn sine(frequency: f64, dt: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (2. * PI * frequency * i as f64 * dt).sin())
        .collect()
}

fn rel_err(a: f64, b: f64) -> f64 {
    (a - b).abs() / b.abs()
}

#[test]
fn zero_record_zero_spectra() {
    let th = TimeHistory::new(vec![0f64; 500], 0.01).unwrap();
    let set = SpectrumBuilder::new(vec![0., 0.01, 0.1, 1., 10., 100.], vec![0., 0.05, 0.5])
        .unwrap()
        .build(&th)
        .unwrap();
    for spectrum in &set {
        for p in spectrum.iter() {
            assert_eq!(
                (p.sd, p.sv, p.sa, p.peak_velocity, p.peak_acceleration),
                (0., 0., 0., 0., 0.)
            );
        }
    }
}

#[test]
fn undamped_resonance_grows() {
    let period = 0.5;
    let dt = period / 100.;
    let osc = OscillatorSpec::new(period, 0.);
    let sd: Vec<f64> = [2, 4, 8, 16, 32]
        .into_iter()
        .map(|n_cycle| {
            let th = TimeHistory::new(sine(1. / period, dt, n_cycle * 100 + 1), dt).unwrap();
            peak_displacement(&th, osc).unwrap()
        })
        .collect();
    assert!(sd.windows(2).all(|w| w[1] > w[0]), "{sd:?}");
    // the envelope grows linearly with time
    assert!(sd[4] / sd[3] > 1.8, "{sd:?}");
}

#[test]
fn undamped_vs_lightly_damped() {
    let dt = 0.01;
    let th = TimeHistory::new(sine(1.3, dt, 1000), dt).unwrap();
    for period in [0.05, 0.4, 1., 3., 20., 500.] {
        let sd_0 = peak_displacement(&th, OscillatorSpec::new(period, 0.)).unwrap();
        let sd_1 = peak_displacement(&th, OscillatorSpec::new(period, 1e-6)).unwrap();
        assert!(rel_err(sd_1, sd_0) < 5e-3, "T={period}: {sd_0} vs {sd_1}");
    }
}

#[test]
fn rigid_oscillator() {
    let dt = 0.02;
    let th = TimeHistory::new(vec![0.1, -0.7, 0.3, 0.65, -0.2], dt).unwrap();
    let set = SpectrumBuilder::new(vec![0., 1.], vec![0., 0.05, 0.3, 0.99])
        .unwrap()
        .build(&th)
        .unwrap();
    for spectrum in &set {
        let p = spectrum.points[0];
        assert_eq!((p.period, p.sd, p.sv), (0., 0., 0.));
        assert_eq!(p.sa, 0.7);
    }
}

#[test]
fn idempotence() {
    let dt = 0.005;
    let th = TimeHistory::new(sine(3.7, dt, 3000), dt).unwrap();
    let osc = OscillatorSpec::new(0.27, 0.05);
    let a = peak_response::<Exponential>(&th, osc).unwrap();
    let b = peak_response::<Exponential>(&th, osc).unwrap();
    assert_eq!(a.displacement.to_bits(), b.displacement.to_bits());
    assert_eq!(a.velocity.to_bits(), b.velocity.to_bits());
    assert_eq!(a.acceleration.to_bits(), b.acceleration.to_bits());

    let builder = SpectrumBuilder::new(rsgen::Frequencies::default().periods(true), vec![0.02, 0.05])
        .unwrap();
    assert_eq!(builder.build(&th).unwrap(), builder.build(&th).unwrap());
}

#[test]
fn periods_order_is_preserved() {
    let dt = 0.01;
    let th = TimeHistory::new(sine(2., dt, 800), dt).unwrap();
    let periods: Vec<f64> = (0..257).map(|i| i as f64 * 0.02).collect();
    let set = SpectrumBuilder::new(periods.clone(), vec![0.05, 0.1])
        .unwrap()
        .build(&th)
        .unwrap();
    for spectrum in &set {
        assert_eq!(spectrum.periods(), periods);
        // the points match one by one the sequential evaluation
        for p in spectrum.iter().skip(1).step_by(37) {
            let sd = peak_displacement(&th, OscillatorSpec::new(p.period, spectrum.damping)).unwrap();
            assert_eq!(sd, p.sd);
        }
    }
}

#[test]
fn two_samples_record() {
    let th = TimeHistory::new(vec![0.0, 1.0], 0.01).unwrap();
    let osc = OscillatorSpec::new(1.0, 0.05);
    let set = SpectrumBuilder::new(vec![1.0], vec![0.05])
        .unwrap()
        .build(&th)
        .unwrap();
    let p = set.get(0.05).unwrap().points[0];
    let omega = osc.omega();
    assert!(p.sd.is_finite() && p.sd >= 0.);
    assert!(p.sd > 0.);
    assert!(rel_err(p.sv, omega * p.sd) < 1e-12);
    assert!(rel_err(p.sa, omega * omega * p.sd) < 1e-12);
    // ramp from rest: x(dt) ~ -dt^2/6
    assert!(rel_err(p.sd, 0.01f64.powi(2) / 6.) < 1e-2);
}

#[test]
fn zero_time_step() {
    assert!(matches!(
        TimeHistory::new(vec![0.0, 1.0], 0.0),
        Err(SpectrumError::InvalidTimeHistory(_))
    ));
}

#[test]
fn empty_grid() {
    assert!(matches!(
        SpectrumBuilder::new(vec![], vec![0.05]),
        Err(SpectrumError::EmptyGrid(_))
    ));
    assert!(matches!(
        SpectrumBuilder::new(vec![1.], vec![]),
        Err(SpectrumError::EmptyGrid(_))
    ));
}

#[test]
fn negative_period_names_the_oscillator() {
    let th = TimeHistory::new(vec![0.0, 1.0, 0.0], 0.01).unwrap().with_name("H2");
    let err = SpectrumBuilder::new(vec![-0.5, 0.1, 1.], vec![0.05])
        .unwrap()
        .build(&th)
        .unwrap_err();
    assert!(matches!(
        err.root(),
        SpectrumError::InvalidOscillator { period, damping, .. } if *period == -0.5 && *damping == 0.05
    ));
    assert!(err.to_string().contains("H2"));
}

#[test]
fn long_period_follows_ground_displacement() {
    // for T >> duration, x = -ground displacement: constant acceleration => t^2/2
    let dt = 0.001;
    let n = 2001;
    let th = TimeHistory::new(vec![1.; n], dt).unwrap();
    let sd = peak_displacement(&th, OscillatorSpec::new(1e5, 0.05)).unwrap();
    let t = dt * (n - 1) as f64;
    assert!(rel_err(sd, 0.5 * t * t) < 1e-4, "{sd}");
}

#[test]
fn vanishing_periods_follow_the_ground() {
    let th = TimeHistory::new(vec![0., 1., -0.5, 0.2], 0.01).unwrap();
    let periods = vec![0., 1e-300, 1e-200, 1e-155, 1e-151, 1e-140, 1e-3];
    for damping in [0., 0.05] {
        let set = SpectrumBuilder::new(periods.clone(), vec![damping])
            .unwrap()
            .build(&th)
            .unwrap();
        for p in set.spectra[0].iter() {
            for x in [p.sd, p.sv, p.sa, p.peak_velocity, p.peak_acceleration] {
                assert!(x.is_finite() && x >= 0., "T={}: {p:?}", p.period);
            }
        }
        for p in &set.spectra[0].points[1..5] {
            assert_eq!((p.sa, p.peak_acceleration), (1., 1.), "T={}", p.period);
        }
        let p = set.spectra[0].points[5];
        assert!(rel_err(p.sa, 1.) < 1e-6, "T={}: {p:?}", p.period);
    }
}
