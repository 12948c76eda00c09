use iir_bandpass::{FilterSpecification, IirFiltering, design};
use ndarray::{Array1, Array2, Axis, s};
use proptest::prelude::*;

fn samples(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-10.0f64..10.0, min_len..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn causal_output_ignores_future_input(
        data in samples(2, 400),
        cut in 0.0f64..1.0,
        order in 1usize..6,
    ) {
        let filter = design(
            &FilterSpecification::bandpass(4.0, 40.0, 200.0)
                .with_order(order)
                .with_zero_phase(false),
        ).unwrap();

        let keep = 1 + ((data.len() - 1) as f64 * cut) as usize;
        let full = filter.apply_causal(&Array1::from(data.clone()), Axis(0)).unwrap();
        let prefix = filter.apply_causal(&Array1::from(data[..keep].to_vec()), Axis(0)).unwrap();

        prop_assert_eq!(prefix, full.slice(s![..keep]).to_owned());
    }

    #[test]
    fn zero_phase_commutes_with_reversal(data in samples(256, 600)) {
        let filter = design(&FilterSpecification::lowpass(40.0, 256.0).with_order(4)).unwrap();

        let x = Array1::from(data);
        let reversed = x.slice(s![..;-1]).to_owned();

        let forward = x.zero_phase_filter(&filter, Axis(0)).unwrap();
        let backward = reversed.zero_phase_filter(&filter, Axis(0)).unwrap();
        let backward = backward.slice(s![..;-1]);

        // edge transients of the two pass orders differ, the interior must agree
        let n = forward.len();
        for i in 64..n - 64 {
            prop_assert!(
                (forward[i] - backward[i]).abs() < 1e-8,
                "sample {}: {} vs {}", i, forward[i], backward[i]
            );
        }
    }

    #[test]
    fn filtering_is_linear(a in samples(100, 300), gain in -5.0f64..5.0) {
        let filter = design(&FilterSpecification::bandpass(2.0, 25.0, 256.0)).unwrap();
        let x = Array1::from(a);
        let y = x.mapv(|v| v * gain);

        for (fx, fy) in [
            (x.causal_filter(&filter, Axis(0)).unwrap(), y.causal_filter(&filter, Axis(0)).unwrap()),
            (x.zero_phase_filter(&filter, Axis(0)).unwrap(), y.zero_phase_filter(&filter, Axis(0)).unwrap()),
        ] {
            for (u, v) in fx.iter().zip(fy.iter()) {
                prop_assert!((u * gain - v).abs() < 1e-9 * (1.0 + u.abs() * gain.abs()));
            }
        }
    }

    #[test]
    fn output_shape_matches_input(rows in 1usize..5, cols in 80usize..200, axis in 0usize..2) {
        let filter = design(&FilterSpecification::highpass(1.0, 100.0).with_order(2)).unwrap();
        let data = Array2::from_shape_fn((rows, cols), |(r, c)| (r * 31 + c) as f64 % 7.0);

        let causal = data.causal_filter(&filter, Axis(axis)).unwrap();
        prop_assert_eq!(causal.shape(), data.shape());

        if data.len_of(Axis(axis)) > filter.pad_length() {
            let zero_phase = data.zero_phase_filter(&filter, Axis(axis)).unwrap();
            prop_assert_eq!(zero_phase.shape(), data.shape());
        } else {
            prop_assert!(data.zero_phase_filter(&filter, Axis(axis)).is_err());
        }
    }
}
