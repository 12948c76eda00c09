use iir_bandpass::{
    BandType, BesselNorm, FilterConfig, FilterError, FilterPrototype, FilterSpecification,
    HALF_POWER, IirFiltering, design, frequency_response,
};
use ndarray::{Array2, Axis};

#[test]
fn partial_config_uses_defaults() {
    let config: FilterConfig = serde_json::from_str(r#"{"order": 5}"#).unwrap();
    assert_eq!(config.order, 5);
    assert_eq!(config.prototype, FilterPrototype::Butterworth);
    assert!(config.zero_phase);
    assert_eq!(config.axis, 0);

    let empty: FilterConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, FilterConfig::default());
}

#[test]
fn prototype_is_internally_tagged() {
    let config: FilterConfig = serde_json::from_str(
        r#"{
            "prototype": {"type": "elliptic", "passband_ripple_db": 0.5, "stopband_attenuation_db": 60.0},
            "zero_phase": false,
            "axis": 1
        }"#,
    )
    .unwrap();
    assert_eq!(
        config.prototype,
        FilterPrototype::Elliptic {
            passband_ripple_db: 0.5,
            stopband_attenuation_db: 60.0
        }
    );
    assert!(!config.zero_phase);

    let bessel: FilterPrototype = serde_json::from_str(r#"{"type": "bessel"}"#).unwrap();
    assert_eq!(
        bessel,
        FilterPrototype::Bessel {
            norm: BesselNorm::Phase
        }
    );

    let json = serde_json::to_value(FilterPrototype::ChebyshevI {
        passband_ripple_db: 1.0,
    })
    .unwrap();
    assert_eq!(json["type"], "chebyshev_i");
    assert_eq!(json["passband_ripple_db"], 1.0);
}

#[test]
fn unknown_prototype_is_rejected() {
    let result: Result<FilterConfig, _> =
        serde_json::from_str(r#"{"prototype": {"type": "gaussian"}}"#);
    assert!(result.is_err());
}

#[test]
fn config_drives_design_and_application() {
    let config: FilterConfig = serde_json::from_str(r#"{"order": 2, "axis": 1}"#).unwrap();
    let spec = FilterSpecification::from_config(1.0, 40.0, 250.0, &config);
    let filter = design(&spec).unwrap();
    assert_eq!(
        filter.band_type(),
        BandType::BandPass {
            low: 1.0 / 125.0,
            high: 40.0 / 125.0
        }
    );
    assert_eq!(filter.corners(), (1.0, 40.0));

    // channels x samples, time on the configured axis
    let data = Array2::from_shape_fn((4, 500), |(ch, t)| ((ch + 1) as f64 * t as f64 * 0.05).sin());
    let filtered = data.filter_with(&filter, Axis(config.axis)).unwrap();
    assert_eq!(filtered.shape(), &[4, 500]);
    assert_eq!(
        data.filter_with(&filter, Axis(2)),
        Err(FilterError::AxisOutOfBounds { axis: 2, ndim: 2 })
    );
}

#[test]
fn eeg_bandpass_response_table() {
    // 50-70 Hz bandpass at 256 Hz, as plotted for orders 1, 2 and 5
    let mut previous_stop = f64::INFINITY;
    for order in [1, 2, 5] {
        let filter = design(&FilterSpecification::bandpass(50.0, 70.0, 256.0).with_order(order)).unwrap();
        let response = frequency_response(&filter, 512).unwrap();
        let mags = response.magnitudes();

        // 0.25 Hz bins: 50 Hz -> 200, 70 Hz -> 280, 20 Hz -> 80
        assert!((mags[200] - HALF_POWER).abs() < 1e-6, "order {order}");
        assert!((mags[280] - HALF_POWER).abs() < 1e-6, "order {order}");
        assert!(mags[80] < previous_stop);
        previous_stop = mags[80];
    }
}
