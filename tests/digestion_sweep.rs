use lipidsol::prelude::sweep::*;
use lipidsol::*;

#[test]
fn reference_rate_example() {
    let model = IntestinalDigestion::default();
    let rate = model.rate(0.0, 0.0, 3.86e-5, 50.0);
    assert!(rate.is_finite() && rate > 0.0);
}

#[test]
fn sweep_has_square_shape_and_is_deterministic() {
    let model = IntestinalDigestion::default();
    let config = SweepConfig::default().with_blocksize(5);

    let first = run_sweep(&model, &config).unwrap();
    let second = run_sweep(&model, &config).unwrap();

    assert_eq!(first.values().dim(), (5, 5));
    assert_eq!(first.c_oil().len(), 5);
    assert_eq!(first.d0().len(), 5);
    assert_eq!(first.values(), second.values());
    assert!(first.values().iter().all(|v| v.is_finite()));
}

#[test]
fn fatty_acid_fraction_does_not_depend_on_oil() {
    // Droplet count and ceiling both scale with c_oil, so c_FA / c_oil only
    // depends on the droplet diameter.
    let model = IntestinalDigestion::default();
    let result = run_sweep(&model, &SweepConfig::default().with_blocksize(4)).unwrap();
    let values = result.values();
    for j in 0..values.ncols() {
        let reference = values[[0, j]] / result.c_oil()[0];
        for i in 1..values.nrows() {
            let fraction = values[[i, j]] / result.c_oil()[i];
            assert!(
                (fraction - reference).abs() <= 1e-3 * reference,
                "row {i}, col {j}: {fraction} vs {reference}"
            );
        }
    }
}

#[test]
fn sweep_config_from_json() {
    let config: SweepConfig = serde_json::from_str(
        r#"{
            "blocksize": 3,
            "d0": { "start": 1e-4, "stop": 2e-4 },
            "metric": "PeakValue",
            "failure_policy": "Abort"
        }"#,
    )
    .unwrap();
    assert_eq!(config.blocksize, 3);
    assert_eq!(config.d0, ParameterAxis::new(1e-4, 2e-4));
    assert_eq!(config.c_oil, ParameterAxis::new(1.0, 100.0));
    assert_eq!(config.metric, SweepMetric::PeakValue);
    assert_eq!(config.failure_policy, FailurePolicy::Abort);

    let result = run_sweep(&IntestinalDigestion::default(), &config).unwrap();
    assert_eq!(result.values().dim(), (3, 3));
}

#[test]
fn contour_figure_labels() {
    let model = IntestinalDigestion::default();
    let result = run_sweep(&model, &SweepConfig::default().with_blocksize(2)).unwrap();
    let figure = result.contour_figure().unwrap();
    assert_eq!(figure.x_label(), "c_oil (mM)");
    assert_eq!(figure.y_label(), "D0 (cm)");
    assert_eq!(figure.colorbar_label(), "Fatty Acid Concentration (mM)");
    assert_eq!(figure.x_axis(), result.c_oil().to_vec());
    assert_eq!(figure.y_axis(), result.d0().to_vec());
}
