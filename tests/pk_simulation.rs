use lipidsol::prelude::models::*;
use lipidsol::*;

fn simulate() -> (PkModel, Trajectory) {
    let model = PkModel::default();
    let times = pk_times(181);
    let config = IntegratorConfig::default().with_nonnegative(true);
    let trajectory = model
        .simulate(times.as_slice().unwrap(), &config)
        .expect("pk simulation");
    (model, trajectory)
}

#[test]
fn lapatinib_profile_is_physical() {
    let (model, trajectory) = simulate();
    assert_eq!(trajectory.len(), 181);

    for (row, state) in trajectory.states().outer_iter().enumerate() {
        for (component, &value) in state.iter().enumerate() {
            assert!(
                value > -1e-3,
                "component {} went negative at row {}: {}",
                component,
                row,
                value
            );
        }
    }

    let solid = trajectory.component(SOLID_DRUG);
    assert_eq!(solid[0], model.params().dose);
    for pair in solid.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-6);
    }

    let ceiling = model.params().fa0() / model.params().aqueous_volume();
    assert!(trajectory
        .component(FATTY_ACID)
        .iter()
        .all(|&c| c <= ceiling * (1.0 + 1e-6)));

    let plasma = trajectory.component(PLASMA_DRUG);
    assert!(plasma[plasma.len() - 1] > 0.0);
}

#[test]
fn absorptive_area_decays_only_after_residence_time() {
    let (model, trajectory) = simulate();
    let p = model.params();
    let area = p.intestinal_area();

    for (&t, &y6) in trajectory
        .times()
        .iter()
        .zip(trajectory.component(LUMEN_FRACTION).iter())
    {
        if t <= p.residence_time {
            assert!((y6 - area).abs() <= 1e-9 * area, "t = {t}: {y6}");
        }
    }

    let last = trajectory.final_state()[LUMEN_FRACTION];
    let expected = area * (-p.transit_rate * (18000.0 - p.residence_time)).exp();
    assert!(
        (last - expected).abs() <= 1e-3 * expected,
        "{last} vs {expected}"
    );
}

#[test]
fn trajectory_across_phase_switches() {
    let model = PkModel::default();
    let p = *model.params();
    // Output times straddling both switches, including the switches themselves.
    let times = [
        1.0, 3600.0, 10799.0, 10800.0, 10801.0, 12600.0, 14399.0, 14400.0, 14401.0, 16000.0,
        18000.0,
    ];
    let trajectory = model
        .simulate(&times, &IntegratorConfig::precise())
        .expect("pk simulation");
    let area = p.intestinal_area();

    let lumen = trajectory.component(LUMEN_FRACTION);
    for (&t, &y6) in times.iter().zip(lumen.iter()) {
        let expected = if t <= p.residence_time {
            area
        } else {
            area * (-p.transit_rate * (t - p.residence_time)).exp()
        };
        assert!(
            (y6 - expected).abs() <= 1e-6 * expected,
            "t = {t}: {y6} vs {expected}"
        );
    }

    let solid = trajectory.component(SOLID_DRUG);
    for pair in solid.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9, "{} -> {}", pair[0], pair[1]);
    }
    let cleared: Vec<f64> = times
        .iter()
        .zip(solid.iter())
        .filter(|&(&t, _)| t >= p.clearance_time)
        .map(|(_, &s)| s)
        .collect();
    assert_eq!(cleared.len(), 4);
    for &s in &cleared[1..] {
        assert!((s - cleared[0]).abs() <= 1e-9 * cleared[0], "{s} vs {}", cleared[0]);
    }
}

#[test]
fn default_and_precise_tolerances_agree() {
    let model = PkModel::default();
    let times = pk_times(37);
    let times = times.as_slice().unwrap();
    let coarse = model
        .simulate(times, &IntegratorConfig::default().with_nonnegative(true))
        .expect("default tolerances");
    let fine = model
        .simulate(times, &IntegratorConfig::precise())
        .expect("precise tolerances");

    for component in [SOLID_DRUG, PLASMA_DRUG, LUMEN_FRACTION] {
        let a = coarse.final_state()[component];
        let b = fine.final_state()[component];
        assert!(
            (a - b).abs() <= 1e-3 * b.abs().max(1e-12),
            "component {component}: {a} vs {b}"
        );
    }
}

#[test]
fn plasma_exposure_summary() {
    let (_, trajectory) = simulate();
    let exposure =
        PlasmaExposure::from_trajectory(&trajectory, AUCMethod::LinUpLogDown).unwrap();
    assert!(exposure.cmax > 0.0);
    assert!(exposure.tmax > 1.0 && exposure.tmax <= 18000.0);
    assert!(exposure.auc > 0.0);
    assert!(plasma_ug_per_ml(exposure.cmax) < exposure.cmax);
}

#[test]
fn parameters_can_be_overridden_from_json() {
    let params: PkParameters =
        serde_json::from_str(r#"{ "oil_volume": 2.0, "dose": 250.0 }"#).unwrap();
    assert_eq!(params.oil_volume, 2.0);
    assert_eq!(params.dose, 250.0);
    assert_eq!(params.transit_rate, 5e-4);

    let model = PkModel::new(params);
    assert_eq!(model.initial_state()[SOLID_DRUG], 250.0);
    assert!(model.params().fa0() < PkParameters::default().fa0());
}
