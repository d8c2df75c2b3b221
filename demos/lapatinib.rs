use lipidsol::prelude::models::*;
use lipidsol::*;

fn main() -> Result<(), LipidsolError> {
    let model = PkModel::default();
    let times = pk_times(361);
    let config = IntegratorConfig::default().with_nonnegative(true);
    let trajectory = model.simulate(times.as_slice().unwrap_or(&[]), &config)?;

    for (t, state) in trajectory
        .times()
        .iter()
        .zip(trajectory.states().outer_iter())
        .step_by(36)
    {
        println!(
            "t = {:>7.0} s  {:?}  solid = {:>8.2} mg  plasma = {:.4} ug/mL",
            t,
            Phase::at(*t, model.params()),
            state[SOLID_DRUG],
            plasma_ug_per_ml(state[PLASMA_DRUG])
        );
    }

    if let Some(exposure) = PlasmaExposure::from_trajectory(&trajectory, AUCMethod::LinUpLogDown) {
        println!(
            "Cmax = {:.4} ug/mL at {:.0} s, AUC = {:.4e} mg*s/m3",
            plasma_ug_per_ml(exposure.cmax),
            exposure.tmax,
            exposure.auc
        );
    }
    Ok(())
}
