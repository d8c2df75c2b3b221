//! Sensitivity of the digestion model to oil concentration and droplet size.
//!
//! Every `(c_oil, D0)` pair of a square grid is integrated independently from
//! `c_FA(0) = 0`, and one scalar per run is stored in a pre-sized matrix whose rows
//! follow `c_oil` and whose columns follow `D0`. Runs are distributed with rayon.

mod grid;

pub use grid::{meshgrid, ParameterAxis};

use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{parallel::prelude::*, Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::models::digestion::{
    time_grid, IntestinalDigestion, DIGESTION_POINTS, DIGESTION_TIME,
};
use crate::plot::ContourFigure;
use crate::simulator::IntegratorConfig;
use crate::LipidsolError;

/// The scalar kept from each trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepMetric {
    /// Fatty acid concentration at the last evaluation time
    #[default]
    FinalValue,
    /// Highest fatty acid concentration over the run
    PeakValue,
}

/// What to do when a grid point cannot be integrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Store NaN for the point, record the failure and carry on
    #[default]
    Isolate,
    /// Fail the whole sweep with the first failing point in row-major order
    Abort,
}

/// Settings of a sensitivity sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Number of values along each axis
    pub blocksize: usize,
    /// Oil concentration axis (mmol/L)
    pub c_oil: ParameterAxis,
    /// Droplet diameter axis (cm)
    pub d0: ParameterAxis,
    /// Digestion time (min)
    pub t_end: f64,
    /// Number of evaluation times over `0..=t_end`
    pub ntimes: usize,
    pub metric: SweepMetric,
    pub failure_policy: FailurePolicy,
    pub integrator: IntegratorConfig,
    /// Draw a progress bar on stderr
    pub progress: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            blocksize: 100,
            c_oil: ParameterAxis::new(1.0, 100.0),
            d0: ParameterAxis::new(5e-5, 5e-4),
            t_end: DIGESTION_TIME,
            ntimes: DIGESTION_POINTS,
            metric: SweepMetric::FinalValue,
            failure_policy: FailurePolicy::Isolate,
            integrator: IntegratorConfig::default(),
            progress: false,
        }
    }
}

impl SweepConfig {
    pub fn with_blocksize(mut self, blocksize: usize) -> Self {
        self.blocksize = blocksize;
        self
    }

    pub fn times(&self) -> Array1<f64> {
        time_grid(self.t_end, self.ntimes)
    }
}

/// A grid point whose integration failed.
#[derive(Debug)]
pub struct PointFailure {
    pub row: usize,
    pub col: usize,
    pub c_oil: f64,
    pub d0: f64,
    pub error: LipidsolError,
}

/// Outcome of a sweep.
#[derive(Debug)]
pub struct SweepResult {
    c_oil: Array1<f64>,
    d0: Array1<f64>,
    values: Array2<f64>,
    failures: Vec<PointFailure>,
}

impl SweepResult {
    /// Oil concentrations, one per row of [SweepResult::values]
    pub fn c_oil(&self) -> &Array1<f64> {
        &self.c_oil
    }

    /// Droplet diameters, one per column of [SweepResult::values]
    pub fn d0(&self) -> &Array1<f64> {
        &self.d0
    }

    /// `values[[i, j]]` is the metric for `c_oil[i]` and `d0[j]`
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Failed points, in row-major order
    pub fn failures(&self) -> &[PointFailure] {
        &self.failures
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Filled-contour description with `c_oil` on the x axis and `D0` on the y axis.
    ///
    /// The value matrix is transposed so that it lines up with [meshgrid]: the
    /// contour value at `X[[j, i]] = c_oil[i]`, `Y[[j, i]] = d0[j]` is `values[[i, j]]`.
    pub fn contour_figure(&self) -> Result<ContourFigure, LipidsolError> {
        let (x, y) = meshgrid(&self.c_oil, &self.d0);
        Ok(ContourFigure::new(x, y, self.values.t().to_owned())?
            .with_title("Sensitivity Analysis")
            .with_x_label("c_oil (mM)")
            .with_y_label("D0 (cm)")
            .with_colorbar_label("Fatty Acid Concentration (mM)"))
    }
}

/// Integrate `model` over the `c_oil × D0` grid of `config`.
pub fn run_sweep(
    model: &IntestinalDigestion,
    config: &SweepConfig,
) -> Result<SweepResult, LipidsolError> {
    let c_oil = config.c_oil.linspace(config.blocksize);
    let d0 = config.d0.linspace(config.blocksize);
    let times = config.times().to_vec();
    let mut values = Array2::from_elem((c_oil.len(), d0.len()), f64::NAN);

    tracing::info!(
        blocksize = config.blocksize,
        ntimes = times.len(),
        "starting sensitivity sweep"
    );

    let progress = if config.progress {
        let bar = ProgressBar::new(values.len() as u64);
        bar.set_style(ProgressStyle::default_bar());
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut failures: Vec<PointFailure> = values
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .flat_map_iter(|(i, mut row)| {
            let mut row_failures = Vec::new();
            for (j, cell) in row.iter_mut().enumerate() {
                match evaluate_point(model, c_oil[i], d0[j], &times, config) {
                    Ok(value) => *cell = value,
                    Err(error) => {
                        tracing::warn!(row = i, col = j, %error, "grid point failed");
                        row_failures.push(PointFailure {
                            row: i,
                            col: j,
                            c_oil: c_oil[i],
                            d0: d0[j],
                            error,
                        });
                    }
                }
                progress.inc(1);
            }
            tracing::debug!(row = i, c_oil = c_oil[i], "sweep row finished");
            row_failures
        })
        .collect();
    progress.finish_and_clear();

    failures.sort_by_key(|f| (f.row, f.col));

    if config.failure_policy == FailurePolicy::Abort && !failures.is_empty() {
        let first = failures.swap_remove(0);
        return Err(LipidsolError::SweepAborted {
            row: first.row,
            col: first.col,
            source: Box::new(first.error),
        });
    }

    tracing::info!(failures = failures.len(), "sensitivity sweep finished");

    Ok(SweepResult {
        c_oil,
        d0,
        values,
        failures,
    })
}

fn evaluate_point(
    model: &IntestinalDigestion,
    c_oil: f64,
    d0: f64,
    times: &[f64],
    config: &SweepConfig,
) -> Result<f64, LipidsolError> {
    let trajectory = model.simulate(d0, c_oil, times, &config.integrator)?;
    let value = match config.metric {
        SweepMetric::FinalValue => trajectory.final_state()[0],
        SweepMetric::PeakValue => trajectory.peak(0),
    };
    if !value.is_finite() {
        return Err(LipidsolError::NonFiniteState {
            time: times[times.len() - 1],
            component: 0,
        });
    }
    Ok(value)
}
