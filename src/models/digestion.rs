//! Intestinal lipid digestion kinetics.
//!
//! Triglyceride droplets of diameter `D0` are hydrolysed at their surface. The release
//! rate of fatty acids follows the shrinking-core law of Li & McClements (2010):
//!
//! ```text
//! dc_FA/dt = (Kdig / Vbulk) · N · π · D0² · ((FA0 - c_FA) / FA0)^(2/3) · 1000
//! ```
//!
//! with `N` the number of droplets implied by the ingested oil volume and
//! `FA0 = 3 · c_oil` the fatty acids releasable from the ingested triglyceride.
//! Concentrations are in mmol/L and time is in minutes.

use std::f64::consts::PI;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::simulator::{integrate, Equation, IntegratorConfig, Trajectory};
use crate::LipidsolError;

/// Physical constants of the in-vitro digestion experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestionParameters {
    /// Digestion rate constant per unit droplet surface (mmol/(min·cm²))
    pub digestion_rate: f64,
    /// Total volume of the digestion medium (mL)
    pub bulk_volume: f64,
    /// Molecular weight of the ingested triglyceride (g/mol)
    pub oil_molar_mass: f64,
    /// Density of the ingested oil (g/mL)
    pub oil_density: f64,
    /// Digestible fatty acids released per triglyceride
    pub fatty_acids_per_triglyceride: f64,
}

impl Default for DigestionParameters {
    fn default() -> Self {
        Self {
            digestion_rate: 3.116e-7,
            bulk_volume: 15.0,
            oil_molar_mass: 885.4,
            oil_density: 0.92,
            fatty_acids_per_triglyceride: 3.0,
        }
    }
}

/// Quantities implied by the ingested oil, recomputed on every rate evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OilLoading {
    /// Starting mass of triglyceride (g)
    pub oil_mass: f64,
    /// Starting volume of oil (mL)
    pub oil_volume: f64,
    /// Number of spherical droplets
    pub droplet_count: f64,
    /// Initial digestible fatty acids (mmol/L)
    pub fa0: f64,
}

/// The digestion-rate model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntestinalDigestion {
    params: DigestionParameters,
}

impl IntestinalDigestion {
    pub fn new(params: DigestionParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DigestionParameters {
        &self.params
    }

    /// Ceiling of the fatty acid concentration for an oil concentration `c_oil` (mmol/L)
    #[inline(always)]
    pub fn fatty_acid_ceiling(&self, c_oil: f64) -> f64 {
        self.params.fatty_acids_per_triglyceride * c_oil
    }

    /// Oil mass, volume, droplet count and `FA0` for droplets of diameter `d0` (cm)
    /// at oil concentration `c_oil` (mmol/L).
    pub fn oil_loading(&self, d0: f64, c_oil: f64) -> OilLoading {
        let p = &self.params;
        let oil_mass = c_oil * p.oil_molar_mass * p.bulk_volume / 1e6;
        let oil_volume = oil_mass / p.oil_density;
        OilLoading {
            oil_mass,
            oil_volume,
            droplet_count: oil_volume / (d0.powi(3) * PI / 6.0),
            fa0: self.fatty_acid_ceiling(c_oil),
        }
    }

    /// Fatty acid release rate `dc_FA/dt` in mmol/(L·min).
    ///
    /// The model is autonomous, `t` is accepted only to match the integrator's
    /// right-hand side convention. Concentrations above `FA0` have no physical meaning;
    /// they can still be visited by the integrator, in which case the shrinking-core
    /// term is taken as zero (digestion complete) rather than evaluating a fractional
    /// power of a negative number. Use [IntestinalDigestion::try_rate] to reject them.
    pub fn rate(&self, c_fa: f64, _t: f64, d0: f64, c_oil: f64) -> f64 {
        let loading = self.oil_loading(d0, c_oil);
        let remaining = ((loading.fa0 - c_fa) / loading.fa0).max(0.0);
        self.surface_rate(&loading, d0) * remaining.powf(2.0 / 3.0)
    }

    /// Same as [IntestinalDigestion::rate], but fails with
    /// [LipidsolError::DomainError] when `c_fa` exceeds `FA0`.
    pub fn try_rate(&self, c_fa: f64, t: f64, d0: f64, c_oil: f64) -> Result<f64, LipidsolError> {
        let ceiling = self.fatty_acid_ceiling(c_oil);
        if c_fa > ceiling {
            return Err(LipidsolError::DomainError {
                quantity: "c_FA",
                value: c_fa,
                ceiling,
            });
        }
        Ok(self.rate(c_fa, t, d0, c_oil))
    }

    /// Rate at zero conversion, i.e. total droplet surface times the digestion constant.
    #[inline(always)]
    fn surface_rate(&self, loading: &OilLoading, d0: f64) -> f64 {
        (self.params.digestion_rate / self.params.bulk_volume)
            * loading.droplet_count
            * PI
            * d0.powi(2)
            * 1000.0
    }

    /// Fix the droplet diameter and oil concentration of a run.
    pub fn bind(&self, d0: f64, c_oil: f64) -> DigestionRun {
        DigestionRun {
            model: *self,
            d0,
            c_oil,
        }
    }

    /// Integrate the fatty acid concentration from `c_FA(times[0]) = 0`.
    pub fn simulate(
        &self,
        d0: f64,
        c_oil: f64,
        times: &[f64],
        config: &IntegratorConfig,
    ) -> Result<Trajectory, LipidsolError> {
        integrate(&self.bind(d0, c_oil), &[0.0], times, config)
    }
}

/// Duration of the reference experiment (min)
pub const DIGESTION_TIME: f64 = 180.0;
/// Number of evaluation times of the reference experiment
pub const DIGESTION_POINTS: usize = 180;

/// `npoints` evaluation times spread over `0..=t_end` (min).
pub fn time_grid(t_end: f64, npoints: usize) -> Array1<f64> {
    Array1::linspace(0.0, t_end, npoints)
}

/// Evaluation times of the reference experiment: 180 points spread over 0..=180 min.
pub fn digestion_times() -> Array1<f64> {
    time_grid(DIGESTION_TIME, DIGESTION_POINTS)
}

/// A digestion model with its droplet diameter and oil concentration fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigestionRun {
    model: IntestinalDigestion,
    d0: f64,
    c_oil: f64,
}

impl DigestionRun {
    pub fn d0(&self) -> f64 {
        self.d0
    }

    pub fn c_oil(&self) -> f64 {
        self.c_oil
    }
}

impl Equation for DigestionRun {
    fn nstates(&self) -> usize {
        1
    }

    #[inline(always)]
    fn diffeq(&self, x: &[f64], t: f64, dx: &mut [f64]) {
        dx[0] = self.model.rate(x[0], t, self.d0, self.c_oil);
    }
}
