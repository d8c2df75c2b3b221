//! Exposure summaries of simulated concentration profiles.
//!
//! Areas are accumulated segment by segment:
//!
//! ```text
//! Linear:                AUC = (C₁ + C₂) / 2 × Δt
//! Log down (C₂ < C₁):    AUC = (C₁ - C₂) × Δt / ln(C₁ / C₂)
//! ```

use serde::{Deserialize, Serialize};

use crate::models::pk::PLASMA_DRUG;
use crate::simulator::Trajectory;

/// How the area between two samples is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AUCMethod {
    /// Trapezoids everywhere
    Linear,
    /// Trapezoids while rising, exponential interpolation while falling
    #[default]
    LinUpLogDown,
}

impl AUCMethod {
    /// Area under the segment from `(t1, c1)` to `(t2, c2)`, zero when `t2 <= t1`.
    fn segment_area(self, (t1, c1): (f64, f64), (t2, c2): (f64, f64)) -> f64 {
        let dt = t2 - t1;
        let falling = c2 > 0.0 && c1 / c2 - 1.0 > 1e-10;
        match self {
            _ if dt <= 0.0 => 0.0,
            AUCMethod::LinUpLogDown if falling => (c1 - c2) * dt / (c1 / c2).ln(),
            _ => 0.5 * (c1 + c2) * dt,
        }
    }
}

/// Peak concentration, time of peak and area under the curve of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlasmaExposure {
    pub cmax: f64,
    pub tmax: f64,
    pub auc: f64,
}

impl PlasmaExposure {
    /// Summarise `concentrations` sampled at `times` (sorted ascending).
    ///
    /// Returns `None` for an empty profile or mismatched lengths. The first
    /// occurrence of the maximum defines `tmax`.
    pub fn from_profile(times: &[f64], concentrations: &[f64], method: AUCMethod) -> Option<Self> {
        if times.is_empty() || times.len() != concentrations.len() {
            return None;
        }

        let (imax, cmax) = concentrations.iter().copied().enumerate().fold(
            (0, f64::NEG_INFINITY),
            |(ib, cb), (i, c)| if c > cb { (i, c) } else { (ib, cb) },
        );

        let auc = times
            .windows(2)
            .zip(concentrations.windows(2))
            .map(|(t, c)| method.segment_area((t[0], c[0]), (t[1], c[1])))
            .sum::<f64>();

        Some(Self {
            cmax,
            tmax: times[imax],
            auc,
        })
    }

    /// Summarise the plasma compartment of a pharmacokinetic trajectory.
    ///
    /// Units follow the model: mg/m³ for `cmax`, s for `tmax` and mg·s/m³ for `auc`.
    pub fn from_trajectory(trajectory: &Trajectory, method: AUCMethod) -> Option<Self> {
        let times = trajectory.times().to_vec();
        let plasma = trajectory.component(PLASMA_DRUG).to_vec();
        Self::from_profile(&times, &plasma, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn segment_areas() {
        use AUCMethod::*;
        assert_relative_eq!(Linear.segment_area((0.0, 10.0), (1.0, 8.0)), 9.0);
        assert_relative_eq!(
            LinUpLogDown.segment_area((0.0, 10.0), (1.0, 8.0)),
            2.0 / (10.0_f64 / 8.0).ln()
        );
        // rising, flat and drained segments stay trapezoidal
        assert_relative_eq!(LinUpLogDown.segment_area((0.0, 2.0), (2.0, 4.0)), 6.0);
        assert_relative_eq!(LinUpLogDown.segment_area((0.0, 3.0), (2.0, 3.0)), 6.0);
        assert_relative_eq!(LinUpLogDown.segment_area((0.0, 4.0), (2.0, 0.0)), 4.0);
        assert_eq!(Linear.segment_area((1.0, 2.0), (1.0, 4.0)), 0.0);
    }

    #[test]
    fn profile_summary() {
        let times = [0.0, 1.0, 2.0, 4.0, 8.0];
        let concs = [0.0, 10.0, 8.0, 4.0, 1.0];
        let exposure = PlasmaExposure::from_profile(&times, &concs, AUCMethod::Linear).unwrap();
        assert_eq!(exposure.cmax, 10.0);
        assert_eq!(exposure.tmax, 1.0);
        assert_relative_eq!(exposure.auc, 5.0 + 9.0 + 12.0 + 10.0);
    }

    #[test]
    fn log_down_is_below_linear_for_decay() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let concs: Vec<f64> = times.iter().map(|t| 100.0 * (-0.5 * t).exp()).collect();
        let linear = PlasmaExposure::from_profile(&times, &concs, AUCMethod::Linear).unwrap();
        let log = PlasmaExposure::from_profile(&times, &concs, AUCMethod::LinUpLogDown).unwrap();
        let exact = 200.0 * (1.0 - (-4.5_f64).exp());
        assert!(log.auc < linear.auc);
        assert_relative_eq!(log.auc, exact, max_relative = 1e-10);
    }

    #[test]
    fn empty_or_mismatched_profiles() {
        assert!(PlasmaExposure::from_profile(&[], &[], AUCMethod::Linear).is_none());
        assert!(PlasmaExposure::from_profile(&[0.0, 1.0], &[1.0], AUCMethod::Linear).is_none());
    }
}
