pub mod error;
pub mod exposure;
pub mod models;
pub mod plot;
pub mod simulator;
pub mod sweep;

pub use crate::exposure::{AUCMethod, PlasmaExposure};
pub use crate::models::digestion::{DigestionParameters, IntestinalDigestion};
pub use crate::models::pk::{Phase, PkModel, PkParameters};
pub use crate::plot::{ContourFigure, ContourRenderer};
pub use crate::simulator::{integrate, Equation, IntegratorConfig, Trajectory};
pub use crate::sweep::{run_sweep, SweepConfig, SweepResult};
pub use error::LipidsolError;

pub mod prelude {
    pub mod models {
        pub use crate::models::digestion::{
            digestion_times, time_grid, DigestionParameters, DigestionRun, IntestinalDigestion,
            OilLoading, DIGESTION_POINTS, DIGESTION_TIME,
        };
        pub use crate::models::pk::{
            pk_times, plasma_ug_per_ml, Phase, PkDerived, PkModel, PkParameters, AQUEOUS_DRUG,
            FATTY_ACID, LUMEN_FRACTION, NSTATES, OIL_DRUG, PLASMA_DRUG, SOLID_DRUG,
        };
    }
    pub mod simulator {
        pub use crate::simulator::{integrate, Equation, IntegratorConfig, Trajectory};
    }
    pub mod sweep {
        pub use crate::sweep::{
            meshgrid, run_sweep, FailurePolicy, ParameterAxis, PointFailure, SweepConfig,
            SweepMetric, SweepResult,
        };
    }
    #[cfg(feature = "plotly")]
    pub use crate::plot::PlotlyRenderer;
    pub use crate::exposure::{AUCMethod, PlasmaExposure};
    pub use crate::plot::{ContourFigure, ContourRenderer};
    pub use crate::LipidsolError;
}
