use diffsol::error::DiffsolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LipidsolError {
    #[error("Error in the ODE solver: {0}")]
    SolverError(#[from] DiffsolError),
    #[error("The step size of the ODE solver went to zero near t = {time}, this means one of the states is getting really close to 0.0 or INFINITE. Check the model parameters")]
    StepSizeTooSmall { time: f64 },
    #[error("{quantity} = {value} exceeds its ceiling {ceiling}, the shrinking-core term is undefined")]
    DomainError {
        quantity: &'static str,
        value: f64,
        ceiling: f64,
    },
    #[error("State component {component} is not finite at t = {time}")]
    NonFiniteState { time: f64, component: usize },
    #[error("Initial state has {found} components, the model has {expected} states")]
    StateDimension { expected: usize, found: usize },
    #[error("Evaluation times must be non-empty, finite and non-decreasing")]
    InvalidTimes,
    #[error("Error in the shape of an array: {0}")]
    ShapeError(#[from] ndarray::ShapeError),
    #[error("Error parsing parameters: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Sweep aborted at grid point ({row}, {col}): {source}")]
    SweepAborted {
        row: usize,
        col: usize,
        #[source]
        source: Box<LipidsolError>,
    },
    #[error("Error rendering figure: {0}")]
    RenderError(String),
}
