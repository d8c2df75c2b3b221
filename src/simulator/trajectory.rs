use ndarray::{Array1, Array2, ArrayView1, Axis};

/// States of an integrated system sampled at the requested evaluation times.
///
/// Rows follow `times`, columns follow the state components.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Array1<f64>,
    states: Array2<f64>,
}

impl Trajectory {
    pub(crate) fn new(times: Array1<f64>, states: Array2<f64>) -> Self {
        Self { times, states }
    }

    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    pub fn states(&self) -> &Array2<f64> {
        &self.states
    }

    /// Number of evaluation times
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time course of a single state component
    pub fn component(&self, index: usize) -> ArrayView1<'_, f64> {
        self.states.column(index)
    }

    /// State at the last evaluation time
    pub fn final_state(&self) -> ArrayView1<'_, f64> {
        self.states.row(self.states.nrows() - 1)
    }

    /// Largest value a component reaches, ignoring NaN entries
    pub fn peak(&self, index: usize) -> f64 {
        self.states
            .index_axis(Axis(1), index)
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
