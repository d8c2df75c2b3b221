use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Closed range of a swept parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterAxis {
    pub start: f64,
    pub stop: f64,
}

impl ParameterAxis {
    pub fn new(start: f64, stop: f64) -> Self {
        Self { start, stop }
    }

    /// `n` evenly spaced values from `start` to `stop`, both included.
    pub fn linspace(&self, n: usize) -> Array1<f64> {
        if n == 1 {
            return Array1::from_elem(1, self.start);
        }
        Array1::linspace(self.start, self.stop, n)
    }
}

/// Coordinate matrices for plotting over `x` (columns) and `y` (rows).
///
/// Both outputs have shape `(y.len(), x.len())` with `X[[j, i]] = x[i]` and
/// `Y[[j, i]] = y[j]`.
pub fn meshgrid(x: &Array1<f64>, y: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let shape = (y.len(), x.len());
    let xx = Array2::from_shape_fn(shape, |(_, i)| x[i]);
    let yy = Array2::from_shape_fn(shape, |(j, _)| y[j]);
    (xx, yy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let axis = ParameterAxis::new(5e-5, 5e-4);
        let values = axis.linspace(100);
        assert_eq!(values.len(), 100);
        assert_eq!(values[0], 5e-5);
        assert!((values[99] - 5e-4).abs() < 1e-18);
        assert!((values[1] - values[0] - 4.5e-4 / 99.0).abs() < 1e-18);
    }

    #[test]
    fn single_point_axis_is_its_start() {
        assert_eq!(ParameterAxis::new(1.0, 100.0).linspace(1).to_vec(), vec![1.0]);
        assert!(ParameterAxis::new(1.0, 100.0).linspace(0).is_empty());
    }

    #[test]
    fn meshgrid_uses_xy_indexing() {
        let x = Array1::from(vec![1.0, 2.0, 3.0]);
        let y = Array1::from(vec![10.0, 20.0]);
        let (xx, yy) = meshgrid(&x, &y);
        assert_eq!(xx.dim(), (2, 3));
        assert_eq!(yy.dim(), (2, 3));
        assert_eq!(xx[[1, 2]], 3.0);
        assert_eq!(yy[[1, 2]], 20.0);
        assert_eq!(xx.row(0), x);
        assert_eq!(yy.column(0), y);
    }
}
