//! Filled contour figures and the seam to a plotting backend.
//!
//! The crate only describes what to draw. A [ContourRenderer] turns a
//! [ContourFigure] into whatever its backend produces; with the `plotly` feature
//! enabled, [PlotlyRenderer] builds an interactive HTML figure.

#[cfg(feature = "plotly")]
mod plotly_backend;

#[cfg(feature = "plotly")]
pub use plotly_backend::PlotlyRenderer;

use ndarray::{Array2, ErrorKind, ShapeError};

use crate::LipidsolError;

/// Coordinate meshes, values and labels of a filled contour plot with a colour bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourFigure {
    x: Array2<f64>,
    y: Array2<f64>,
    z: Array2<f64>,
    title: String,
    x_label: String,
    y_label: String,
    colorbar_label: String,
}

impl ContourFigure {
    /// `x`, `y` and `z` must share the same shape, as produced by
    /// [meshgrid](crate::sweep::meshgrid).
    pub fn new(x: Array2<f64>, y: Array2<f64>, z: Array2<f64>) -> Result<Self, LipidsolError> {
        if x.dim() != y.dim() || x.dim() != z.dim() {
            return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
        }
        Ok(Self {
            x,
            y,
            z,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            colorbar_label: String::new(),
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn with_colorbar_label(mut self, label: impl Into<String>) -> Self {
        self.colorbar_label = label.into();
        self
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    pub fn z(&self) -> &Array2<f64> {
        &self.z
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn colorbar_label(&self) -> &str {
        &self.colorbar_label
    }

    /// Distinct x coordinates, taken from the first row of the x mesh
    pub fn x_axis(&self) -> Vec<f64> {
        self.x.row(0).to_vec()
    }

    /// Distinct y coordinates, taken from the first column of the y mesh
    pub fn y_axis(&self) -> Vec<f64> {
        self.y.column(0).to_vec()
    }

    /// Values as nested rows, one row per y coordinate
    pub fn z_rows(&self) -> Vec<Vec<f64>> {
        self.z.outer_iter().map(|row| row.to_vec()).collect()
    }
}

/// A plotting backend.
pub trait ContourRenderer {
    type Output;

    fn render(&self, figure: &ContourFigure) -> Result<Self::Output, LipidsolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::meshgrid;
    use ndarray::Array1;

    struct Recorder;

    impl ContourRenderer for Recorder {
        type Output = (usize, usize, String);

        fn render(&self, figure: &ContourFigure) -> Result<Self::Output, LipidsolError> {
            Ok((
                figure.x_axis().len(),
                figure.y_axis().len(),
                figure.colorbar_label().to_string(),
            ))
        }
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let err = ContourFigure::new(
            Array2::zeros((2, 3)),
            Array2::zeros((2, 3)),
            Array2::zeros((3, 2)),
        )
        .unwrap_err();
        assert!(matches!(err, LipidsolError::ShapeError(_)));
    }

    #[test]
    fn renderer_receives_axes_and_labels() {
        let x = Array1::from(vec![1.0, 2.0, 3.0]);
        let y = Array1::from(vec![0.1, 0.2]);
        let (xx, yy) = meshgrid(&x, &y);
        let figure = ContourFigure::new(xx, yy, Array2::ones((2, 3)))
            .unwrap()
            .with_colorbar_label("mM");

        assert_eq!(figure.x_axis(), vec![1.0, 2.0, 3.0]);
        assert_eq!(figure.y_axis(), vec![0.1, 0.2]);
        assert_eq!(figure.z_rows().len(), 2);
        assert_eq!(Recorder.render(&figure).unwrap(), (3, 2, "mM".to_string()));
    }
}
