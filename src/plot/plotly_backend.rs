use plotly::common::{ColorBar, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Contour, Plot};

use super::{ContourFigure, ContourRenderer};
use crate::LipidsolError;

/// Renders contour figures with plotly.
#[derive(Debug, Clone, Default)]
pub struct PlotlyRenderer {
    div_id: Option<String>,
}

impl PlotlyRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the `<div>` used by [PlotlyRenderer::to_inline_html]
    pub fn with_div_id(mut self, div_id: impl Into<String>) -> Self {
        self.div_id = Some(div_id.into());
        self
    }

    /// Render the figure as an HTML fragment that can be embedded in a page.
    pub fn to_inline_html(&self, figure: &ContourFigure) -> Result<String, LipidsolError> {
        let plot = self.render(figure)?;
        Ok(plot.to_inline_html(self.div_id.as_deref()))
    }
}

impl ContourRenderer for PlotlyRenderer {
    type Output = Plot;

    fn render(&self, figure: &ContourFigure) -> Result<Plot, LipidsolError> {
        if figure.z().is_empty() {
            return Err(LipidsolError::RenderError(
                "cannot draw a contour without values".to_string(),
            ));
        }

        let trace = Contour::new(figure.x_axis(), figure.y_axis(), figure.z_rows())
            .color_bar(ColorBar::new().title(Title::new(figure.colorbar_label())));

        let layout = Layout::new()
            .title(Title::new(figure.title()))
            .x_axis(Axis::new().title(Title::new(figure.x_label())))
            .y_axis(Axis::new().title(Title::new(figure.y_label())));

        let mut plot = Plot::new();
        plot.add_trace(trace);
        plot.set_layout(layout);
        Ok(plot)
    }
}
