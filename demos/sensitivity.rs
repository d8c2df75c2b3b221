use lipidsol::prelude::sweep::*;
use lipidsol::*;

fn main() -> Result<(), LipidsolError> {
    let model = IntestinalDigestion::default();
    let config = SweepConfig {
        progress: true,
        ..SweepConfig::default()
    };

    let result = run_sweep(&model, &config)?;
    println!("{:#?}", result.values());
    for failure in result.failures() {
        println!(
            "c_oil = {:.3} mM, D0 = {:.3e} cm failed: {}",
            failure.c_oil, failure.d0, failure.error
        );
    }

    let figure = result.contour_figure()?;

    #[cfg(feature = "plotly")]
    {
        use lipidsol::plot::PlotlyRenderer;
        let html = PlotlyRenderer::new()
            .with_div_id("sensitivity")
            .to_inline_html(&figure)?;
        std::fs::write("sensitivity.html", html)
            .map_err(|e| LipidsolError::RenderError(e.to_string()))?;
        println!("Figure written to sensitivity.html");
    }
    #[cfg(not(feature = "plotly"))]
    println!(
        "{}: {} x {} grid, enable the `plotly` feature to render it",
        figure.title(),
        figure.x_axis().len(),
        figure.y_axis().len()
    );

    Ok(())
}
