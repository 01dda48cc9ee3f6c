//! Static Chart Renderer
//! Draws the consumer-choice chart into an RGB buffer with plotters and
//! writes it out as a PNG image.
//!
//! Layout:
//! 1. Caption centered at the top
//! 2. Axes starting at the origin, sized by the axis heuristic
//! 3. Extra indifference curves, optimum curve, budget line, optimal point
//! 4. Legend in the upper right corner

use crate::charts::{ChartData, DrawingContext};
use image::RgbImage;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const CURVE_BLUE: RGBColor = RGBColor(52, 152, 219);
const BUDGET_RED: RGBColor = RGBColor(231, 76, 60);
const OPTIMUM_GREEN: RGBColor = RGBColor(46, 204, 113);
const GUIDE_GRAY: RGBColor = RGBColor(150, 150, 150);

const FAMILY_COLORS: [RGBColor; 6] = [
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(26, 188, 156),
    RGBColor(233, 30, 99),
    RGBColor(121, 85, 72),
    RGBColor(96, 125, 139),
];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image size {0}x{1} has no pixels")]
    EmptySize(u32, u32),
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Image buffer does not match {0}x{1}")]
    Buffer(u32, u32),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn as_tuples(points: Vec<[f64; 2]>) -> Vec<(f64, f64)> {
    points.into_iter().map(|[x, y]| (x, y)).collect()
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart into an in-memory RGB image.
    pub fn render_image(
        data: &ChartData,
        ctx: &DrawingContext,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptySize(width, height));
        }
        let mut buffer = vec![255u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&ctx.title, ("sans-serif", 24))
                .margin(20)
                .x_label_area_size(45)
                .y_label_area_size(55)
                .build_cartesian_2d(0f64..data.axis.x_max, 0f64..data.axis.y_max)
                .map_err(draw_err)?;

            chart
                .configure_mesh()
                .x_desc("Good X")
                .y_desc("Good Y")
                .draw()
                .map_err(draw_err)?;

            for (i, curve) in data.family.iter().enumerate() {
                let color = FAMILY_COLORS[i % FAMILY_COLORS.len()];
                chart
                    .draw_series(LineSeries::new(
                        as_tuples(data.visible_points(&curve.points)),
                        color.stroke_width(1),
                    ))
                    .map_err(draw_err)?
                    .label(curve.label.clone())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }

            chart
                .draw_series(LineSeries::new(
                    as_tuples(data.visible_points(&data.optimum_curve.points)),
                    CURVE_BLUE.stroke_width(2),
                ))
                .map_err(draw_err)?
                .label(data.optimum_curve.label.clone())
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CURVE_BLUE));

            chart
                .draw_series(LineSeries::new(
                    as_tuples(data.budget_line.clone()),
                    BUDGET_RED.stroke_width(2),
                ))
                .map_err(draw_err)?
                .label(data.budget_label.clone())
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BUDGET_RED));

            let (ox, oy) = (data.optimum.x, data.optimum.y);
            if ctx.show_guides {
                chart
                    .draw_series(DashedLineSeries::new(
                        vec![(ox, 0.0), (ox, oy), (0.0, oy)],
                        6,
                        4,
                        GUIDE_GRAY.stroke_width(1),
                    ))
                    .map_err(draw_err)?;
            }

            chart
                .draw_series(std::iter::once(Circle::new(
                    (ox, oy),
                    6,
                    OPTIMUM_GREEN.filled(),
                )))
                .map_err(draw_err)?
                .label(format!("Optimum ({:.2}, {:.2})", ox, oy))
                .legend(|(x, y)| Circle::new((x + 10, y), 5, OPTIMUM_GREEN.filled()));

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.85))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(width, height))
    }

    /// Render the chart and save it as a PNG file.
    pub fn save_png(
        data: &ChartData,
        ctx: &DrawingContext,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let img = Self::render_image(data, ctx, width, height)?;
        img.save_with_format(path, image::ImageFormat::Png)?;
        info!(path = %path.display(), width, height, "Chart exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{BundleSolver, Constraint, Prices, SolverInput, UtilityParams};

    fn chart(extra_levels: Vec<f64>) -> (ChartData, DrawingContext) {
        let output = BundleSolver::solve(&SolverInput {
            utility: UtilityParams::new(0.5, 0.5),
            prices: Prices::new(2.0, 3.0),
            constraint: Constraint::budget(100.0),
            curve_points: 100,
        })
        .unwrap();
        let ctx = DrawingContext {
            extra_levels,
            ..Default::default()
        };
        let data = ChartData::build(&output, &ctx).unwrap();
        (data, ctx)
    }

    #[test]
    fn renders_requested_size() {
        let (data, ctx) = chart(vec![10.0, 30.0]);
        let img = StaticChartRenderer::render_image(&data, &ctx, 400, 300).unwrap();

        assert_eq!(img.dimensions(), (400, 300));
        // Something besides the white background was drawn.
        assert!(img.pixels().any(|p| p.0 != [255, 255, 255]));
    }

    #[test]
    fn rejects_empty_size() {
        let (data, ctx) = chart(Vec::new());
        for (width, height) in [(0, 300), (400, 0), (0, 0)] {
            let err = StaticChartRenderer::render_image(&data, &ctx, width, height).unwrap_err();
            assert!(matches!(err, RenderError::EmptySize(w, h) if (w, h) == (width, height)));
        }
    }

    #[test]
    fn save_png_writes_readable_file() {
        let (data, ctx) = chart(Vec::new());
        let file_name = format!("consumer_choice_{}.png", std::process::id());
        let path = std::env::temp_dir().join(file_name);

        StaticChartRenderer::save_png(&data, &ctx, &path, 320, 240).unwrap();
        let img = image::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!((img.width(), img.height()), (320, 240));
    }
}
