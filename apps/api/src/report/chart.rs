//! Radar ("performance snapshot") chart rendering.
//!
//! Draws the three averaged sub-scores as a closed polygon on a polar grid
//! and writes the result as a PNG for embedding into the report PDF. Axis
//! labels and values are rendered next to the image by the PDF layer, so
//! the bitmap itself carries no text.

use std::path::Path;

use plotters::prelude::*;

use crate::report::ReportError;
use crate::scores::ScoreSet;

/// Rendered bitmap is square, CHART_SIZE x CHART_SIZE pixels.
pub const CHART_SIZE: u32 = 600;
const MAX_SCORE: f64 = 10.0;
const GRID_RINGS: u32 = 5;

const ACCENT: RGBColor = RGBColor(74, 144, 226); // #4A90E2
const GRID: RGBColor = RGBColor(200, 200, 200);

/// Renders the radar chart for the per-category score averages.
pub fn render_radar_chart(averages: &[f64; 3], path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let root = BitMapBackend::new(path, (CHART_SIZE, CHART_SIZE)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let center = (CHART_SIZE as i32 / 2, CHART_SIZE as i32 / 2);
    let radius = CHART_SIZE as f64 / 2.0 * 0.8;

    // Grid: one ring per two score points, plus a spoke per category axis.
    for ring in 1..=GRID_RINGS {
        let r = radius * ring as f64 / GRID_RINGS as f64;
        root.draw(&Circle::new(
            center,
            r as i32,
            ShapeStyle::from(&GRID).stroke_width(1),
        ))
        .map_err(chart_err)?;
    }
    for axis in 0..ScoreSet::AXIS_LABELS.len() {
        root.draw(&PathElement::new(
            vec![center, polar_point(center, radius, axis)],
            ShapeStyle::from(&GRID).stroke_width(1),
        ))
        .map_err(chart_err)?;
    }

    // Score polygon, closed back to its first point. Out-of-range values
    // are clipped at the outer ring for drawing only; parsing stays
    // unclamped.
    let mut points: Vec<(i32, i32)> = averages
        .iter()
        .enumerate()
        .map(|(axis, &score)| {
            let ratio = (score / MAX_SCORE).clamp(0.0, 1.0);
            polar_point(center, radius * ratio, axis)
        })
        .collect();
    points.push(points[0]);

    root.draw(&Polygon::new(points.clone(), ACCENT.mix(0.2).filled()))
        .map_err(chart_err)?;
    root.draw(&PathElement::new(
        points.clone(),
        ShapeStyle::from(&ACCENT).stroke_width(2),
    ))
    .map_err(chart_err)?;
    for &point in &points[..points.len() - 1] {
        root.draw(&Circle::new(point, 4, ACCENT.filled()))
            .map_err(chart_err)?;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Axis 0 points straight up; the remaining axes proceed clockwise at
/// equal angles.
fn polar_point(center: (i32, i32), r: f64, axis: usize) -> (i32, i32) {
    let step = 2.0 * std::f64::consts::PI / ScoreSet::AXIS_LABELS.len() as f64;
    let angle = -std::f64::consts::FRAC_PI_2 + axis as f64 * step;
    (
        (center.0 as f64 + r * angle.cos()).round() as i32,
        (center.1 as f64 + r * angle.sin()).round() as i32,
    )
}

fn chart_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}
