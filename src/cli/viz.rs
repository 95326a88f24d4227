//! Terminal visualization using braille graphics
//!
//! Renders the cost composition as a stacked bar and the correlation scenario
//! as a scatter plot with its regression line, using Unicode braille
//! characters via `drawille`.

use drawille::Canvas;

use crate::core::landed_cost::CostBreakdown;
use crate::core::regression::RegressionStats;
use crate::core::scenario::ScenarioPoint;

/// Default canvas size for the scatter plot, in braille dots
pub const PLOT_WIDTH: u32 = 120;
pub const PLOT_HEIGHT: u32 = 48;

/// Default width of the cost bar, in characters
pub const BAR_WIDTH: usize = 60;

/// Fill glyph per component, in `CostBreakdown::components` order
const BAR_GLYPHS: [char; 7] = ['█', '▓', '▒', '░', '▚', '▞', '▪'];

/// Render the stacked cost-composition bar with a legend
///
/// # Example Output
/// ```text
///   ████████████████████████████▓▓▓▓▓▓░░░░░░░░░░▚▚▪▪▪▪
///   █ CIF 52.1%  ▓ Duty 15.6%  ...
/// ```
pub fn render_cost_bar(breakdown: &CostBreakdown, width: usize) -> String {
    let components = breakdown.components();
    let total: f64 = components.iter().map(|(_, v)| v.max(0.0)).sum();
    if !(total.is_finite() && total > 0.0) {
        return "  (no cost to chart)".to_string();
    }

    // Largest-remainder allocation keeps the bar exactly `width` wide
    let exact: Vec<f64> = components
        .iter()
        .map(|(_, v)| v.max(0.0) / total * width as f64)
        .collect();
    let mut cells: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();
    let mut remaining = width.saturating_sub(cells.iter().sum());
    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| (exact[b] - exact[b].floor()).total_cmp(&(exact[a] - exact[a].floor())));
    for idx in order {
        if remaining == 0 {
            break;
        }
        cells[idx] += 1;
        remaining -= 1;
    }

    let mut bar = String::from("  ");
    for (glyph, count) in BAR_GLYPHS.iter().zip(&cells) {
        bar.extend(std::iter::repeat(*glyph).take(*count));
    }

    let legend: Vec<String> = components
        .iter()
        .zip(BAR_GLYPHS.iter())
        .filter(|((_, v), _)| *v > 0.0)
        .map(|((name, v), glyph)| format!("{} {} {:.1}%", glyph, name, v / total * 100.0))
        .collect();

    format!("{}\n  {}", bar, legend.join("  "))
}

/// Render scenario points and the regression line on a braille canvas
pub fn render_scatter(
    points: &[ScenarioPoint],
    stats: &RegressionStats,
    width: u32,
    height: u32,
) -> String {
    if points.is_empty() {
        return "  (no points)".to_string();
    }

    let (x_min, x_max) = bounds(points.iter().map(|p| p.x));
    let line_ends = [stats.predict(x_min), stats.predict(x_max)];
    let (y_min, y_max) = bounds(points.iter().map(|p| p.y).chain(line_ends));

    let max_col = width.saturating_sub(1);
    let max_row = height.saturating_sub(1);
    let to_col = |x: f64| scale(x, x_min, x_max, max_col);
    // Canvas rows grow downward
    let to_row = |y: f64| max_row - scale(y, y_min, y_max, max_row);

    let mut canvas = Canvas::new(width, height);
    for p in points {
        canvas.set(to_col(p.x), to_row(p.y));
    }
    canvas.line(
        to_col(x_min),
        to_row(line_ends[0]),
        to_col(x_max),
        to_row(line_ends[1]),
    );

    let mut output = canvas.frame();
    output.push_str(&format!(
        "\n  x: {:.2} .. {:.2}   y: {:.2} .. {:.2}",
        x_min, x_max, y_min, y_max
    ));
    output
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

fn scale(value: f64, lo: f64, hi: f64, max: u32) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    (t * max as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::landed_cost::{calculate, CostInputs};
    use crate::core::regression::regress;

    #[test]
    fn test_cost_bar_width() {
        let breakdown = calculate(&CostInputs::sample());
        let rendered = render_cost_bar(&breakdown, BAR_WIDTH);
        let bar = rendered.lines().next().unwrap();
        assert_eq!(bar.trim_start().chars().count(), BAR_WIDTH);
        assert!(rendered.contains("CIF"));
        assert!(rendered.contains("VAT"));
    }

    #[test]
    fn test_cost_bar_empty() {
        let breakdown = calculate(&CostInputs {
            fob_usd: 0.0,
            ..CostInputs::default()
        });
        assert!(render_cost_bar(&breakdown, BAR_WIDTH).contains("no cost"));
    }

    #[test]
    fn test_scatter_renders() {
        let points: Vec<ScenarioPoint> = (0..10)
            .map(|i| ScenarioPoint {
                x: i as f64,
                y: 2.0 * i as f64 + 1.0,
                z: 0.0,
            })
            .collect();
        let pairs: Vec<(f64, f64)> = points.iter().map(ScenarioPoint::as_pair).collect();
        let stats = regress(&pairs);
        let rendered = render_scatter(&points, &stats, 40, 16);
        assert!(rendered.contains("x: 0.00 .. 9.00"));
        assert!(rendered.lines().count() > 2);
    }

    #[test]
    fn test_scatter_empty() {
        let stats = regress(&[]);
        assert_eq!(render_scatter(&[], &stats, 40, 16), "  (no points)");
    }

    #[test]
    fn test_bounds_degenerate() {
        assert_eq!(bounds([5.0, 5.0].into_iter()), (4.0, 6.0));
        assert_eq!(bounds(std::iter::empty()), (0.0, 1.0));
    }
}
