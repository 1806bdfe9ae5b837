//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - selected points: `#`
//! - fitted curve: `-` line (broken where it leaves the window)

use crate::domain::PlotBounds;
use crate::session::FitSession;

/// Render the session's points and current curve.
pub fn render_ascii_plot(session: &FitSession, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let bounds = PlotBounds::from_points(session.points()).unwrap_or(PlotBounds {
        x: [0.0, 10.0],
        y: [0.0, 1.0],
    });
    let curve = session.curve_samples(bounds.sample_domain(width));

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so points can overlay).
    draw_curve(&mut grid, &curve, &bounds);

    for (i, p) in session.points().iter().enumerate() {
        let x = map_x(p.x, bounds.x, width);
        let y = map_y(p.y, bounds.y, height);
        grid[y][x] = if session.is_selected(i) { '#' } else { 'o' };
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}] | {}\n",
        bounds.x[0],
        bounds.x[1],
        bounds.y[0],
        bounds.y[1],
        session.formula()
    ));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out
}

fn map_x(x: f64, range: [f64; 2], width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - range[0]) / (range[1] - range[0])).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, range: [f64; 2], height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - range[0]) / (range[1] - range[0])).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], bounds: &PlotBounds) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !(y.is_finite() && y >= bounds.y[0] && y <= bounds.y[1]) {
            prev = None;
            continue;
        }
        let cx = map_x(x, bounds.x, width);
        let cy = map_y(y, bounds.y, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, cx, cy, '-');
        } else {
            grid[cy][cx] = '-';
        }
        prev = Some((cx, cy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    #[test]
    fn plot_golden_snapshot_small() {
        let points = vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(4.0, 0.0)];
        let mut session = FitSession::new(points, 2).unwrap();
        session.set_selection([1]).unwrap();

        let txt = render_ascii_plot(&session, 13, 5);
        let expected = concat!(
            "Plot: x=[-1.000, 5.000] | y=[-5.000, 5.000] | 0\n",
            "\n",
            "\n",
            "--o---#---o--\n",
            "\n",
            "\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn curve_outside_the_window_is_not_drawn() {
        // y = 10x leaves the y window near both x edges.
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 10.0), Point::new(2.0, 20.0)];
        let session = FitSession::new(points, 1).unwrap();

        let txt = render_ascii_plot(&session, 12, 7);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(
            rows,
            vec![
                "         -",
                "        o",
                "       -",
                "     -o",
                "    -",
                "   o",
                "  -",
            ]
        );
    }
}
