//! The built-in demonstration dataset.

use crate::domain::Point;

const REFERENCE_X: [f64; 5] = [1.0, 3.0, 4.0, 7.0, 9.0];
const REFERENCE_Y: [f64; 5] = [1.0, 6.0, 1.0, 8.0, 20.0];

/// Five points whose linear fit leaves a visibly large error, so raising the
/// degree has something to show.
pub fn reference_points() -> Vec<Point> {
    REFERENCE_X
        .iter()
        .zip(REFERENCE_Y.iter())
        .map(|(&x, &y)| Point::new(x, y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_points_are_in_order() {
        let points = reference_points();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], Point::new(1.0, 1.0));
        assert_eq!(points[4], Point::new(9.0, 20.0));
    }
}
