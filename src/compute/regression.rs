//! Ordinary least squares line fitting.

use serde::{Deserialize, Serialize};

use crate::schema::DataPoint;

/// Fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// End points of the fitted line across `[min_x, max_x]`.
    pub fn segment(&self, min_x: f64, max_x: f64) -> [(f64, f64); 2] {
        [(min_x, self.predict(min_x)), (max_x, self.predict(max_x))]
    }
}

/// Closed-form least squares fit.
///
/// Empty input returns a zero line. With fewer than two points or no
/// variance in x the result is not meaningful (typically NaN or infinite);
/// callers should require at least two points.
pub fn linear_regression(points: &[DataPoint]) -> LinearFit {
    if points.is_empty() {
        return LinearFit::default();
    }

    let n = points.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_x2) =
        points
            .iter()
            .fold((0.0, 0.0, 0.0, 0.0), |(sx, sy, sxy, sx2), p| {
                (sx + p.x, sy + p.y, sxy + p.x * p.y, sx2 + p.x * p.x)
            });

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    LinearFit { slope, intercept }
}

/// Fits over every prefix of length 2..=n, in order.
///
/// Drives the animation where points appear one at a time and the line
/// settles as data accumulates.
pub fn progressive_fits(points: &[DataPoint]) -> Vec<LinearFit> {
    (2..=points.len())
        .map(|len| linear_regression(&points[..len]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataRng;

    fn points(coords: &[(f64, f64)]) -> Vec<DataPoint> {
        coords.iter().map(|&(x, y)| DataPoint::new(x, y)).collect()
    }

    #[test]
    fn test_identity_line() {
        let fit = linear_regression(&points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]));
        assert!((fit.slope - 1.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
    }

    #[test]
    fn test_offset_line() {
        let fit = linear_regression(&points(&[(0.0, 3.0), (2.0, -1.0), (4.0, -5.0)]));
        assert!((fit.slope + 2.0).abs() < 1e-12);
        assert!((fit.intercept - 3.0).abs() < 1e-12);
        assert!((fit.predict(1.0) - 1.0).abs() < 1e-12);
        assert_eq!(fit.segment(0.0, 4.0)[1], (4.0, fit.predict(4.0)));
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        assert_eq!(linear_regression(&[]), LinearFit::default());

        let single = linear_regression(&points(&[(3.0, 4.0)]));
        assert!(!single.slope.is_finite());

        let vertical = linear_regression(&points(&[(1.0, 0.0), (1.0, 5.0)]));
        assert!(!vertical.slope.is_finite());
    }

    #[test]
    fn test_noisy_data_recovers_trend() {
        let mut rng = DataRng::new(21);
        let data = rng.linear_data(100, 2.0);
        let fit = linear_regression(&data);
        assert!((fit.slope - 1.0).abs() < 0.1);
        assert!(fit.intercept.abs() < 4.0);
    }

    #[test]
    fn test_progressive_fits() {
        let data = points(&[(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        let fits = progressive_fits(&data);
        assert_eq!(fits.len(), 3);
        for fit in &fits {
            assert!((fit.slope - 2.0).abs() < 1e-12);
        }
        assert!(progressive_fits(&data[..1]).is_empty());
    }
}
