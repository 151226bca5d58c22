//! Piecewise-linear curves.
//!
//! Used for the condition multiplier and the thermal benefit mapping.
//! Inputs outside the defined points clamp to the nearest end value.

use serde::Deserialize;

/// One breakpoint of a [`Curve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Input value.
    pub x: f64,
    /// Output value at `x`.
    pub y: f64,
}

/// A piecewise-linear function defined by sorted breakpoints.
///
/// Deserializes from a list of `[x, y]` pairs in any order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<(f64, f64)>")]
pub struct Curve {
    points: Vec<CurvePoint>,
}

impl Curve {
    /// Build a curve from `(x, y)` pairs.
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut points: Vec<CurvePoint> = points
            .into_iter()
            .map(|(x, y)| CurvePoint { x, y })
            .collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { points }
    }

    /// Breakpoints in ascending `x` order.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Evaluate the curve at `x`.
    ///
    /// An empty curve evaluates to 0.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }
        for pair in self.points.windows(2) {
            let [a, b] = pair else { continue };
            if x <= b.x {
                let width = b.x - a.x;
                if width <= 0.0 {
                    return b.y;
                }
                let t = (x - a.x) / width;
                return t.mul_add(b.y - a.y, a.y);
            }
        }
        last.y
    }
}

impl From<Vec<(f64, f64)>> for Curve {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points)
    }
}
