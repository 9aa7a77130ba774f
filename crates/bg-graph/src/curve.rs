//! Response curves shaping a utility curve's raw scalar.
//!
//! Hosts usually return raw quantities (distance, hunger, ammo count); the
//! response curve maps them onto comparable utility scores.

/// A scalar → scalar mapping.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseCurve {
    /// `y = x`.
    #[default]
    Identity,
    /// `y = slope * x + intercept`.
    Linear { slope: f64, intercept: f64 },
    /// `y = x ^ exponent`.  Negative `x` with a fractional exponent yields NaN.
    Exponential { exponent: f64 },
    /// `y = 1 / (1 + e^(-steepness * (x - midpoint)))`.
    Logistic { steepness: f64, midpoint: f64 },
    /// Piecewise-linear through `(x, y)` points with strictly increasing `x`.
    /// Inputs outside the first/last point take that point's `y`.
    Keyframes(Vec<(f64, f64)>),
}

impl ResponseCurve {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            ResponseCurve::Identity => x,
            ResponseCurve::Linear { slope, intercept } => slope * x + intercept,
            ResponseCurve::Exponential { exponent } => x.powf(*exponent),
            ResponseCurve::Logistic { steepness, midpoint } => {
                1.0 / (1.0 + (-steepness * (x - midpoint)).exp())
            }
            ResponseCurve::Keyframes(points) => keyframes(points, x),
        }
    }

    /// Reject parameters that cannot produce a meaningful score.
    pub fn check(&self) -> Result<(), String> {
        match self {
            ResponseCurve::Identity => Ok(()),
            ResponseCurve::Linear { slope, intercept } => finite(&[*slope, *intercept]),
            ResponseCurve::Exponential { exponent } => finite(&[*exponent]),
            ResponseCurve::Logistic { steepness, midpoint } => finite(&[*steepness, *midpoint]),
            ResponseCurve::Keyframes(points) => {
                if points.is_empty() {
                    return Err("keyframe curve has no points".into());
                }
                for &(x, y) in points {
                    finite(&[x, y])?;
                }
                if points.windows(2).any(|w| w[1].0 <= w[0].0) {
                    return Err("keyframe x values must be strictly increasing".into());
                }
                Ok(())
            }
        }
    }
}

fn finite(values: &[f64]) -> Result<(), String> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(format!("non-finite parameter {v}")),
        None => Ok(()),
    }
}

/// Assumes `points` passed [`ResponseCurve::check`].
fn keyframes(points: &[(f64, f64)], x: f64) -> f64 {
    let Some(&(first_x, first_y)) = points.first() else {
        return f64::NAN;
    };
    if x <= first_x {
        return first_y;
    }
    for w in points.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        if x <= x1 {
            let t = (x - x0) / (x1 - x0);
            return y0 + t * (y1 - y0);
        }
    }
    points.last().map_or(f64::NAN, |&(_, y)| y)
}
