//! Utility curve scoring and winner selection.
//!
//! Every tick, each curve's scalar is fetched from the host, shaped by its
//! response curve, and clamped.  The strictly greatest score wins; ties go
//! to the curve declared first.  Curves that fail to score (unbound
//! callable, host error, NaN) are left out of the comparison.

use crate::Curve;

/// Score one curve against the host.
pub fn score<H>(curve: &Curve<H>, host: &mut H) -> Result<f64, String> {
    let raw = match &curve.score {
        Ok(bound) => bound.invoke(host).map_err(|e| e.to_string())?,
        Err(e) => return Err(e.to_string()),
    };
    let mut value = curve.response.apply(raw);
    if let Some((lo, hi)) = curve.clamp {
        value = value.clamp(lo, hi);
    }
    if value.is_nan() {
        return Err(format!("curve `{}` scored NaN (raw {raw})", curve.name));
    }
    Ok(value)
}

/// Index of the strictly greatest score; first declared wins ties.
pub fn pick_winner(scores: &[Option<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in scores.iter().enumerate() {
        let Some(v) = *s else { continue };
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Score every curve and pick the winner.
///
/// Returns the winner and the first failure, if any curve failed.
pub(crate) fn select<H>(curves: &[Curve<H>], host: &mut H) -> (Option<usize>, Option<String>) {
    let mut failure = None;
    let scores: Vec<Option<f64>> = curves
        .iter()
        .map(|c| match score(c, host) {
            Ok(v) => Some(v),
            Err(cause) => {
                failure.get_or_insert(cause);
                None
            }
        })
        .collect();
    (pick_winner(&scores), failure)
}
