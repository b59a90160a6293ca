//! Relevance scoring between a query vector and stored rows.

use std::f32::consts::SQRT_2;

use crate::config::DistanceKind;

fn norm(a: &[f32]) -> f32 {
    a.iter().map(|x| x * x).sum::<f32>().sqrt()
}

pub fn cosine_sim(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let (mag_a, mag_b) = (norm(a), norm(b));
    if mag_a < f32::EPSILON || mag_b < f32::EPSILON {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

/// Squared euclidean distance after scaling both vectors to unit length.
///
/// Lies in `[0, 4]`; mismatched or zero vectors count as orthogonal (2).
fn unit_sq_l2(a: &[f32], b: &[f32]) -> f32 {
    let (mag_a, mag_b) = (norm(a), norm(b));
    if a.len() != b.len() || mag_a < f32::EPSILON || mag_b < f32::EPSILON {
        return 2.0;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x / mag_a - y / mag_b;
            d * d
        })
        .sum()
}

/// Relevance in `[0, 1]`, higher is closer.
///
/// For [`DistanceKind::L2`] this is `1 - d² / sqrt(2)`, which on unit vectors
/// equals `1 - sqrt(2) * (1 - cos)`: a score of 0.5 needs cosine ≈ 0.646.
pub fn relevance(kind: DistanceKind, a: &[f32], b: &[f32]) -> f32 {
    let raw = match kind {
        DistanceKind::L2 => 1.0 - unit_sq_l2(a, b) / SQRT_2,
        DistanceKind::Cosine => cosine_sim(a, b),
    };
    if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
}

/// Rounds to two decimals.
pub fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}
