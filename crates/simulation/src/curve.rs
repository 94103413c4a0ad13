//! Road centreline as a pure function of longitudinal position.
//!
//! The road is a sum of three long-wavelength sines. Every positioned entity
//! asks [`curve_offset`] for the centre X at its Z and [`curve_heading`] for
//! the tangent direction.

use crate::config::{CURVE_TERMS, HEADING_STEP};

/// Lateral offset of the road centre at `z`.
#[inline]
pub fn curve_offset(z: f32) -> f32 {
    CURVE_TERMS
        .iter()
        .map(|&(amplitude, frequency, phase)| amplitude * (frequency * z + phase).sin())
        .sum()
}

/// Tangent angle of the centreline at `z`, from a symmetric finite difference.
///
/// Zero means the road runs straight along Z; positive angles lean toward +X
/// as Z grows.
#[inline]
pub fn curve_heading(z: f32) -> f32 {
    let dx = curve_offset(z + HEADING_STEP) - curve_offset(z - HEADING_STEP);
    dx.atan2(2.0 * HEADING_STEP)
}

/// Analytic `d(curve_offset)/dz`.
pub fn curve_slope(z: f32) -> f32 {
    CURVE_TERMS
        .iter()
        .map(|&(amplitude, frequency, phase)| amplitude * frequency * (frequency * z + phase).cos())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_is_deterministic() {
        for z in [-5000.0, -123.4, 0.0, 17.0, 999.0] {
            assert_eq!(curve_offset(z), curve_offset(z));
        }
    }

    #[test]
    fn test_curve_at_origin() {
        let expected = 12.0 * 1.3f32.sin() + 4.0 * 0.7f32.sin();
        assert!((curve_offset(0.0) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_curve_is_continuous() {
        let mut z = -3000.0;
        while z < 3000.0 {
            let step = (curve_offset(z + 0.01) - curve_offset(z)).abs();
            assert!(step < 0.01, "jump of {step} at z={z}");
            z += 7.3;
        }
    }

    #[test]
    fn test_heading_matches_analytic_slope() {
        let mut z = -2000.0;
        while z < 2000.0 {
            let analytic = curve_slope(z).atan();
            let numeric = curve_heading(z);
            assert!(
                (analytic - numeric).abs() < 2e-3,
                "heading mismatch at z={z}: {numeric} vs {analytic}"
            );
            z += 11.0;
        }
    }

    #[test]
    fn test_curve_stays_within_amplitude_sum() {
        let bound: f32 = CURVE_TERMS.iter().map(|t| t.0).sum();
        let mut z = -10_000.0;
        while z < 10_000.0 {
            assert!(curve_offset(z).abs() <= bound + 1e-3);
            z += 13.0;
        }
    }
}
