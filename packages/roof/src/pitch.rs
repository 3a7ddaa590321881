//! Pitch parsing and pitch-adjusted area.

use roofdesk_roof_models::Pitch;

/// Rise used when a pitch string has no readable rise.
pub const DEFAULT_RISE: f64 = 4.0;

/// Run used when a pitch string has no readable run.
pub const DEFAULT_RUN: f64 = 12.0;

/// Square feet per roofing square.
pub const SQFT_PER_SQUARE: f64 = 100.0;

/// Parses `"rise/run"`, `"rise:run"` or a bare rise (run of 12).
///
/// Each side falls back to its default on its own, so `"x/10"` reads as
/// `4/10` and an empty string reads as `4/12`. Sides are read leniently:
/// `"6/12 pitch"` reads as `6/12`.
#[must_use]
pub fn parse_pitch(pitch: &str) -> Pitch {
    let normalized = pitch.trim().replace(':', "/");
    if normalized.is_empty() {
        return Pitch::default();
    }

    match normalized.split_once('/') {
        Some((rise, run)) => Pitch {
            rise: leading_number(rise).unwrap_or(DEFAULT_RISE),
            run: leading_number(run).unwrap_or(DEFAULT_RUN),
        },
        None => Pitch {
            rise: leading_number(&normalized).unwrap_or(DEFAULT_RISE),
            run: DEFAULT_RUN,
        },
    }
}

/// Reads the longest numeric prefix of `s` (after leading whitespace).
///
/// Returns `None` when `s` does not start with a number.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Plan-to-surface multiplier `sqrt(1 + (rise/run)^2)`.
///
/// A zero run is treated as flat and returns `1`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn calculate_pitch_factor(rise: f64, run: f64) -> f64 {
    if run == 0.0 {
        return 1.0;
    }
    let slope = rise / run;
    slope.mul_add(slope, 1.0).sqrt()
}

/// Pitch angle in degrees. A zero run returns `0`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn calculate_pitch_angle(rise: f64, run: f64) -> f64 {
    if run == 0.0 {
        return 0.0;
    }
    (rise / run).atan().to_degrees()
}

/// Sloped roof area for a plan area and pitch string.
#[must_use]
pub fn calculate_surface_area(plan_area: f64, pitch: &str) -> f64 {
    let Pitch { rise, run } = parse_pitch(pitch);
    plan_area * calculate_pitch_factor(rise, run)
}

/// Plan area in roofing squares.
#[must_use]
pub fn calculate_plan_squares(plan_area: f64) -> f64 {
    plan_area / SQFT_PER_SQUARE
}

/// Surface area in roofing squares.
#[must_use]
pub fn calculate_surface_squares(plan_area: f64, pitch: &str) -> f64 {
    calculate_surface_area(plan_area, pitch) / SQFT_PER_SQUARE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn pitch(rise: f64, run: f64) -> Pitch {
        Pitch { rise, run }
    }

    #[test]
    fn parses_pitch_forms() {
        assert_eq!(parse_pitch("4/12"), pitch(4.0, 12.0));
        assert_eq!(parse_pitch("6:12"), pitch(6.0, 12.0));
        assert_eq!(parse_pitch("8"), pitch(8.0, 12.0));
        assert_eq!(parse_pitch(""), pitch(4.0, 12.0));
        assert_eq!(parse_pitch("x/10"), pitch(4.0, 10.0));
    }

    #[test]
    fn parse_pitch_falls_back_per_side() {
        assert_eq!(parse_pitch("7/abc"), pitch(7.0, 12.0));
        assert_eq!(parse_pitch("/"), pitch(4.0, 12.0));
        assert_eq!(parse_pitch("steep"), pitch(4.0, 12.0));
        assert_eq!(parse_pitch("   "), pitch(4.0, 12.0));
    }

    #[test]
    fn parse_pitch_reads_leading_numbers() {
        assert_eq!(parse_pitch(" 6/12 pitch"), pitch(6.0, 12.0));
        assert_eq!(parse_pitch("9.5:12"), pitch(9.5, 12.0));
        assert_eq!(parse_pitch(".5/12"), pitch(0.5, 12.0));
        assert_eq!(parse_pitch("0/12"), pitch(0.0, 12.0));
        assert_eq!(parse_pitch("12in/12ft"), pitch(12.0, 12.0));
    }

    #[test]
    fn leading_number_edge_cases() {
        assert_eq!(leading_number("1e2x"), Some(100.0));
        assert_eq!(leading_number("3e"), Some(3.0));
        assert_eq!(leading_number("-2"), Some(-2.0));
        assert_eq!(leading_number("."), None);
        assert_eq!(leading_number("-"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn pitch_factor_values() {
        assert!(approx_eq(calculate_pitch_factor(0.0, 12.0), 1.0, 1e-12));
        assert!(approx_eq(
            calculate_pitch_factor(12.0, 12.0),
            std::f64::consts::SQRT_2,
            1e-12
        ));
        assert!(approx_eq(calculate_pitch_factor(12.0, 12.0), 1.41421, 1e-5));
        assert!(approx_eq(calculate_pitch_factor(6.0, 0.0), 1.0, 1e-12));
        // 6/12 -> sqrt(1.25)
        assert!(approx_eq(calculate_pitch_factor(6.0, 12.0), 1.118_034, 1e-6));
    }

    #[test]
    fn pitch_angle_values() {
        assert!(approx_eq(calculate_pitch_angle(12.0, 12.0), 45.0, 1e-9));
        assert!(approx_eq(calculate_pitch_angle(0.0, 12.0), 0.0, 1e-12));
        assert!(approx_eq(calculate_pitch_angle(5.0, 0.0), 0.0, 1e-12));
        assert!(approx_eq(calculate_pitch_angle(4.0, 12.0), 18.434_949, 1e-6));
    }

    #[test]
    fn surface_area_and_squares() {
        assert!(approx_eq(calculate_surface_area(2_000.0, "0/12"), 2_000.0, 1e-9));
        assert!(approx_eq(
            calculate_surface_area(2_000.0, "12/12"),
            2_000.0 * std::f64::consts::SQRT_2,
            1e-9
        ));
        assert!(approx_eq(calculate_plan_squares(2_450.0), 24.5, 1e-12));
        assert!(approx_eq(
            calculate_surface_squares(2_000.0, "12:12"),
            20.0 * std::f64::consts::SQRT_2,
            1e-9
        ));
        // Unparseable pitch falls back to 4/12.
        assert!(approx_eq(
            calculate_surface_area(1_000.0, "bogus"),
            1_000.0 * calculate_pitch_factor(4.0, 12.0),
            1e-9
        ));
    }
}
