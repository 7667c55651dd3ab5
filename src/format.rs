//! # Formatting
//! Functions which turn raw procedure values into strings for display.

/// Placeholder shown for altitudes and speeds which have no value.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Selects the compass letters used by `format_coordinate`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    /// North/south, uses `N` and `S`.
    Latitude,
    /// East/west, uses `E` and `W`.
    Longitude,
}

impl Axis {
    fn direction(self, value: f64) -> char {
        let non_negative = value >= 0.0;
        match (self, non_negative) {
            (Self::Latitude, true) => 'N',
            (Self::Latitude, false) => 'S',
            (Self::Longitude, true) => 'E',
            (Self::Longitude, false) => 'W',
        }
    }
}

/// Format a coordinate in decimal degrees with a compass direction.
/// Values are not range checked.
///
/// # Example
/// ```rust
/// use afpd::{format_coordinate, Axis};
/// assert_eq!(format_coordinate(-33.946111, Axis::Latitude), "33.946111° S");
/// assert_eq!(format_coordinate(151.177222, Axis::Longitude), "151.177222° E");
/// ```
pub fn format_coordinate(value: f64, axis: Axis) -> String {
    format!("{:.6}° {}", value.abs(), axis.direction(value))
}

/// Format an altitude in feet, with thousands separators.
/// Returns "Not specified" for a missing, zero or NaN altitude.
pub fn format_altitude(value: Option<f64>) -> String {
    match specified(value) {
        Some(feet) => format!("{} ft", group_thousands(feet)),
        None => NOT_SPECIFIED.to_owned(),
    }
}

/// Format a speed in knots.
/// Returns "Not specified" for a missing, zero or NaN speed.
pub fn format_speed(value: Option<f64>) -> String {
    match specified(value) {
        Some(knots) => format!("{} kts", knots),
        None => NOT_SPECIFIED.to_owned(),
    }
}

/// Zero and NaN count as "no value".
pub(crate) fn specified(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Render a number with `,` between groups of three integer digits and at
/// most three fractional digits, dropping trailing zeros.
fn group_thousands(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }

    // Ties round away from zero; `{:.3}` alone would round them to even.
    let scaled = (value.abs() * 1000.0).round() / 1000.0;
    let rounded = if scaled.is_finite() { scaled } else { value.abs() };
    let fixed = format!("{:.3}", rounded);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    // Rounding may leave "-0.000", which is shown without a sign.
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        grouped.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Format a procedure type code such as `STANDARD_ARRIVAL` for display.
///
/// Only the first underscore becomes a space. The string is lowercased and
/// then every word is capitalised, where a word is a run of ASCII letters,
/// digits and underscores.
///
/// # Example
/// ```rust
/// use afpd::format_procedure_type;
/// assert_eq!(format_procedure_type("STANDARD_ARRIVAL"), "Standard Arrival");
/// ```
pub fn format_procedure_type(kind: &str) -> String {
    let lowered = kind.replacen('_', " ", 1).to_lowercase();

    let mut formatted = String::with_capacity(lowered.len());
    let mut prev_is_word = false;
    for c in lowered.chars() {
        let is_word = is_word_char(c);
        if is_word && !prev_is_word {
            formatted.push(c.to_ascii_uppercase());
        } else {
            formatted.push(c);
        }
        prev_is_word = is_word;
    }
    formatted
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coordinate_direction_follows_sign() {
        assert!(format_coordinate(12.5, Axis::Latitude).ends_with('N'));
        assert!(format_coordinate(0.0, Axis::Latitude).ends_with('N'));
        assert!(format_coordinate(-0.0, Axis::Latitude).ends_with('N'));
        assert!(format_coordinate(-12.5, Axis::Latitude).ends_with('S'));
        assert!(format_coordinate(12.5, Axis::Longitude).ends_with('E'));
        assert!(format_coordinate(-12.5, Axis::Longitude).ends_with('W'));
    }

    #[test]
    fn coordinate_uses_six_decimals_of_absolute_value() {
        assert_eq!(format_coordinate(-1.5, Axis::Longitude), "1.500000° W");
        assert_eq!(format_coordinate(51.4700221, Axis::Latitude), "51.470022° N");
    }

    #[test]
    fn coordinate_out_of_range_is_still_formatted() {
        assert_eq!(format_coordinate(200.0, Axis::Longitude), "200.000000° E");
        assert_eq!(format_coordinate(f64::NAN, Axis::Latitude), "NaN° S");
    }

    #[test]
    fn altitude_missing_or_zero_is_not_specified() {
        assert_eq!(format_altitude(None), "Not specified");
        assert_eq!(format_altitude(Some(0.0)), "Not specified");
        assert_eq!(format_altitude(Some(f64::NAN)), "Not specified");
    }

    #[test]
    fn altitude_is_grouped() {
        assert_eq!(format_altitude(Some(1000.0)), "1,000 ft");
        assert_eq!(format_altitude(Some(500.0)), "500 ft");
        assert_eq!(format_altitude(Some(12500.0)), "12,500 ft");
        assert_eq!(format_altitude(Some(1234567.0)), "1,234,567 ft");
        assert_eq!(format_altitude(Some(-1500.0)), "-1,500 ft");
    }

    #[test]
    fn altitude_fraction_is_rounded_to_three_digits() {
        assert_eq!(format_altitude(Some(1500.5)), "1,500.5 ft");
        assert_eq!(format_altitude(Some(2000.12345)), "2,000.123 ft");
        assert_eq!(format_altitude(Some(999.9999)), "1,000 ft");
    }

    #[test]
    fn altitude_fraction_ties_round_away_from_zero() {
        assert_eq!(format_altitude(Some(1000.0625)), "1,000.063 ft");
        assert_eq!(format_altitude(Some(-1000.0625)), "-1,000.063 ft");
        assert_eq!(format_altitude(Some(0.0625)), "0.063 ft");
    }

    #[test]
    fn speed_formatting() {
        assert_eq!(format_speed(None), "Not specified");
        assert_eq!(format_speed(Some(0.0)), "Not specified");
        assert_eq!(format_speed(Some(250.0)), "250 kts");
        assert_eq!(format_speed(Some(185.5)), "185.5 kts");
    }

    #[test]
    fn procedure_type_capitalises_each_word() {
        assert_eq!(format_procedure_type("STANDARD_ARRIVAL"), "Standard Arrival");
        assert_eq!(format_procedure_type("APPROACH"), "Approach");
        assert_eq!(format_procedure_type("sid"), "Sid");
        assert_eq!(format_procedure_type(""), "");
    }

    #[test]
    fn procedure_type_replaces_only_first_underscore() {
        assert_eq!(format_procedure_type("A_B_C"), "A B_c");
        assert_eq!(
            format_procedure_type("RNAV_GNSS_APPROACH"),
            "Rnav Gnss_approach"
        );
    }

    #[test]
    fn procedure_type_capitalises_after_punctuation() {
        assert_eq!(format_procedure_type("ils-dme RWY07"), "Ils-Dme Rwy07");
    }
}
