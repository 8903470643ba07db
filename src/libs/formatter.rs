//! Number formatting for list entries, popups and exports.
//!
//! Raw quantities (distance, duration, cadence, elevation) are shown as
//! entered, so `24` stays `24` and `5.2` stays `5.2`. Derived rates are
//! rounded to one decimal.
//!
//! ```rust
//! use mapty::libs::formatter::{format_metric, format_quantity};
//!
//! assert_eq!(format_metric(4.615, "min/km"), "4.6 min/km");
//! assert_eq!(format_quantity(24.0, "min"), "24 min");
//! ```

/// A derived rate with one decimal place.
pub fn format_metric(value: f64, unit: &str) -> String {
    format!("{} {}", to_fixed1(value), unit)
}

/// A user-entered quantity in its shortest exact form.
pub fn format_quantity(value: f64, unit: &str) -> String {
    format!("{} {}", value, unit)
}

/// One decimal place. Non-finite values print as the words they are.
pub fn to_fixed1(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    format!("{:.1}", value)
}
