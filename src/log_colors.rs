//! Hex colors used by [`CapLog`](crate::CapLog) entries.

/// Namespace for the `#RRGGBB` palette.
pub struct LogColors;

impl LogColors {
    /// Gray, for `LOGG`.
    pub const LOG: &'static str = "#6C757D";
    /// Blue, for `INFO`.
    pub const INFO: &'static str = "#007bff";
    /// Green, for `GOOD`.
    pub const SUCCESS: &'static str = "#28A745";
    /// Purple, for data dumps.
    pub const DATA: &'static str = "#563D7C";
    /// Teal, for test output.
    pub const TEST: &'static str = "#17A2B8";
    /// Amber, for `WARN`.
    pub const WARNING: &'static str = "#FFC107";
    /// Red, for `ERRR`.
    pub const ERROR: &'static str = "#DC3545";

    /// Split a `#RRGGBB` color into its components.
    pub fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}
