//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

use qr_codec::EcLevel;

use super::Backend;
use crate::json::JsonStyle;
use crate::presets::Preset;

static RE_HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[0-9A-Fa-f]{6}$").expect("hex colour regex"));

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "QR_PRESET" => {
            value.parse::<Preset>()?;
        }
        "QR_RECORD_FILE" | "QR_OUTPUT" => {
            if value.len() > 4096 {
                return Err("path must be at most 4096 characters".into());
            }
        }
        "QR_EC_LEVEL" => {
            value.parse::<EcLevel>()?;
        }
        "QR_MIN_VERSION" | "QR_MAX_VERSION" => validate_int_range(value, 1, 40)?,
        "QR_BOOST_EC" => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        "QR_MASK" => {
            if !value.eq_ignore_ascii_case("auto") {
                validate_int_range(value, 0, 7).map_err(|_| "must be 'auto' or 0-7")?;
            }
        }
        "QR_BOX_SIZE" => validate_int_range(value, 1, 100)?,
        "QR_BORDER" => validate_int_range(value, 0, 40)?,
        "QR_FILL_COLOR" | "QR_BACK_COLOR" => {
            if !RE_HEX_COLOR.is_match(value) {
                return Err("must be a hex colour like #1A2B3C".into());
            }
        }
        "QR_BACKEND" => {
            value.parse::<Backend>()?;
        }
        "QR_JSON_STYLE" => {
            value.parse::<JsonStyle>()?;
        }
        _ => {}
    }
    Ok(())
}

/// Parse a validated `#RRGGBB` (or `RRGGBB`) colour.
pub fn parse_hex_color(value: &str) -> Result<[u8; 3], String> {
    if !RE_HEX_COLOR.is_match(value) {
        return Err(format!("invalid colour '{value}'"));
    }
    let hex = value.trim_start_matches('#');
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ec_level() {
        for v in ["L", "m", "Q", "H"] {
            assert!(validate_setting("QR_EC_LEVEL", v).is_ok());
        }
        assert!(validate_setting("QR_EC_LEVEL", "X").is_err());
    }

    #[test]
    fn test_valid_ranges() {
        assert!(validate_setting("QR_MIN_VERSION", "40").is_ok());
        assert!(validate_setting("QR_MIN_VERSION", "41").is_err());
        assert!(validate_setting("QR_MIN_VERSION", "0").is_err());
        assert!(validate_setting("QR_BOX_SIZE", "0").is_err());
        assert!(validate_setting("QR_BOX_SIZE", "abc").is_err());
        assert!(validate_setting("QR_BORDER", "0").is_ok());
        assert!(validate_setting("QR_BORDER", "-1").is_err());
        assert!(validate_setting("QR_MAX_VERSION", "1").is_ok());
        assert!(validate_setting("QR_MAX_VERSION", "41").is_err());
        assert!(validate_setting("QR_BOOST_EC", "true").is_ok());
        assert!(validate_setting("QR_BOOST_EC", "yes").is_err());
    }

    #[test]
    fn test_valid_mask() {
        assert!(validate_setting("QR_MASK", "auto").is_ok());
        assert!(validate_setting("QR_MASK", "AUTO").is_ok());
        assert!(validate_setting("QR_MASK", "Auto").is_ok());
        assert!(validate_setting("QR_MASK", "7").is_ok());
        assert_eq!(
            validate_setting("QR_MASK", "8"),
            Err("must be 'auto' or 0-7".to_string())
        );
    }

    #[test]
    fn test_valid_colors() {
        assert!(validate_setting("QR_FILL_COLOR", "#000000").is_ok());
        assert!(validate_setting("QR_FILL_COLOR", "1a2B3c").is_ok());
        assert!(validate_setting("QR_BACK_COLOR", "#FFF").is_err());
        assert!(validate_setting("QR_BACK_COLOR", "white").is_err());
    }

    #[test]
    fn test_valid_choices() {
        assert!(validate_setting("QR_BACKEND", "qrcode").is_ok());
        assert!(validate_setting("QR_BACKEND", "zxing").is_err());
        assert!(validate_setting("QR_PRESET", "esp").is_ok());
        assert!(validate_setting("QR_PRESET", "lamp").is_err());
        assert!(validate_setting("QR_JSON_STYLE", "compact").is_ok());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1A2B3C"), Ok([0x1A, 0x2B, 0x3C]));
        assert_eq!(parse_hex_color("ffffff"), Ok([255, 255, 255]));
        assert!(parse_hex_color("#12345").is_err());
    }

    #[test]
    fn test_unknown_key_accepted() {
        assert!(validate_setting("SOMETHING_ELSE", "whatever").is_ok());
    }
}
