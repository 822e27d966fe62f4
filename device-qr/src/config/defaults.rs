//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A single setting definition.
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Every setting, in display order.
pub const SETTING_DEFS: &[SettingDef] = &[
    SettingDef {
        key: "QR_PRESET",
        default: "test",
        description: "Built-in device record to encode (test, esp)",
    },
    SettingDef {
        key: "QR_RECORD_FILE",
        default: "",
        description: "JSON file holding the device record; overrides QR_PRESET",
    },
    SettingDef {
        key: "QR_OUTPUT",
        default: "",
        description: "Output PNG path; empty uses the preset's file name",
    },
    SettingDef {
        key: "QR_EC_LEVEL",
        default: "M",
        description: "Error correction level (L, M, Q, H)",
    },
    SettingDef {
        key: "QR_MIN_VERSION",
        default: "1",
        description: "Smallest symbol version to use (1-40)",
    },
    SettingDef {
        key: "QR_MAX_VERSION",
        default: "40",
        description: "Largest symbol version to use (1-40)",
    },
    SettingDef {
        key: "QR_BOOST_EC",
        default: "false",
        description: "Raise the error correction level while the data still fits (true, false)",
    },
    SettingDef {
        key: "QR_MASK",
        default: "auto",
        description: "Mask pattern (auto or 0-7)",
    },
    SettingDef {
        key: "QR_BOX_SIZE",
        default: "10",
        description: "Pixels per module (1-100)",
    },
    SettingDef {
        key: "QR_BORDER",
        default: "5",
        description: "Quiet zone width in modules (0-40)",
    },
    SettingDef {
        key: "QR_FILL_COLOR",
        default: "#000000",
        description: "Dark module colour (#RRGGBB)",
    },
    SettingDef {
        key: "QR_BACK_COLOR",
        default: "#FFFFFF",
        description: "Light module and border colour (#RRGGBB)",
    },
    SettingDef {
        key: "QR_BACKEND",
        default: "builtin",
        description: "Symbol encoder (builtin, qrcode)",
    },
    SettingDef {
        key: "QR_JSON_STYLE",
        default: "spaced",
        description: "JSON layout of the payload (spaced, compact)",
    },
];

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> =
    LazyLock::new(|| SETTING_DEFS.iter().map(|def| (def.key, *def)).collect());

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_unique() {
        assert_eq!(DEFAULT_SETTINGS.len(), SETTING_DEFS.len());
    }

    #[test]
    fn test_get_default() {
        assert_eq!(get_default("QR_EC_LEVEL"), Some("M"));
        assert_eq!(get_default("QR_BOX_SIZE"), Some("10"));
        assert_eq!(get_default("NOPE"), None);
    }

    #[test]
    fn test_defaults_pass_validation() {
        for def in SETTING_DEFS {
            assert!(
                super::super::validation::validate_setting(def.key, def.default).is_ok(),
                "default for {} is invalid",
                def.key
            );
        }
    }
}
