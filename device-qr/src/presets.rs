//! Built-in device records.

use std::fmt;
use std::str::FromStr;

use crate::record::DeviceRecord;

const DEVICE_IMAGE_URL: &str =
    "https://res.cloudinary.com/dnqs4ihau/image/upload/v1740202616/device3_wpfoi6.jpg";

/// A named built-in record with its conventional output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Controller used for scanner testing.
    #[default]
    Test,
    /// ESP32 environmental sensor unit.
    Esp,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Test, Preset::Esp];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Test => "test",
            Preset::Esp => "esp",
        }
    }

    pub fn default_output(self) -> &'static str {
        match self {
            Preset::Test => "test_qr.png",
            Preset::Esp => "device_esp.png",
        }
    }

    pub fn record(self) -> DeviceRecord {
        match self {
            Preset::Test => DeviceRecord::builder()
                .field("id", "25001")
                .field("name", "Test Device 1")
                .field("type", "Controller")
                .field("status", "Inactive")
                .field("connectivity", "WiFi")
                .field("power", "15")
                .field("icon", "sensors")
                .field(
                    "description",
                    "An intelligent controller that automates water and nutrient delivery, \
                     optimizing resource usage and plant health.",
                )
                .field("imageUrl", DEVICE_IMAGE_URL)
                .build(),
            Preset::Esp => DeviceRecord::builder()
                .field("id", "25002")
                .field("name", "Sensor Unit")
                .field("type", "Environmental Sensor")
                .field("status", "Active")
                .field("connectivity", "WiFi")
                .field("power", "5")
                .field("icon", "sensors")
                .field(
                    "description",
                    "A multi-parameter sensor unit capable of measuring temperature, humidity, \
                     pH, and nutrient levels to ensure optimal plant growth conditions.",
                )
                .field("imageUrl", DEVICE_IMAGE_URL)
                .build(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| format!("unknown preset '{s}' (expected test or esp)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    #[test]
    fn test_sample_record_fields() {
        let record = Preset::Test.record();
        assert_eq!(record.len(), 9);
        assert_eq!(record.get("id"), Some(&FieldValue::from("25001")));
        assert_eq!(record.get("power"), Some(&FieldValue::from("15")));
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            ["id", "name", "type", "status", "connectivity", "power", "icon", "description", "imageUrl"]
        );
    }

    #[test]
    fn test_presets_share_field_layout() {
        let test_keys: Vec<String> = Preset::Test.record().iter().map(|(k, _)| k.to_string()).collect();
        let esp_keys: Vec<String> = Preset::Esp.record().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(test_keys, esp_keys);
    }

    #[test]
    fn test_description_has_single_spaces() {
        let record = Preset::Test.record();
        let description = record.get("description").map(ToString::to_string).unwrap();
        assert!(description.contains("delivery, optimizing"));
        assert!(!description.contains("  "));
    }

    #[test]
    fn test_parse_and_default_output() {
        assert_eq!("ESP".parse::<Preset>(), Ok(Preset::Esp));
        assert!("lamp".parse::<Preset>().is_err());
        assert_eq!(Preset::default().default_output(), "test_qr.png");
        assert_eq!(Preset::Esp.default_output(), "device_esp.png");
    }
}
