//! Runtime configuration loaded from the environment, `.env`, and CLI overrides.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use image::Rgb;
use image_engine::RasterStyle;
use qr_codec::{EcLevel, EncodeOptions, Mask, Version};

use super::defaults::SETTING_DEFS;
use super::validation::{parse_hex_color, validate_setting};
use super::Backend;
use crate::json::JsonStyle;
use crate::presets::Preset;
use crate::record::{DeviceRecord, RecordError};

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub preset: Preset,
    pub record_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub ec_level: EcLevel,
    pub min_version: Version,
    pub max_version: Version,
    pub boost_ec_level: bool,
    pub mask: Option<Mask>,
    pub box_size: u32,
    pub border: u32,
    pub fill_color: Rgb<u8>,
    pub back_color: Rgb<u8>,
    pub backend: Backend,
    pub json_style: JsonStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preset: Preset::Test,
            record_file: None,
            output: None,
            ec_level: EcLevel::M,
            min_version: Version::MIN,
            max_version: Version::MAX,
            boost_ec_level: false,
            mask: None,
            box_size: 10,
            border: 5,
            fill_color: Rgb([0, 0, 0]),
            back_color: Rgb([255, 255, 255]),
            backend: Backend::Builtin,
            json_style: JsonStyle::Spaced,
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment, with
    /// `overrides` taking precedence over both.
    pub fn load_with_overrides(overrides: &[(&str, String)]) -> Result<Self, anyhow::Error> {
        load_dotenv();
        Self::from_lookup(|key| {
            overrides
                .iter()
                .rev()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .or_else(|| std::env::var(key).ok())
        })
    }

    /// Build a configuration from a key lookup. Missing or empty values use the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        for def in SETTING_DEFS {
            if let Some(value) = lookup(def.key).filter(|v| !v.trim().is_empty()) {
                validate_setting(def.key, value.trim())
                    .map_err(|msg| anyhow!("Invalid {}='{}': {msg}", def.key, value.trim()))?;
            }
        }

        let g = |key: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .or_else(|| super::defaults::get_default(key).map(str::to_string))
                .unwrap_or_default()
        };

        let min_version = Version::new(g("QR_MIN_VERSION").parse().context("QR_MIN_VERSION")?)?;
        let max_version = Version::new(g("QR_MAX_VERSION").parse().context("QR_MAX_VERSION")?)?;
        if min_version > max_version {
            return Err(anyhow!(
                "Invalid QR_MIN_VERSION={min_version}: greater than QR_MAX_VERSION={max_version}"
            ));
        }

        let mask_value = g("QR_MASK");
        let mask = if mask_value.eq_ignore_ascii_case("auto") {
            None
        } else {
            Some(Mask::new(mask_value.parse().context("QR_MASK")?)?)
        };

        Ok(Self {
            preset: parse_choice(&g("QR_PRESET"))?,
            record_file: optional_path(g("QR_RECORD_FILE")),
            output: optional_path(g("QR_OUTPUT")),
            ec_level: parse_choice(&g("QR_EC_LEVEL"))?,
            min_version,
            max_version,
            boost_ec_level: g("QR_BOOST_EC") == "true",
            mask,
            box_size: g("QR_BOX_SIZE").parse().context("QR_BOX_SIZE")?,
            border: g("QR_BORDER").parse().context("QR_BORDER")?,
            fill_color: Rgb(parse_hex_color(&g("QR_FILL_COLOR")).map_err(anyhow::Error::msg)?),
            back_color: Rgb(parse_hex_color(&g("QR_BACK_COLOR")).map_err(anyhow::Error::msg)?),
            backend: parse_choice(&g("QR_BACKEND"))?,
            json_style: parse_choice(&g("QR_JSON_STYLE"))?,
        })
    }

    /// The record to encode: the record file when set, the preset otherwise.
    pub fn record(&self) -> Result<DeviceRecord, RecordError> {
        match &self.record_file {
            Some(path) => DeviceRecord::from_file(path),
            None => Ok(self.preset.record()),
        }
    }

    /// Output path: `QR_OUTPUT` when set, the preset's file name otherwise.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.preset.default_output()))
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::new()
            .with_ec_level(self.ec_level)
            .with_min_version(self.min_version)
            .with_max_version(self.max_version)
            .with_boost_ec_level(self.boost_ec_level)
            .with_mask(self.mask)
    }

    pub fn raster_style(&self) -> RasterStyle {
        RasterStyle::new()
            .with_box_size(self.box_size)
            .with_border(self.border)
            .with_foreground(self.fill_color)
            .with_background(self.back_color)
    }
}

/// Load `.env` from the working directory or one of its parents.
pub fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::debug!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using process environment");
}

fn parse_choice<T: FromStr<Err = String>>(s: &str) -> Result<T, anyhow::Error> {
    s.parse().map_err(anyhow::Error::msg)
}

fn optional_path(s: String) -> Option<PathBuf> {
    if s.is_empty() { None } else { Some(PathBuf::from(s)) }
}
