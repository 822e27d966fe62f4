//! Configuration management: defaults, validation, loading from the environment.

pub mod app_config;
pub mod defaults;
pub mod validation;

use std::fmt;
use std::str::FromStr;

pub use app_config::AppConfig;

use image_engine::QrcodeEncoder;
use qr_codec::{BuiltinEncoder, SymbolEncoder};

/// Which encoder produces the module grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Builtin,
    Qrcode,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::Builtin => "builtin",
            Backend::Qrcode => "qrcode",
        }
    }

    pub fn encoder(self) -> Box<dyn SymbolEncoder> {
        match self {
            Backend::Builtin => Box::new(BuiltinEncoder),
            Backend::Qrcode => Box::new(QrcodeEncoder),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(Backend::Builtin),
            "qrcode" => Ok(Backend::Qrcode),
            other => Err(format!("unknown backend '{other}' (expected builtin or qrcode)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_encoder_names() {
        for backend in [Backend::Builtin, Backend::Qrcode] {
            assert_eq!(backend.encoder().name(), backend.name());
            assert_eq!(backend.name().parse::<Backend>(), Ok(backend));
        }
    }
}
