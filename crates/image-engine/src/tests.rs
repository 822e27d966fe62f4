//! Scan-back tests: render symbols and decode them with an independent reader.

use image::DynamicImage;
use qr_codec::{BuiltinEncoder, EcLevel, EncodeOptions, Mask, SymbolEncoder, Version};

use crate::{QrcodeEncoder, RasterStyle, generate_qr};

const DEVICE_JSON: &str = r#"{"id": "25001", "name": "Test Device 1", "type": "Controller", "status": "Inactive", "connectivity": "WiFi", "power": "15", "icon": "sensors", "description": "An intelligent controller that automates water and nutrient delivery, optimizing resource usage and plant health.", "imageUrl": "https://res.cloudinary.com/dnqs4ihau/image/upload/v1740202616/device3_wpfoi6.jpg"}"#;

fn scan_style() -> RasterStyle {
    RasterStyle::new().with_box_size(4).with_border(4)
}

/// Decode the single QR code in `img`.
fn scan(img: &DynamicImage) -> String {
    let luma = img.to_luma8();
    let (w, h) = luma.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
        luma.get_pixel(x as u32, y as u32).0[0]
    });
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR code");
    let (_meta, content) = grids[0].decode().expect("QR code should decode");
    content
}

fn round_trip(encoder: &dyn SymbolEncoder, payload: &str, options: &EncodeOptions) -> String {
    let (_, img) = generate_qr(payload.as_bytes(), encoder, options, &scan_style()).unwrap();
    scan(&img)
}

#[test]
fn test_builtin_scan_back_short_url() {
    let payload = "https://example.com/devices/25001";
    assert_eq!(
        round_trip(&BuiltinEncoder, payload, &EncodeOptions::default()),
        payload
    );
}

#[test]
fn test_builtin_scan_back_device_record() {
    assert_eq!(
        round_trip(&BuiltinEncoder, DEVICE_JSON, &EncodeOptions::default()),
        DEVICE_JSON
    );
}

#[test]
fn test_builtin_scan_back_every_ec_level() {
    let payload = "Sensor Unit / Environmental Sensor";
    for ec in EcLevel::ALL {
        let options = EncodeOptions::new().with_ec_level(ec);
        assert_eq!(round_trip(&BuiltinEncoder, payload, &options), payload, "{ec}");
    }
}

#[test]
fn test_builtin_scan_back_every_mask() {
    let payload = "mask check 0123456789";
    for mask in Mask::ALL {
        let options = EncodeOptions::new().with_mask(Some(mask));
        assert_eq!(round_trip(&BuiltinEncoder, payload, &options), payload, "mask {mask}");
    }
}

#[test]
fn test_builtin_scan_back_numeric_and_alphanumeric() {
    for payload in ["31415926535897932384626433", "ESP32 SENSOR UNIT-25002"] {
        assert_eq!(
            round_trip(&BuiltinEncoder, payload, &EncodeOptions::default()),
            payload
        );
    }
}

#[test]
fn test_builtin_scan_back_large_version() {
    // Large enough to need version information blocks and many RS blocks.
    let payload: String = (0..900).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    let options = EncodeOptions::new().with_ec_level(EcLevel::L);
    let symbol = BuiltinEncoder.encode(payload.as_bytes(), &options).unwrap();
    assert!(symbol.version >= Version::new(7).unwrap());
    assert_eq!(round_trip(&BuiltinEncoder, &payload, &options), payload);
}

#[test]
fn test_builtin_scan_back_min_version() {
    let options = EncodeOptions::new().with_min_version(Version::new(8).unwrap());
    assert_eq!(round_trip(&BuiltinEncoder, "tiny", &options), "tiny");
}

#[test]
fn test_qrcode_backend_scan_back_device_record() {
    assert_eq!(
        round_trip(&QrcodeEncoder, DEVICE_JSON, &EncodeOptions::default()),
        DEVICE_JSON
    );
}
