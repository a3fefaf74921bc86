use crate::error::Result;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

/// Edge length of one QR module, in pixels.
pub const MODULE_SIZE: u32 = 10;

/// Renders `data` as a black-on-white QR code PNG.
///
/// Error correction is level M (~15% recovery). The symbol version is the smallest
/// one that fits the data, and the image carries the standard 4-module quiet zone.
pub fn render_png(data: &str) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_SIZE, MODULE_SIZE)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}
