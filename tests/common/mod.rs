#![allow(dead_code)]

use rand::Rng;
use rust_decimal::Decimal;
use serde_json::json;
use upi_pos::domain::order::LineItem;

const MENU: &[(&str, i64)] = &[
    ("Vada Pav", 25),
    ("Masala Chai", 15),
    ("Paneer Roll", 90),
    ("Cold Coffee", 60),
    ("Gulab Jamun", 40),
];

/// A random basket and its total, as the till front-end would send it.
pub fn random_basket<R: Rng>(rng: &mut R) -> (Vec<LineItem>, Decimal) {
    let lines = rng.gen_range(1..=4);
    let mut items: Vec<LineItem> = Vec::with_capacity(lines);
    let mut total = Decimal::ZERO;

    for _ in 0..lines {
        let (name, price) = MENU[rng.gen_range(0..MENU.len())];
        let quantity: i64 = rng.gen_range(1..=3);
        total += Decimal::from(price * quantity);
        items.push(json!({"name": name, "quantity": quantity, "price": price}).into());
    }

    (items, total)
}

/// Decodes the single QR code in a PNG.
pub fn decode_qr(png: &[u8]) -> String {
    let luma = image::load_from_memory(png)
        .expect("Failed to decode PNG")
        .to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        luma.width() as usize,
        luma.height() as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "Expected exactly one QR code");
    let (_meta, content) = grids[0].decode().expect("Failed to decode QR code");
    content
}
