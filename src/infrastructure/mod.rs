//! Adapters: order storage backends and the QR image renderer.

pub mod in_memory;
pub mod json_file;
pub mod qr;
