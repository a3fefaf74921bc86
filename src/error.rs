use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PosError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pos::io))]
    Io(#[from] std::io::Error),
    #[error("Order store at {} is corrupt: {source}", path.display())]
    #[diagnostic(
        code(pos::corrupt_store),
        help("the file was left untouched; repair or move it aside before recording new orders")
    )]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    #[diagnostic(code(pos::serialization))]
    Serialization(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    #[diagnostic(code(pos::validation))]
    ValidationError(String),
    #[error("QR encoding error: {0}")]
    #[diagnostic(code(pos::qr))]
    QrEncoding(#[from] qrcode::types::QrError),
    #[error("Image encoding error: {0}")]
    #[diagnostic(code(pos::image))]
    ImageEncoding(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PosError>;
