use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid page layout: {0}")]
    InvalidLayout(String),

    #[error("PDF serialization failed: {0}")]
    PdfError(String),
}

/// Why an inline photo could not be embedded
#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("PNG decode failed: {0}")]
    Png(String),

    #[error("JPEG decode failed: {0}")]
    Jpeg(String),

    #[error("Image compression failed: {0}")]
    Compression(#[from] std::io::Error),
}
