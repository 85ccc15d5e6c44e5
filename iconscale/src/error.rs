use thiserror::Error;

pub type Result<T, E = ScaleError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("target size must be greater than 0, got: {0}")]
    InvalidDimension(u32),

    #[error("invalid color `{0}`, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}
