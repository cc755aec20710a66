//! Error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by texture construction and snapshot IO
///
/// The rendering paths themselves are infallible: degenerate polygons,
/// degenerate edges and out-of-range coordinates are all defined,
/// silent behaviors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("texture dimensions must be nonzero, got {width}x{height}")]
    EmptyTexture { width: usize, height: usize },

    #[error("texture data holds {len} pixels, dimensions say {width}x{height}")]
    TextureSize { len: usize, width: usize, height: usize },
}
