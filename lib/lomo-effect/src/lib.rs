//! Lomography filters
//!
//! Two independent photographic filters and the session that composes them:
//! a logistic color curve applied to one channel through a lookup table, and
//! a vignette built from a blurred bright disc on a darkened field.

pub mod blur;
pub mod channel_effect;
pub mod lut;
pub mod session;
pub mod vignette;

pub use channel_effect::{Channel, ChannelRemapConfig, remap_channel};
pub use lut::{CurveConfig, LookupTable, build_lookup_table};
pub use session::{ColorState, FilterSession, RadiusMode};
pub use vignette::{VignetteConfig, VignetteMask, apply_mask, build_mask, pixel_radius};

use image::RgbImage;
use std::path::PathBuf;

pub type LomoEffectResult<T> = Result<T, LomoEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum LomoEffectError {
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("Unable to open picture {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A filter that produces a new image from a source without touching it.
pub trait Effect {
    fn apply(&self, image: &RgbImage) -> LomoEffectResult<RgbImage>;
}
