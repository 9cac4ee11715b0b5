//! Vignette (dark halo)
//!
//! The halo mask is a bright disc of value 1.0 on a field of
//! [`HALO_BASELINE`], blurred with a box kernel as wide as the disc radius so
//! that larger discs also get softer edges. The image is multiplied by the
//! mask in floating point and quantized back to 8 bits.

use crate::{Effect, LomoEffectError, LomoEffectResult, blur::box_blur};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgb, Rgb32FImage, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use rayon::prelude::*;

pub const HALO_BASELINE: f32 = 0.5;
pub const RADIUS_PERCENT_MAX: i32 = 100;
pub const RADIUS_PERCENT_DEFAULT: i32 = 100;

/// Per-pixel, per-channel brightness multiplier.
pub type VignetteMask = Rgb32FImage;

/// Converts a radius percentage into pixels.
///
/// The percentage is taken of the shorter side and halved, so 100 gives a
/// disc that touches the shorter edges. Never smaller than one pixel.
pub fn pixel_radius(width: u32, height: u32, percent: i32) -> u32 {
    let shorter = width.min(height) as f64;
    let radius = (shorter * (percent as f64 / 200.0)) as i64;
    radius.max(1) as u32
}

pub fn build_mask(width: u32, height: u32, pixel_radius: u32) -> LomoEffectResult<VignetteMask> {
    if pixel_radius == 0 {
        return Err(LomoEffectError::InvalidParameter(
            "halo radius must be at least 1 pixel".to_string(),
        ));
    }

    let mut mask = Rgb32FImage::from_pixel(
        width,
        height,
        Rgb([HALO_BASELINE, HALO_BASELINE, HALO_BASELINE]),
    );

    let center = ((width / 2) as i32, (height / 2) as i32);
    draw_filled_circle_mut(
        &mut mask,
        center,
        pixel_radius.min(i32::MAX as u32) as i32,
        Rgb([1.0, 1.0, 1.0]),
    );

    log::debug!("halo mask {width}x{height}, disc at {center:?} radius {pixel_radius}");
    box_blur(&mask, pixel_radius)
}

/// Multiplies `image` by `mask` channel-wise, rounding back to 8 bits with
/// halves going to the even neighbour.
pub fn apply_mask(image: &RgbImage, mask: &VignetteMask) -> LomoEffectResult<RgbImage> {
    if image.dimensions() != mask.dimensions() {
        return Err(LomoEffectError::DimensionMismatch {
            expected: image.dimensions(),
            actual: mask.dimensions(),
        });
    }

    let (width, height) = image.dimensions();
    let pixels: Vec<u8> = image
        .as_raw()
        .par_iter()
        .zip(mask.as_raw().par_iter())
        .map(|(value, factor)| {
            (*value as f32 * factor)
                .round_ties_even()
                .clamp(0.0, 255.0) as u8
        })
        .collect();

    RgbImage::from_raw(width, height, pixels).ok_or(LomoEffectError::DimensionMismatch {
        expected: (width, height),
        actual: mask.dimensions(),
    })
}

/// Vignette configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct VignetteConfig {
    #[derivative(Default(value = "RADIUS_PERCENT_DEFAULT"))]
    pub radius_percent: i32,
}

impl VignetteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixel_radius(&self, width: u32, height: u32) -> u32 {
        pixel_radius(width, height, self.radius_percent)
    }

    pub fn mask_for(&self, width: u32, height: u32) -> LomoEffectResult<VignetteMask> {
        build_mask(width, height, self.pixel_radius(width, height))
    }
}

impl Effect for VignetteConfig {
    fn apply(&self, image: &RgbImage) -> LomoEffectResult<RgbImage> {
        let mask = self.mask_for(image.width(), image.height())?;
        apply_mask(image, &mask)
    }
}
