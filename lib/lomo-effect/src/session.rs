//! Interactive filter session
//!
//! Owns the decoded source image and the two derived buffers. The color
//! filter always starts again from the source; the halo filter composes on
//! top of the latest color result, or on the source when no color filtering
//! has happened yet. Each transition returns the buffer to show.

use crate::{
    Effect, LomoEffectError, LomoEffectResult,
    channel_effect::{Channel, ChannelRemapConfig},
    lut::{CurveConfig, effective_steepness},
    vignette::VignetteConfig,
};
use image::{ImageReader, RgbImage};
use std::path::Path;

/// Whether the color filter has produced a result yet.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorState {
    Original,
    Filtered(RgbImage),
}

/// How the halo radius value is kept between invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadiusMode {
    /// The user-facing percentage and the derived pixel radius are kept apart.
    #[default]
    Separate,

    /// The derived pixel radius is written back over the percentage, so
    /// re-running the halo without a new slider value shrinks the disc.
    Legacy,
}

#[derive(Debug, Clone)]
pub struct FilterSession {
    original: RgbImage,
    color: ColorState,
    display: Option<RgbImage>,
    curve: CurveConfig,
    vignette: VignetteConfig,
    last_pixel_radius: Option<u32>,
    radius_mode: RadiusMode,
    channel: Channel,
}

impl FilterSession {
    pub fn new(original: RgbImage) -> Self {
        log::info!(
            "filter session started on {}x{} image",
            original.width(),
            original.height()
        );

        Self {
            original,
            color: ColorState::Original,
            display: None,
            curve: CurveConfig::new(),
            vignette: VignetteConfig::new(),
            last_pixel_radius: None,
            radius_mode: RadiusMode::default(),
            channel: Channel::default(),
        }
    }

    /// Decodes the image at `path` into three 8-bit channels.
    pub fn open(path: impl AsRef<Path>) -> LomoEffectResult<Self> {
        let path = path.as_ref();
        let decode = || -> Result<RgbImage, image::ImageError> {
            Ok(ImageReader::open(path)?
                .with_guessed_format()?
                .decode()?
                .to_rgb8())
        };

        let image = decode().map_err(|source| LomoEffectError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        if image.width() == 0 || image.height() == 0 {
            return Err(LomoEffectError::InvalidParameter(format!(
                "{} contains no pixels",
                path.display()
            )));
        }

        Ok(Self::new(image))
    }

    pub fn with_radius_mode(mut self, mode: RadiusMode) -> Self {
        self.radius_mode = mode;
        self
    }

    pub fn original(&self) -> &RgbImage {
        &self.original
    }

    pub fn color_state(&self) -> &ColorState {
        &self.color
    }

    /// The latest color result, or the source if the color filter never ran.
    pub fn result(&self) -> &RgbImage {
        match &self.color {
            ColorState::Original => &self.original,
            ColorState::Filtered(image) => image,
        }
    }

    /// The buffer produced by whichever filter ran last.
    pub fn display(&self) -> &RgbImage {
        self.display.as_ref().unwrap_or_else(|| self.result())
    }

    pub fn steepness(&self) -> i32 {
        self.curve.steepness
    }

    /// The stored radius value. In [`RadiusMode::Legacy`] this holds the last
    /// computed pixel radius once the halo has run.
    pub fn radius(&self) -> i32 {
        self.vignette.radius_percent
    }

    pub fn radius_mode(&self) -> RadiusMode {
        self.radius_mode
    }

    pub fn last_pixel_radius(&self) -> Option<u32> {
        self.last_pixel_radius
    }

    /// Color transition: rebuild the curve and remap the source image.
    pub fn set_steepness(&mut self, steepness: i32) -> LomoEffectResult<&RgbImage> {
        let effective = effective_steepness(steepness);
        if effective != steepness {
            log::debug!("steepness {steepness} raised to {effective}");
        }
        self.curve = CurveConfig::new().with_steepness(effective);

        let filtered = ChannelRemapConfig::new(self.curve.lookup_table())
            .with_channel(self.channel)
            .apply(&self.original)?;
        self.display = Some(filtered.clone());
        self.color = ColorState::Filtered(filtered);

        log::info!("color filter applied with steepness {effective}");
        Ok(self.display())
    }

    /// Halo transition with a fresh radius percentage from the user.
    pub fn set_radius(&mut self, percent: i32) -> LomoEffectResult<&RgbImage> {
        self.vignette = VignetteConfig::new().with_radius_percent(percent);
        self.reapply_halo()
    }

    /// Halo transition using the stored radius value.
    pub fn reapply_halo(&mut self) -> LomoEffectResult<&RgbImage> {
        let (width, height) = self.original.dimensions();
        let radius = self.vignette.pixel_radius(width, height);
        let haloed = self.vignette.apply(self.result())?;

        if self.radius_mode == RadiusMode::Legacy {
            self.vignette.radius_percent = radius as i32;
        }
        self.last_pixel_radius = Some(radius);
        self.display = Some(haloed);

        log::info!("halo applied with radius {radius}px");
        Ok(self.display())
    }

    /// Writes the display buffer; the format follows the file extension.
    pub fn save_display(&self, path: impl AsRef<Path>) -> LomoEffectResult<()> {
        let path = path.as_ref();
        self.display().save(path)?;
        log::info!("saved {}", path.display());
        Ok(())
    }
}
