//! Channel remapping
//!
//! Pushes one color channel through a lookup table and leaves the others
//! untouched.

use crate::{Effect, LomoEffectResult, lut::LookupTable};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbImage;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use rayon::prelude::*;

/// A color channel, numbered by its position in a decoded pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Channel {
    #[default]
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    pub fn index(self) -> usize {
        u8::from(self) as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

/// Returns a copy of `image` whose `channel` has been replaced by
/// `table[value]` at every pixel.
pub fn remap_channel(image: &RgbImage, channel: Channel, table: &LookupTable) -> RgbImage {
    let (width, height) = image.dimensions();
    let index = channel.index();
    let mut output = image.clone();

    output.par_chunks_exact_mut(3).for_each(|pixel| {
        pixel[index] = table.get(pixel[index]);
    });

    log::debug!("remapped {} channel of {width}x{height} image", channel.name());
    output
}

/// Channel remap configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ChannelRemapConfig {
    pub channel: Channel,

    pub table: LookupTable,
}

impl ChannelRemapConfig {
    pub fn new(table: LookupTable) -> Self {
        Self::default().with_table(table)
    }
}

impl Effect for ChannelRemapConfig {
    fn apply(&self, image: &RgbImage) -> LomoEffectResult<RgbImage> {
        Ok(remap_channel(image, self.channel, &self.table))
    }
}
