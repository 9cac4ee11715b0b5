//! Normalized box blur for floating point masks
//!
//! Every output sample is the mean of a `ksize x ksize` window whose anchor
//! sits at `ksize / 2`. Samples outside the image are mirrored without
//! repeating the edge (`gfedcb|abcdefgh|gfedcba`).

use crate::{LomoEffectError, LomoEffectResult};
use image::Rgb32FImage;
use rayon::prelude::*;

const CHANNELS: usize = 3;
const ROWS_PER_BAND: usize = 32;

/// Mirror an out-of-range coordinate back into `0..len`.
fn reflect_101(mut pos: isize, len: usize) -> usize {
    let len = len as isize;
    if len == 1 {
        return 0;
    }

    loop {
        if pos < 0 {
            pos = -pos;
        } else if pos >= len {
            pos = 2 * len - 2 - pos;
        } else {
            return pos as usize;
        }
    }
}

pub fn box_blur(image: &Rgb32FImage, ksize: u32) -> LomoEffectResult<Rgb32FImage> {
    if ksize == 0 {
        return Err(LomoEffectError::InvalidParameter(
            "blur kernel size must be at least 1".to_string(),
        ));
    }

    let (width, height) = image.dimensions();
    if ksize == 1 || width == 0 || height == 0 {
        return Ok(image.clone());
    }

    let (w, h, k) = (width as usize, height as usize, ksize as usize);
    let anchor = (k / 2) as isize;
    let norm = 1.0 / k as f64;
    let stride = w * CHANNELS;

    // Horizontal pass, one row at a time with a sliding window sum.
    let src = image.as_raw();
    let mut horizontal = vec![0f32; src.len()];
    horizontal
        .par_chunks_mut(stride)
        .zip(src.par_chunks(stride))
        .for_each(|(dst_row, src_row)| {
            let mut sum = [0f64; CHANNELS];
            for j in 0..k {
                let sx = reflect_101(j as isize - anchor, w);
                for c in 0..CHANNELS {
                    sum[c] += src_row[sx * CHANNELS + c] as f64;
                }
            }

            for x in 0..w {
                for c in 0..CHANNELS {
                    dst_row[x * CHANNELS + c] = (sum[c] * norm) as f32;
                }

                let leaving = reflect_101(x as isize - anchor, w);
                let entering = reflect_101(x as isize - anchor + k as isize, w);
                for c in 0..CHANNELS {
                    sum[c] += src_row[entering * CHANNELS + c] as f64
                        - src_row[leaving * CHANNELS + c] as f64;
                }
            }
        });

    // Vertical pass in bands of rows; each band seeds its own column sums.
    let mut output = vec![0f32; src.len()];
    output
        .par_chunks_mut(stride * ROWS_PER_BAND)
        .enumerate()
        .for_each(|(band, dst_band)| {
            let first_row = band * ROWS_PER_BAND;
            let rows = dst_band.len() / stride;

            let mut sums = vec![0f64; stride];
            for j in 0..k {
                let sy = reflect_101(first_row as isize - anchor + j as isize, h);
                let row = &horizontal[sy * stride..(sy + 1) * stride];
                for (sum, value) in sums.iter_mut().zip(row) {
                    *sum += *value as f64;
                }
            }

            for r in 0..rows {
                let y = first_row + r;
                let dst_row = &mut dst_band[r * stride..(r + 1) * stride];
                for (dst, sum) in dst_row.iter_mut().zip(&sums) {
                    *dst = (*sum * norm) as f32;
                }

                let leaving = reflect_101(y as isize - anchor, h);
                let entering = reflect_101(y as isize - anchor + k as isize, h);
                let leaving_row = &horizontal[leaving * stride..(leaving + 1) * stride];
                let entering_row = &horizontal[entering * stride..(entering + 1) * stride];
                for ((sum, out), inc) in sums.iter_mut().zip(leaving_row).zip(entering_row) {
                    *sum += *inc as f64 - *out as f64;
                }
            }
        });

    Rgb32FImage::from_raw(width, height, output).ok_or_else(|| {
        LomoEffectError::InvalidParameter("blur output buffer size mismatch".to_string())
    })
}
