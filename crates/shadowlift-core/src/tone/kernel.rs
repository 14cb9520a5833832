use rayon::prelude::*;
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::consts::{CHANNEL_MAX, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{EnhanceError, Result};

/// Round and saturate a channel value into `0..=255`.
///
/// NaN maps to 0.
#[inline]
pub(crate) fn clamp_channel(v: f32) -> u8 {
    v.round().clamp(0.0, CHANNEL_MAX) as u8
}

/// Build a new buffer by running `f(src_pixel, dst_pixel)` over every pixel.
///
/// `dst_pixel` starts zeroed and has the same channel count as `src_pixel`.
/// Large buffers are split into rows and processed on the Rayon pool; each
/// task owns a disjoint output row, so no synchronisation is needed beyond
/// the final join.
pub(crate) fn map_pixels<F>(input: &PixelBuffer, f: F) -> Result<PixelBuffer>
where
    F: Fn(&[u8], &mut [u8]) + Sync,
{
    let src = input.as_raw();
    let mut out = vec![0u8; src.len()];
    let row_len = input.row_len();
    let channels = input.channels();

    let process_row = |dst: &mut [u8], src: &[u8]| {
        for (s, d) in src
            .chunks_exact(channels)
            .zip(dst.chunks_exact_mut(channels))
        {
            f(s, d);
        }
    };

    if row_len > 0 {
        if input.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
            debug!(
                width = input.width(),
                height = input.height(),
                "Processing rows in parallel"
            );
            out.par_chunks_exact_mut(row_len)
                .zip(src.par_chunks_exact(row_len))
                .for_each(|(dst, src)| process_row(dst, src));
        } else {
            for (dst, src) in out.chunks_exact_mut(row_len).zip(src.chunks_exact(row_len)) {
                process_row(dst, src);
            }
        }
    }

    PixelBuffer::new(input.width(), input.height(), input.format(), out)
        .map_err(|e| EnhanceError::Transform(e.to_string()))
}
