//! Expansion of every source color model to the 4 channel RGBA output.
//!
//! Input rasters are tightly packed source-model bytes, output is always
//! `width * height * 4` with alpha last.

use crate::decoder::PLTEEntry;

pub(crate) fn expand_luma(input: &[u8], out: &mut [u8])
{
    for (in_px, px) in input.iter().zip(out.chunks_exact_mut(4))
    {
        px[0] = *in_px;
        px[1] = *in_px;
        px[2] = *in_px;
        px[3] = 255;
    }
}

pub(crate) fn expand_luma_alpha(input: &[u8], out: &mut [u8])
{
    for (in_px, px) in input.chunks_exact(2).zip(out.chunks_exact_mut(4))
    {
        px[0] = in_px[0];
        px[1] = in_px[0];
        px[2] = in_px[0];
        px[3] = in_px[1];
    }
}

pub(crate) fn expand_rgb(input: &[u8], out: &mut [u8])
{
    for (in_px, px) in input.chunks_exact(3).zip(out.chunks_exact_mut(4))
    {
        px[0..3].copy_from_slice(in_px);
        px[3] = 255;
    }
}

/// Resolve palette indices to their RGBA entries.
///
/// An index at or past the end of the palette resolves to entry 0, streams
/// with such indices are malformed but render rather than abort.
pub(crate) fn expand_palette(input: &[u8], out: &mut [u8], palette: &[PLTEEntry])
{
    if palette.is_empty()
    {
        return;
    }

    for (in_px, px) in input.iter().zip(out.chunks_exact_mut(4))
    {
        let idx = usize::from(*in_px);

        let entry = if idx < palette.len()
        {
            palette[idx]
        }
        else
        {
            palette[0]
        };

        px[0] = entry.red;
        px[1] = entry.green;
        px[2] = entry.blue;
        px[3] = entry.alpha;
    }
}
