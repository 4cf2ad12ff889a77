//! Scanline reconstruction.
//!
//! Each decompressed scanline arrives with a one byte filter tag and the
//! functions here undo that filter, turning deltas back into pixel bytes.
//! All arithmetic is modulo 256.
//!
//! Functions with a `_first` suffix serve the first scanline of an image
//! or an interlace pass, where the row above is defined to be zeroes.

/// Reverse the Sub filter, each byte is a delta against the byte one
/// pixel to its left
pub fn handle_sub(raw: &[u8], current: &mut [u8], components: usize)
{
    // the first pixel has nothing to its left, it passes through
    for i in 0..components
    {
        current[i] = raw[i];
    }

    for i in components..raw.len()
    {
        let a = current[i - components];

        current[i] = raw[i].wrapping_add(a);
    }
}

/// Reverse the Up filter, each byte is a delta against the byte directly
/// above it
pub fn handle_up(prev_row: &[u8], raw: &[u8], current: &mut [u8])
{
    for ((filt, recon), up) in raw.iter().zip(current).zip(prev_row)
    {
        *recon = (*filt).wrapping_add(*up)
    }
}

/// Reverse the Average filter, the prediction is the mean of the byte to
/// the left and the byte above, computed without overflow
pub fn handle_avg(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize)
{
    // no left neighbour on the first pixel, only up contributes
    for i in 0..components
    {
        current[i] = raw[i].wrapping_add(prev_row[i] >> 1);
    }

    for i in components..raw.len()
    {
        let a = u16::from(current[i - components]);
        let b = u16::from(prev_row[i]);

        let avg = ((a + b) >> 1) as u8;

        current[i] = raw[i].wrapping_add(avg);
    }
}

/// Reverse the Average filter on the first scanline, the row above is
/// all zeroes so only the left half remains
pub fn handle_avg_first(raw: &[u8], current: &mut [u8], components: usize)
{
    for i in 0..components
    {
        current[i] = raw[i];
    }

    for i in components..raw.len()
    {
        let avg = current[i - components] >> 1;

        current[i] = raw[i].wrapping_add(avg);
    }
}

/// Reverse the Paeth filter
pub fn handle_paeth(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize)
{
    // left and upper-left are zero for the first pixel
    for i in 0..components
    {
        current[i] = raw[i].wrapping_add(paeth(0, prev_row[i], 0));
    }

    for i in components..raw.len()
    {
        let predictor = paeth(
            current[i - components],
            prev_row[i],
            prev_row[i - components]
        );

        current[i] = raw[i].wrapping_add(predictor);
    }
}

/// Reverse the Paeth filter on the first scanline.
///
/// With the row above zeroed the predictor always picks the left
/// neighbour, so this collapses to Sub.
pub fn handle_paeth_first(raw: &[u8], current: &mut [u8], components: usize)
{
    for i in 0..components
    {
        current[i] = raw[i];
    }

    for i in components..raw.len()
    {
        let predictor = paeth(current[i - components], 0, 0);

        current[i] = raw[i].wrapping_add(predictor);
    }
}

/// The Paeth predictor.
///
/// Picks whichever of left, up and upper-left is closest to
/// `left + up - upper_left`. Ties go left first, then up.
#[inline(always)]
pub fn paeth(a: u8, b: u8, c: u8) -> u8
{
    let a = i16::from(a);
    let b = i16::from(b);
    let c = i16::from(c);

    let p = a + b - c;

    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc
    {
        return a as u8;
    }
    if pb <= pc
    {
        return b as u8;
    }
    c as u8
}
