/// Apply display gamma to an RGBA raster, in place.
///
/// `gamma` is the value a gAMA chunk stores after dividing by 100000.
/// Only the color channels are corrected, alpha is carried through
/// untouched. A gamma at or below zero leaves the raster alone, there is
/// no fallback value.
pub(crate) fn gamma_correct(pixels: &mut [u8], gamma: f32)
{
    if gamma <= 0.0
    {
        return;
    }

    // calling powf per sample is slow, push the curve through a table
    // and index it instead
    let exponent = 1.0 / gamma;

    let mut lut = [0_u8; 256];

    for (i, entry) in lut.iter_mut().enumerate()
    {
        let sample = (i as f32) / 255.0;

        // round to nearest
        *entry = (255.0 * sample.powf(exponent) + 0.5) as u8;
    }

    for px in pixels.chunks_exact_mut(4)
    {
        px[0] = lut[usize::from(px[0])];
        px[1] = lut[usize::from(px[1])];
        px[2] = lut[usize::from(px[2])];
    }
}

#[cfg(test)]
mod tests
{
    use super::gamma_correct;

    #[test]
    fn gamma_of_one_is_identity()
    {
        let mut pixels = [0, 128, 255, 17, 1, 2, 3, 200];
        let reference = pixels;

        gamma_correct(&mut pixels, 1.0);

        assert_eq!(pixels, reference);
    }

    #[test]
    fn non_positive_gamma_is_a_no_op()
    {
        let mut pixels = [90, 91, 92, 93];
        let reference = pixels;

        gamma_correct(&mut pixels, 0.0);
        assert_eq!(pixels, reference);

        gamma_correct(&mut pixels, -2.2);
        assert_eq!(pixels, reference);
    }

    #[test]
    fn half_gamma_squares_the_curve()
    {
        // gamma 0.5 gives exponent 2, so 128 maps to
        // round(255 * (128 / 255)^2) = 64
        let mut pixels = [128, 0, 255, 90];

        gamma_correct(&mut pixels, 0.5);

        assert_eq!(pixels, [64, 0, 255, 90]);
    }

    #[test]
    fn alpha_is_never_corrected()
    {
        let mut pixels = [128, 128, 128, 128];

        gamma_correct(&mut pixels, 0.5);

        assert_eq!(pixels[3], 128);
        assert_ne!(pixels[0], 128);
    }

    #[test]
    fn rounds_to_nearest()
    {
        // 200 maps to 255 * (200/255)^2 = 156.86, which must round up
        let mut pixels = [200, 0, 0, 255];

        gamma_correct(&mut pixels, 0.5);

        assert_eq!(pixels[0], 157);
    }
}
