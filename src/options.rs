/// Decoder knobs.
///
/// The defaults are what you want for trusted-ish assets, limits generous
/// enough for any sane texture and checksums confirmed.
#[derive(Debug, Copy, Clone)]
pub struct PngOptions
{
    /// Maximum width the decoder accepts.
    ///
    /// Wider images error out before any pixel buffer is allocated.
    ///
    /// - Default value: 1 << 17
    max_width:   usize,
    /// Maximum height the decoder accepts.
    ///
    /// - Default value: 1 << 17
    max_height:  usize,
    /// Whether chunk checksums are verified.
    ///
    /// - Default value: true
    confirm_crc: bool
}

impl Default for PngOptions
{
    fn default() -> Self
    {
        Self {
            max_width:   1 << 17,
            max_height:  1 << 17,
            confirm_crc: true
        }
    }
}

impl PngOptions
{
    /// Get the maximum width the decoder accepts
    pub const fn get_max_width(&self) -> usize
    {
        self.max_width
    }

    /// Get the maximum height the decoder accepts
    pub const fn get_max_height(&self) -> usize
    {
        self.max_height
    }

    /// Return true if chunk checksums are verified during decoding
    pub const fn get_confirm_crc(&self) -> bool
    {
        self.confirm_crc
    }

    /// Set the maximum width for which the decoder does not try
    /// decoding images wider than that
    pub fn set_max_width(mut self, width: usize) -> Self
    {
        self.max_width = width;
        self
    }

    /// Set the maximum height for which the decoder does not try
    /// decoding images taller than that
    pub fn set_max_height(mut self, height: usize) -> Self
    {
        self.max_height = height;
        self
    }

    /// Set whether chunk checksums are verified during decoding
    pub fn set_confirm_crc(mut self, yes: bool) -> Self
    {
        self.confirm_crc = yes;
        self
    }
}
