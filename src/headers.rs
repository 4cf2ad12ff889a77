//! Parsers for the individual chunk types the decoder understands.
//!
//! Every parser is handed a [`PngChunk`] whose checksum has already been
//! verified, with the stream positioned at the first payload byte. Each
//! one consumes its payload and the trailing CRC before returning.

use log::{info, warn};

use crate::decoder::{PLTEEntry, PngChunk};
use crate::enums::{InterlaceMethod, PngColor};
use crate::error::PngDecodeErrors;
use crate::PngDecoder;

impl<'a> PngDecoder<'a>
{
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.seen_hdr
        {
            return Err(PngDecodeErrors::BadHeader("Multiple IHDR, corrupt PNG"));
        }

        if chunk.length != 13
        {
            return Err(PngDecodeErrors::BadHeader("BAD IHDR length"));
        }

        let pos_start = self.stream.get_position();

        self.png_info.width = self.stream.get_u32_be() as usize;
        self.png_info.height = self.stream.get_u32_be() as usize;

        if self.png_info.width == 0 || self.png_info.height == 0
        {
            return Err(PngDecodeErrors::BadHeader("Width or height cannot be zero"));
        }

        if self.png_info.width > self.options.get_max_width()
        {
            return Err(PngDecodeErrors::Generic(format!(
                "Image width {}, larger than maximum configured width {}, aborting",
                self.png_info.width,
                self.options.get_max_width()
            )));
        }

        if self.png_info.height > self.options.get_max_height()
        {
            return Err(PngDecodeErrors::Generic(format!(
                "Image height {}, larger than maximum configured height {}, aborting",
                self.png_info.height,
                self.options.get_max_height()
            )));
        }

        self.png_info.depth = self.stream.get_u8();

        if self.png_info.depth != 8
        {
            // 1, 2, 4 and 16 are legal depths elsewhere, this decoder
            // serves pipelines that only ever feed it 8 bit assets
            return Err(PngDecodeErrors::BadHeader(
                "Unsupported bit depth, only 8 bit images are supported"
            ));
        }

        let color = self.stream.get_u8();

        if let Some(img_color) = PngColor::from_int(color)
        {
            self.png_info.color = img_color;
        }
        else
        {
            return Err(PngDecodeErrors::UnsupportedColor(color));
        }
        self.png_info.component = self.png_info.color.num_components();

        if self.stream.get_u8() != 0
        {
            return Err(PngDecodeErrors::BadHeader("Unknown compression method"));
        }

        if self.stream.get_u8() != 0
        {
            return Err(PngDecodeErrors::BadHeader("Unknown filter method"));
        }

        let interlace_method = self.stream.get_u8();

        if let Some(method) = InterlaceMethod::from_int(interlace_method)
        {
            self.png_info.interlace_method = method;
        }
        else
        {
            return Err(PngDecodeErrors::BadHeader("Unknown interlace method"));
        }

        let pos_end = self.stream.get_position();

        assert_eq!(pos_end - pos_start, 13); //we read all bytes

        // skip crc
        self.stream.skip(4);

        info!("Width: {}", self.png_info.width);
        info!("Height: {}", self.png_info.height);
        info!("Depth: {}", self.png_info.depth);
        info!("Color: {:?}", self.png_info.color);
        info!("Interlace: {:?}", self.png_info.interlace_method);

        self.seen_hdr = true;

        Ok(())
    }

    pub(crate) fn parse_plte(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if self.seen_plte
        {
            return Err(PngDecodeErrors::GenericStatic(
                "Multiple PLTE chunks, corrupt PNG"
            ));
        }

        if chunk.length % 3 != 0
        {
            return Err(PngDecodeErrors::GenericStatic(
                "Invalid PLTE length, corrupt PNG"
            ));
        }

        let entries = chunk.length / 3;

        if entries > 256
        {
            return Err(PngDecodeErrors::Generic(format!(
                "PLTE chunk with {entries} entries, maximum is 256"
            )));
        }

        self.palette.resize(entries, PLTEEntry::default());

        for entry in self.palette.iter_mut()
        {
            entry.red = self.stream.get_u8();
            entry.green = self.stream.get_u8();
            entry.blue = self.stream.get_u8();
        }

        // skip crc
        self.stream.skip(4);
        self.seen_plte = true;

        Ok(())
    }

    pub(crate) fn parse_idat(&mut self, png_chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        // stitch all compressed bytes into one stream, scanlines do not
        // respect chunk boundaries so inflate has to see them whole
        let idat_stream = self.stream.peek_at(0, png_chunk.length)?;

        self.idat_chunks.extend_from_slice(idat_stream);

        // skip payload plus crc
        self.stream.skip(png_chunk.length + 4);

        Ok(())
    }

    pub(crate) fn parse_gama(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors>
    {
        if chunk.length != 4
        {
            let error = format!("gAMA chunk length is not 4 but {}", chunk.length);
            return Err(PngDecodeErrors::Generic(error));
        }

        // the chunk stores gamma scaled by 100000, e.g 45455 for 1/2.2
        self.gama = (self.stream.get_u32_be() as f64 / 100000.0) as f32;
        self.seen_gamma = true;

        if self.gama == 0.0
        {
            // a zero carries no usable curve, the pixels stay as they are
            warn!("gAMA chunk stores a gamma of zero, ignoring it");
        }

        // skip crc
        self.stream.skip(4);

        Ok(())
    }
}
