//! Uncompressed 32-bit BMP output.
//!
//! The file is a packed 54-byte header (14-byte file header followed by a
//! 40-byte `BITMAPINFOHEADER`) and the raw pixel words. All fields are
//! little-endian. The height is positive, so rows run bottom to top, which
//! matches the row order of [`Image32`].

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use thiserror::Error;

use crate::buffer::Image32;

/// "BM" read as a little-endian u16.
pub const BITMAP_SIGNATURE: u16 = 0x4D42;

/// Errors that can occur when reading or writing bitmaps.
#[derive(Error, Debug)]
pub enum BitmapError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a bitmap file (signature {0:#06x})")]
    BadSignature(u16),

    #[error("Image of {width}x{height} pixels does not fit in a bitmap")]
    TooLarge { width: u32, height: u32 },
}

pub type BitmapResult<T> = Result<T, BitmapError>;

/// Bitmap file header plus info header, in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    pub file_type: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub bitmap_offset: u32,
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub bitmap_size: u32,
    pub h_resolution: i32,
    pub v_resolution: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BitmapHeader {
    /// Size of the serialized header in bytes.
    pub const SIZE: u32 = 54;

    /// Size of the file header that precedes the info header.
    const FILE_HEADER_SIZE: u32 = 14;

    /// Build the header for a 32 bits per pixel, uncompressed image.
    pub fn for_image(image: &Image32) -> BitmapResult<Self> {
        let too_large = || BitmapError::TooLarge {
            width: image.width(),
            height: image.height(),
        };

        let bitmap_size = image.byte_len();
        let file_size = Self::SIZE.checked_add(bitmap_size).ok_or_else(too_large)?;
        let width = i32::try_from(image.width()).map_err(|_| too_large())?;
        let height = i32::try_from(image.height()).map_err(|_| too_large())?;

        Ok(Self {
            file_type: BITMAP_SIGNATURE,
            file_size,
            reserved1: 0,
            reserved2: 0,
            bitmap_offset: Self::SIZE,
            size: Self::SIZE - Self::FILE_HEADER_SIZE,
            width,
            height,
            planes: 1,
            bits_per_pixel: 32,
            compression: 0,
            bitmap_size,
            h_resolution: 0,
            v_resolution: 0,
            colors_used: 0,
            colors_important: 0,
        })
    }

    /// Serialize the header field by field, without padding.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u16::<LittleEndian>(self.file_type)?;
        w.write_u32::<LittleEndian>(self.file_size)?;
        w.write_u16::<LittleEndian>(self.reserved1)?;
        w.write_u16::<LittleEndian>(self.reserved2)?;
        w.write_u32::<LittleEndian>(self.bitmap_offset)?;
        w.write_u32::<LittleEndian>(self.size)?;
        w.write_i32::<LittleEndian>(self.width)?;
        w.write_i32::<LittleEndian>(self.height)?;
        w.write_u16::<LittleEndian>(self.planes)?;
        w.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        w.write_u32::<LittleEndian>(self.compression)?;
        w.write_u32::<LittleEndian>(self.bitmap_size)?;
        w.write_i32::<LittleEndian>(self.h_resolution)?;
        w.write_i32::<LittleEndian>(self.v_resolution)?;
        w.write_u32::<LittleEndian>(self.colors_used)?;
        w.write_u32::<LittleEndian>(self.colors_important)?;
        Ok(())
    }

    /// Parse a header and check the signature.
    pub fn read_from<R: Read>(r: &mut R) -> BitmapResult<Self> {
        let file_type = r.read_u16::<LittleEndian>()?;
        if file_type != BITMAP_SIGNATURE {
            return Err(BitmapError::BadSignature(file_type));
        }

        Ok(Self {
            file_type,
            file_size: r.read_u32::<LittleEndian>()?,
            reserved1: r.read_u16::<LittleEndian>()?,
            reserved2: r.read_u16::<LittleEndian>()?,
            bitmap_offset: r.read_u32::<LittleEndian>()?,
            size: r.read_u32::<LittleEndian>()?,
            width: r.read_i32::<LittleEndian>()?,
            height: r.read_i32::<LittleEndian>()?,
            planes: r.read_u16::<LittleEndian>()?,
            bits_per_pixel: r.read_u16::<LittleEndian>()?,
            compression: r.read_u32::<LittleEndian>()?,
            bitmap_size: r.read_u32::<LittleEndian>()?,
            h_resolution: r.read_i32::<LittleEndian>()?,
            v_resolution: r.read_i32::<LittleEndian>()?,
            colors_used: r.read_u32::<LittleEndian>()?,
            colors_important: r.read_u32::<LittleEndian>()?,
        })
    }
}

/// Write `image` as a bitmap to any byte sink.
pub fn write_bitmap<W: Write>(image: &Image32, w: &mut W) -> BitmapResult<()> {
    let header = BitmapHeader::for_image(image)?;
    header.write_to(w)?;

    if cfg!(target_endian = "little") {
        w.write_all(image.as_bytes())?;
    } else {
        for &word in image.pixels() {
            w.write_u32::<LittleEndian>(word)?;
        }
    }
    Ok(())
}

/// Write `image` as a bitmap file at `path`.
pub fn save_bitmap<P: AsRef<Path>>(image: &Image32, path: P) -> BitmapResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_bitmap(image, &mut writer)?;
    writer.flush()?;
    Ok(())
}
