//! Packed 32-bit image buffer.
//!
//! Pixels are `0xAARRGGBB` words stored row-major. Row 0 is the bottom of
//! the picture, which is the order bitmap files store rows in.

use thiserror::Error;

/// Errors that can occur when allocating an image.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("Image of {width}x{height} pixels is too large")]
    TooLarge { width: u32, height: u32 },
}

pub type ImageResult<T> = Result<T, ImageError>;

/// An owned buffer of packed pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image32 {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Image32 {
    /// Allocate a buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> ImageResult<Self> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyDimensions { width, height });
        }
        // The bitmap header stores the byte size in 32 bits
        let len = (width as u64) * (height as u64);
        if len * 4 > u32::MAX as u64 {
            return Err(ImageError::TooLarge { width, height });
        }

        Ok(Self {
            width,
            height,
            pixels: vec![0; len as usize],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y as usize) * (self.width as usize) + x as usize)
    }

    /// Get the pixel at (x, y), or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Returns false if (x, y) is outside the image.
    pub fn set(&mut self, x: u32, y: u32, word: u32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = word;
                true
            }
            None => false,
        }
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable access to all pixels, row-major.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> Option<&[u32]> {
        let w = self.width as usize;
        let start = (y < self.height).then(|| y as usize * w)?;
        Some(&self.pixels[start..start + w])
    }

    /// Iterate rows bottom to top, each as a disjoint mutable slice.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (u32, &mut [u32])> {
        self.pixels
            .chunks_exact_mut(self.width as usize)
            .enumerate()
            .map(|(y, row)| (y as u32, row))
    }

    /// The pixel words as native-endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Size of the pixel data in bytes.
    pub fn byte_len(&self) -> u32 {
        // Bounded by the check in `new`
        (self.pixels.len() * 4) as u32
    }
}
