//! Interleaved-channel floating point image buffer
//!
//! `Image` is the foundational data type of the matching engine: an
//! interleaved W×H×C grid of `f32` samples. It is reference-counted so
//! that cloning (passing images between pipeline stages) is cheap and a
//! deep copy is always an explicit operation, never an implicit one.

use std::sync::Arc;

use crate::error::{Error, Result};

#[derive(Debug)]
struct ImageData {
    width: u32,
    height: u32,
    channels: u32,
    pixels: Vec<f32>,
}

/// An interleaved W×H×C grid of `f32` pixel samples.
///
/// Cloning an `Image` shares the underlying buffer (an `Arc`); use
/// [`Image::deep_clone`] when an independent copy is required. There is no
/// way to mutate an `Image` in place: obtain an [`ImageMut`] via
/// [`Image::try_into_mut`] (reuses the buffer if this is the only handle)
/// or [`Image::to_mut`] (always copies), mutate, then convert back.
#[derive(Debug, Clone)]
pub struct Image {
    inner: Arc<ImageData>,
}

#[inline]
fn index(x: u32, y: u32, c: u32, width: u32, channels: u32) -> usize {
    ((y * width + x) * channels + c) as usize
}

impl Image {
    /// Create a new image with all samples set to zero.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(Error::InvalidDimension {
                width,
                height,
                channels,
            });
        }
        let len = (width as usize) * (height as usize) * (channels as usize);
        Ok(Self::from_pixels_unchecked(
            width,
            height,
            channels,
            vec![0.0; len],
        ))
    }

    /// Wrap an existing pixel buffer. Ownership of `pixels` moves into the
    /// image; no copy is made. This is the non-owning-view case of the
    /// data model collapsed onto Rust's ownership rules: the caller gives
    /// up the `Vec` rather than retaining a raw pointer into it.
    pub fn from_pixels(width: u32, height: u32, channels: u32, pixels: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(Error::InvalidDimension {
                width,
                height,
                channels,
            });
        }
        let expected = (width as usize) * (height as usize) * (channels as usize);
        if pixels.len() != expected {
            return Err(Error::DataLengthMismatch {
                width,
                height,
                channels,
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self::from_pixels_unchecked(width, height, channels, pixels))
    }

    fn from_pixels_unchecked(width: u32, height: u32, channels: u32, pixels: Vec<f32>) -> Self {
        Image {
            inner: Arc::new(ImageData {
                width,
                height,
                channels,
                pixels,
            }),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.channels
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.inner.width && (y as u32) < self.inner.height
    }

    /// Read a sample, bounds-checked.
    #[inline]
    pub fn get(&self, x: u32, y: u32, c: u32) -> Option<f32> {
        if x >= self.inner.width || y >= self.inner.height || c >= self.inner.channels {
            return None;
        }
        Some(self.get_unchecked(x, y, c))
    }

    /// Read a sample without bounds checking.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32, c: u32) -> f32 {
        self.inner.pixels[index(x, y, c, self.inner.width, self.inner.channels)]
    }

    /// Raw access to the backing buffer.
    #[inline]
    pub fn pixels(&self) -> &[f32] {
        &self.inner.pixels
    }

    /// Number of strong references sharing this buffer.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a fully independent copy of this image.
    pub fn deep_clone(&self) -> Self {
        Self::from_pixels_unchecked(
            self.inner.width,
            self.inner.height,
            self.inner.channels,
            self.inner.pixels.clone(),
        )
    }

    /// Obtain a mutable handle, reusing the buffer if this is the sole
    /// reference. Returns `self` back (as `Err`) when the buffer is shared.
    pub fn try_into_mut(self) -> std::result::Result<ImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(ImageMut { inner: data }),
            Err(arc) => Err(Image { inner: arc }),
        }
    }

    /// Obtain a mutable handle, always copying the buffer.
    pub fn to_mut(&self) -> ImageMut {
        ImageMut {
            inner: ImageData {
                width: self.inner.width,
                height: self.inner.height,
                channels: self.inner.channels,
                pixels: self.inner.pixels.clone(),
            },
        }
    }

    /// Derive a single-channel grayscale (luma) image from a 3-channel
    /// color image, per §4.C: `0.299 R + 0.587 G + 0.114 B`, scale
    /// preserved (inputs and output both live in `[0,255]`).
    ///
    /// A single-channel input is returned unchanged via `deep_clone`.
    pub fn to_grayscale(&self) -> Result<Image> {
        if self.inner.channels == 1 {
            return Ok(self.deep_clone());
        }
        if self.inner.channels != 3 {
            return Err(Error::ChannelOutOfRange {
                channel: self.inner.channels,
                channels: 3,
            });
        }
        let w = self.inner.width;
        let h = self.inner.height;
        let mut out = vec![0.0f32; (w as usize) * (h as usize)];
        for y in 0..h {
            for x in 0..w {
                let r = self.get_unchecked(x, y, 0);
                let g = self.get_unchecked(x, y, 1);
                let b = self.get_unchecked(x, y, 2);
                out[(y * w + x) as usize] = 0.299 * r + 0.587 * g + 0.114 * b;
            }
        }
        Image::from_pixels(w, h, 1, out)
    }
}

/// Mutable handle onto an image's pixel buffer.
#[derive(Debug)]
pub struct ImageMut {
    inner: ImageData,
}

impl ImageMut {
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.channels
    }

    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32, c: u32) -> f32 {
        self.inner.pixels[index(x, y, c, self.inner.width, self.inner.channels)]
    }

    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, c: u32, value: f32) {
        let idx = index(x, y, c, self.inner.width, self.inner.channels);
        self.inner.pixels[idx] = value;
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, c: u32, value: f32) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height || c >= self.inner.channels {
            return Err(Error::ChannelOutOfRange {
                channel: c,
                channels: self.inner.channels,
            });
        }
        self.set_unchecked(x, y, c, value);
        Ok(())
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.inner.pixels
    }
}

impl From<ImageMut> for Image {
    fn from(m: ImageMut) -> Self {
        Image {
            inner: Arc::new(m.inner),
        }
    }
}
