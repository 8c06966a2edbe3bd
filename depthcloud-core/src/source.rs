//! Decoded color and depth sample buffers.
//!
//! The reprojection engine never touches the filesystem; it consumes these
//! buffers, which are either loaded from disk here or built directly in tests.

use std::path::Path;

use crate::reproject::ReprojectError;

/// A decoded color image: row-major interleaved bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    pub width: u32,
    pub height: u32,
    /// Channel count of the decoded source. The reprojection engine requires 3.
    pub channels: u8,
    /// Row-major, `channels` bytes per pixel.
    pub data: Vec<u8>,
}

impl ColorMap {
    /// Wrap an already-decoded buffer.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * channels as u32) as usize);
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Decode a color image from disk, converting to RGB8.
    ///
    /// The source must decode with 3 color channels; sources with a different
    /// channel count are rejected so a grayscale or RGBA file paired against a
    /// depth map fails loudly instead of silently reinterpreting bytes.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReprojectError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| ReprojectError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;

        let channels = img.color().channel_count();
        let rgb = img.into_rgb8();
        Ok(Self {
            width: rgb.width(),
            height: rgb.height(),
            channels,
            data: rgb.into_raw(),
        })
    }
}

/// A decoded depth map: row-major unsigned 16-bit samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthMap {
    pub width: u32,
    pub height: u32,
    /// Channel count of the decoded source. The reprojection engine requires 1.
    pub channels: u8,
    /// Row-major, one sample per pixel once validated.
    pub data: Vec<u16>,
}

impl DepthMap {
    /// Wrap an already-decoded buffer.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u16>) -> Self {
        debug_assert_eq!(data.len(), (width * height) as usize * channels as usize);
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Decode a depth map from disk, converting to 16-bit luma.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReprojectError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| ReprojectError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;

        let channels = img.color().channel_count();
        let luma = img.into_luma16();
        Ok(Self {
            width: luma.width(),
            height: luma.height(),
            channels,
            data: luma.into_raw(),
        })
    }
}
