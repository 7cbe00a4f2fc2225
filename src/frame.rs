//! Frame buffers and the identity token used by the pipeline cache.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity stamp for a [`Frame`].
///
/// Every constructed frame (including clones) receives a fresh token, so two
/// buffers with identical pixel content are still distinct identities. The
/// pipeline's one-slot cache compares tokens, never pixel content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// Errors that can occur constructing a frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame data length {actual} does not match {width}x{height}x{channels}")]
    SizeMismatch {
        width: u32,
        height: u32,
        channels: u8,
        actual: usize,
    },
    #[error("unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(u8),
}

/// A single row-major pixel buffer, 3 (RGB) or 4 (RGBA) channels, 8 bits per
/// channel.
#[derive(Debug)]
pub struct Frame {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
    token: FrameToken,
}

impl Frame {
    /// Create a frame from raw pixel data, validating the buffer length.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, FrameError> {
        if channels != 3 && channels != 4 {
            return Err(FrameError::UnsupportedChannels(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(FrameError::SizeMismatch {
                width,
                height,
                channels,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
            token: FrameToken::next(),
        })
    }

    /// Create a frame filled with a single channel value.
    pub fn filled(width: u32, height: u32, channels: u8, value: u8) -> Result<Self, FrameError> {
        let len = width as usize * height as usize * channels as usize;
        Self::new(width, height, channels, vec![value; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Identity token for cache comparisons.
    pub fn token(&self) -> FrameToken {
        self.token
    }

    /// Channel values of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels as usize;
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.data[idx..idx + c]
    }

    /// Canonical 4-channel copy; missing alpha is filled opaque.
    pub fn to_rgba(&self) -> Frame {
        if self.channels == 4 {
            return self.clone();
        }
        let pixels = self.width as usize * self.height as usize;
        let mut data = Vec::with_capacity(pixels * 4);
        for px in self.data.chunks_exact(3) {
            data.extend_from_slice(px);
            data.push(255);
        }
        Frame {
            width: self.width,
            height: self.height,
            channels: 4,
            data,
            token: FrameToken::next(),
        }
    }

    /// Widen the buffer to f32 for arithmetic (values stay on the 0-255 scale).
    pub fn to_f32(&self) -> Vec<f32> {
        self.data.iter().map(|&v| v as f32).collect()
    }

    /// Build a frame from an f32 buffer, clipping each value to 0-255.
    pub fn from_f32(
        width: u32,
        height: u32,
        channels: u8,
        data: &[f32],
    ) -> Result<Self, FrameError> {
        let bytes = data.iter().map(|&v| v.clamp(0.0, 255.0) as u8).collect();
        Self::new(width, height, channels, bytes)
    }
}

impl Clone for Frame {
    /// Cloning copies pixel content but stamps a fresh identity token: a copy
    /// is a cache miss by design.
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.clone(),
            token: FrameToken::next(),
        }
    }
}

/// Content equality: dimensions and pixels, ignoring identity tokens.
impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.channels == other.channels
            && self.data == other.data
    }
}

impl Eq for Frame {}
