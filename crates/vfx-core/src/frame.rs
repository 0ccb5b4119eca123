use serde::{Deserialize, Serialize};

/// Interleaved byte channels per pixel. Channel order follows the host
/// surface (BGRA8888).
pub const CHANNELS: usize = 4;

/// Dimensions of every frame an effect instance sees.
///
/// All inputs and the output of one instance share the same size, fixed at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: usize,
    pub height: usize,
}

impl FrameSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// A frame with no pixels. Hosts occasionally construct these before
    /// they know the real output size.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of bytes in one tightly packed frame, or `None` on overflow.
    pub fn checked_byte_len(&self) -> Option<usize> {
        self.width.checked_mul(self.height)?.checked_mul(CHANNELS)
    }

    /// Number of bytes in one tightly packed frame.
    pub fn byte_len(&self) -> usize {
        self.pixel_count() * CHANNELS
    }
}

/// Read-only view of a host frame with its length checked against the
/// instance size.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    data: &'a [u8],
}

impl<'a> FrameView<'a> {
    /// Wrap `data` as a frame of `size`. Returns `None` for empty sizes or
    /// buffers too short to hold a full frame; longer buffers are truncated
    /// to exactly one frame.
    pub fn new(data: &'a [u8], size: FrameSize) -> Option<Self> {
        if size.is_empty() {
            return None;
        }
        let len = size.checked_byte_len()?;
        let data = data.get(..len)?;
        Some(Self { data })
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }
}

/// Mutable counterpart of [`FrameView`] for the output surface.
#[derive(Debug)]
pub struct FrameViewMut<'a> {
    data: &'a mut [u8],
}

impl<'a> FrameViewMut<'a> {
    pub fn new(data: &'a mut [u8], size: FrameSize) -> Option<Self> {
        if size.is_empty() {
            return None;
        }
        let len = size.checked_byte_len()?;
        let data = data.get_mut(..len)?;
        Some(Self { data })
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }
}
