/// Samples per pixel in a keyable frame (red, green, blue, alpha).
pub const RGBA_CHANNELS: u8 = 4;

/// A single video/image frame: contiguous interleaved bytes in row-major order.
///
/// Readers in this crate always produce RGBA frames; the keyer and the alpha
/// blur refuse anything else.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Shorthand for a four-channel frame.
    pub fn rgba(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        Self::new(data, width, height, RGBA_CHANNELS, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
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

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_rgba(&self) -> bool {
        self.channels == RGBA_CHANNELS
    }

}
