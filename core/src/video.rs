use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x], each cell is either 0 or 1
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Video
/// The 64x32 monochrome surface sprites are drawn onto.
/// Presenting it is up to whoever owns the window; `take_frame` hands out
/// the surface only when it has changed since the last time it was taken.
pub struct Video {
    pixels: FrameBuffer,
    draw_flag: bool,
}

impl Video {
    pub fn new() -> Self {
        Video {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: true,
        }
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
    }

    pub fn pixels(&self) -> &FrameBuffer {
        &self.pixels
    }

    /// Direct access for sprite drawing; marks the surface as changed
    pub fn pixels_mut(&mut self) -> &mut FrameBuffer {
        self.draw_flag = true;
        &mut self.pixels
    }

    /// Returns the FrameBuffer if the display should be redrawn and unsets the draw flag
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.draw_flag {
            self.draw_flag = false;
            Some(&self.pixels)
        } else {
            None
        }
    }
}

impl Default for Video {
    fn default() -> Self {
        Self::new()
    }
}
