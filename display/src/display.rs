use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::FrameBuffer;

/// Window scale used when none is given
pub const DEFAULT_SCALE: u32 = 10;

/// RGB of an unlit pixel
const BACKGROUND: [u8; 3] = [0x14, 0x28, 0x38];
/// RGB of a lit pixel
const FOREGROUND: [u8; 3] = [0x9F, 0xFD, 0xBE];

fn colour(pixel: u8) -> &'static [u8; 3] {
    if pixel == 0 {
        &BACKGROUND
    } else {
        &FOREGROUND
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 on/off pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 64x32 bytes.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
///
/// The window is closed when the display is dropped.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel, 0 for the default
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let scale = if scale == 0 { DEFAULT_SCALE } else { scale };
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "CHIP-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    ///
    /// This creates a two colour rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Replacing each cell with the foreground or background colour
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&pixel| colour(pixel).iter().copied())
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (y, row) in pixels.chunks(DISPLAY_WIDTH * 3).enumerate() {
                buffer[y * pitch..y * pitch + row.len()].copy_from_slice(row);
            }
        })?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
