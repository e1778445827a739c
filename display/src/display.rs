use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use quirk8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use quirk8_core::FrameBuffer;

/// # Display
/// Presents the interpreter's framebuffer in an SDL2 window.
///
/// The framebuffer already holds final 32-bit colors, so presentation is a
/// straight upload: serialize the cells to bytes, stream them into a texture
/// sized 64x32, and let SDL scale it up to the window.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a window sized to the framebuffer times `scale` and a canvas
    /// to stream frames onto.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context to create the window in
    /// * `scale` integer size multiplier for each framebuffer pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Self {
        let video_subsystem = sdl.video().unwrap();
        let window = video_subsystem
            .window(
                "quirk8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .unwrap();
        let canvas = window.into_canvas().build().unwrap();

        Display { canvas }
    }

    /// Serialize a framebuffer for upload as an RGBA32 texture.
    ///
    /// RGBA32 matches the in-memory layout of the packed u32 cells, so each
    /// cell contributes its native-endian bytes unchanged.
    fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame.iter().flat_map(|cell| cell.to_ne_bytes()).collect()
    }

    /// Upload a framebuffer and present it.
    ///
    /// # Arguments
    /// * `frame` the framebuffer to present
    pub fn render(&mut self, frame: &FrameBuffer) {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGBA32,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .unwrap();

        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&Display::frame_to_texture(frame));
            })
            .unwrap();

        self.canvas.copy(&texture, None, None).unwrap();
        self.canvas.present()
    }
}
