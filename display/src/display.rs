use sdl2::pixels::PixelFormatEnum;

use c8core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use c8core::state::FrameBuffer;

const SCALE: usize = 10;

/// # Display
/// Presents the 64x32 monochrome frame buffer in a window, scaled up by
/// `SCALE`. `render` is only called when the machine hands over a fresh
/// frame, so there is no redraw loop of its own.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Chip-8",
                (DISPLAY_WIDTH * SCALE) as u32,
                (DISPLAY_HEIGHT * SCALE) as u32,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Flattens a frame buffer into the byte layout of an RGB24 texture.
    ///
    /// Rows are concatenated and every pixel becomes three identical channel
    /// bytes, with the 0/1 pixel state scaled to 0/255 intensity.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flatten()
            .flat_map(|&px| [px * 255; 3])
            .collect()
    }

    /// Uploads the frame as an RGB24 streaming texture and presents it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.width as u32,
                self.height as u32,
            )
            .map_err(|e| e.to_string())?;

        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&Display::frame_to_sdl_texture(frame));
            })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_sdl_texture_triplicates_and_scales() {
        let mut frame: FrameBuffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][1] = 1;
        frame[2][0] = 1;
        let bytes = Display::frame_to_sdl_texture(&frame);

        // one RGB triple per pixel, rows in order
        assert_eq!(bytes.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * 3);
        assert_eq!(bytes[0..6], [0, 0, 0, 255, 255, 255]);
        let row_2 = 2 * DISPLAY_WIDTH * 3;
        assert_eq!(bytes[row_2..row_2 + 3], [255, 255, 255]);
        assert_eq!(bytes[row_2 + 3..row_2 + 6], [0, 0, 0]);
    }
}
