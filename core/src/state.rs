use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SET, MEMORY_SIZE, PROGRAM_START, STACK_SIZE,
};

/// The frame buffer is indexed as [y][x]; 1 is lit, 0 is dark
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// A snapshot of the machine's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - VF doubles as the flag output of arithmetic, shift, and draw
///       operations; programs may still write it directly
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, initialized to 0x200
///
/// Pointer
/// - (sp) an 8-bit stack pointer counting the frames in use; the next
///   push lands at stack[sp]
///
/// Timers
/// - 2 8-bit countdown timers (delay & sound), decremented at 60Hz and
///   floored at zero
///
/// ## Memory
/// - a 16-entry stack of 16-bit return addresses
/// - 4096 bytes of addressable memory; 0x000-0x1FF holds the built-in
///   hexadecimal font, programs load at 0x200
/// - a 64x32 monochrome frame buffer
///     - (draw_flag) set whenever the frame buffer changes, consumed by
///       whatever presents the frame
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        // the font glyphs live at the very bottom of memory
        let mut memory = [0; MEMORY_SIZE];
        memory[..FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_program_start() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.i, 0);
    }

    #[test]
    fn test_font_resident_in_low_memory() {
        let state = State::new();
        assert_eq!(state.memory[..80], FONT_SET);
        // everything above the font is zeroed
        assert!(state.memory[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_frame_buffer_starts_dark() {
        let state = State::new();
        assert!(state
            .frame_buffer
            .iter()
            .all(|row| row.iter().all(|&px| px == 0)));
        assert!(!state.draw_flag);
    }
}
