use std::io::Read;

use crate::clock::Clock;
use crate::constants::{KEY_COUNT, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::error::Fault;
use crate::instruction;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns:
///  - the current `state`
///  - the `pressed_keys` keypad snapshot fed into every executor
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - stepping the CPU one instruction at a time
/// - ticking its countdown timers against a wall clock
/// - taking the frame buffer when it needs to be presented
pub struct Chip8 {
    state: State,
    pressed_keys: [bool; KEY_COUNT],
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            pressed_keys: [false; KEY_COUNT],
        }
    }

    /// Load a program image into memory at the program start address.
    ///
    /// The image is copied verbatim; anything larger than the space between
    /// 0x200 and the end of memory is rejected before the machine runs.
    /// Returns the image size in bytes.
    ///
    /// # Arguments
    /// * `reader` a reader over a raw program image
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Fault> {
        let mut image = Vec::new();
        reader.read_to_end(&mut image)?;
        if image.len() > MAX_PROGRAM_SIZE {
            return Err(Fault::ProgramTooLarge {
                size: image.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + image.len()].copy_from_slice(&image);
        log::debug!("loaded {} byte program at {:#05x}", image.len(), start);
        Ok(image.len())
    }

    /// Takes the frame buffer if the display should be redrawn, clearing the
    /// redraw flag. The caller must copy or render it before the next cycle.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of a key; indices above 0xF are ignored.
    ///
    /// # Arguments
    /// * `key` the key that was pressed, 0x0..=0xF
    pub fn key_press(&mut self, key: u8) {
        if let Some(pressed) = self.pressed_keys.get_mut(key as usize) {
            *pressed = true;
        }
    }

    /// Unset the pressed status of a key; indices above 0xF are ignored.
    ///
    /// # Arguments
    /// * `key` the key that was released, 0x0..=0xF
    pub fn key_release(&mut self, key: u8) {
        if let Some(pressed) = self.pressed_keys.get_mut(key as usize) {
            *pressed = false;
        }
    }

    /// Read-only view of the machine state, for tracing and tests.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The word the next `step` will execute, or `None` when the program
    /// counter has left program memory and the next `step` will halt.
    pub fn peek_word(&self) -> Option<u16> {
        if self.pc_in_bounds() {
            Some(self.fetch())
        } else {
            None
        }
    }

    /// Advances the CPU by a single cycle:
    /// - halts if the program counter has left program memory
    /// - fetches, decodes, and executes the word at the program counter
    ///
    /// A wait-for-key instruction leaves the program counter in place, so
    /// the same word is re-evaluated on the next call; the caller stays free
    /// to poll input and present frames in between.
    pub fn step(&mut self) -> Result<(), Fault> {
        if !self.pc_in_bounds() {
            return Err(Fault::ProgramCounterOutOfBounds { pc: self.state.pc });
        }
        let word = self.fetch();
        self.state = instruction::execute(word, &self.state, self.pressed_keys)?;
        Ok(())
    }

    /// Decrements both timers by one when the clock reports a tick, flooring
    /// at zero. Returns true when the sound timer just ran out, which is the
    /// moment an audible alert should fire.
    ///
    /// # Arguments
    /// * `clock` the wall-clock tick source shared across cycles
    pub fn tick_timers(&mut self, clock: &mut Clock) -> bool {
        if !clock.check() {
            return false;
        }

        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }

        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
            return self.state.sound_timer == 0;
        }

        false
    }

    /// Whether both bytes of the word at the program counter lie inside
    /// program memory.
    fn pc_in_bounds(&self) -> bool {
        let pc = self.state.pc;
        pc >= PROGRAM_START && (pc as usize) + 1 < MEMORY_SIZE
    }

    /// The word at the program counter. Memory holds bytes; words are two
    /// consecutive bytes, most significant first. Callers check
    /// `pc_in_bounds` first.
    fn fetch(&self) -> u16 {
        let left = u16::from(self.state.memory[self.state.pc as usize]);
        let right = u16::from(self.state.memory[self.state.pc as usize + 1]);
        left << 8 | right
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
