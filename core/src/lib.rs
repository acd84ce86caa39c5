pub use crate::chip8::Chip8;
pub use crate::clock::Clock;
pub use crate::constants::{
    CLOCK_SPEED, DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MAX_PROGRAM_SIZE, MEMORY_SIZE,
    PROGRAM_START,
};
pub use crate::error::Fault;
pub use crate::state::{FrameBuffer, State};

pub mod chip8;
pub mod clock;
pub mod constants;
pub mod disas;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod operations;
pub mod state;
