use std::io;

use thiserror::Error;

/// Terminal machine conditions.
///
/// Unrecognized instructions are deliberately absent: they decode to
/// `Opcode::Unknown` and execute as a no-op.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("program image is {size} bytes but only {max_size} fit in memory")]
    ProgramTooLarge { size: usize, max_size: usize },

    #[error("call stack overflow at pc {pc:#06x}")]
    StackOverflow { pc: u16 },

    #[error("call stack underflow at pc {pc:#06x}")]
    StackUnderflow { pc: u16 },

    #[error("program counter {pc:#06x} left program memory")]
    ProgramCounterOutOfBounds { pc: u16 },

    #[error("memory access through i {i:#06x} runs past the end of memory at pc {pc:#06x}")]
    MemoryOutOfBounds { i: u16, pc: u16 },

    #[error(transparent)]
    Io(#[from] io::Error),
}
