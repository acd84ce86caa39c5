//! One state transition per operation kind.
//!
//! Every executor has the same shape: it consumes the raw word, the current
//! state, and the keypad, and produces the next state. Executors advance the
//! program counter by 2 except for jumps, calls, `ret`, and `mov_key`, which
//! set it (or leave it) themselves; skips advance by 4 when their condition
//! holds. Executors fault on stack exhaustion and on memory accesses through
//! I that would run past the end of memory.

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_SIZE, KEY_COUNT, MEMORY_SIZE, STACK_SIZE};
use crate::error::Fault;
use crate::opcode::Word;
use crate::state::State;

/// clear the frame buffer
pub fn clear(_word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    Ok(State {
        pc: state.pc + 0x2,
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    })
}

/// PC = STACK.pop()
pub fn ret(_word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow { pc: state.pc });
    }
    let sp = state.sp - 0x1;
    Ok(State {
        // the stored address is the CALL's; execution resumes just past it
        pc: state.stack[sp as usize] + 0x2,
        sp,
        ..*state
    })
}

/// PC = nnn
pub fn jmp_nnn(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    Ok(State {
        pc: word.addr(),
        ..*state
    })
}

/// STACK.push(PC); PC = nnn
///
/// `sp` counts the frames in use, so the push lands at `stack[sp]` and all
/// 16 slots are reachable.
pub fn call(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    if state.sp as usize >= STACK_SIZE {
        return Err(Fault::StackOverflow { pc: state.pc });
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = state.pc;
    Ok(State {
        pc: word.addr(),
        sp: state.sp + 0x1,
        stack,
        ..*state
    })
}

/// if Vx == kk then pc += 2
pub fn skip_x_kk(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let pc = if state.v[word.x() as usize] == word.kk() {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// if Vx != kk then pc += 2
pub fn skipn_x_kk(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let pc = if state.v[word.x() as usize] != word.kk() {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// if Vx == Vy then pc += 2
pub fn skip_x_y(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let pc = if state.v[word.x() as usize] == state.v[word.y() as usize] {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// Vx = kk
pub fn mvi_x_kk(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let mut v = state.v;
    v[word.x() as usize] = word.kk();
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx += kk; overflow wraps, no flag
pub fn add_x_kk(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let (res, _) = state.v[word.x() as usize].overflowing_add(word.kk());
    let mut v = state.v;
    v[word.x() as usize] = res;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx = Vy
pub fn mov_x_y(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let mut v = state.v;
    v[word.x() as usize] = v[word.y() as usize];
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx |= Vy
pub fn or(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let mut v = state.v;
    v[word.x() as usize] |= v[word.y() as usize];
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx &= Vy
pub fn and(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let mut v = state.v;
    v[word.x() as usize] &= v[word.y() as usize];
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx ^= Vy
pub fn xor(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let mut v = state.v;
    v[word.x() as usize] ^= v[word.y() as usize];
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx += Vy; VF = carry
pub fn add_x_y(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let (res, over) = state.v[word.x() as usize].overflowing_add(state.v[word.y() as usize]);
    let mut v = state.v;
    v[0xF] = if over { 0x1 } else { 0x0 };
    v[word.x() as usize] = res;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx -= Vy; VF = not borrow
pub fn sub(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let (res, under) = state.v[word.x() as usize].overflowing_sub(state.v[word.y() as usize]);
    let mut v = state.v;
    v[0xF] = if under { 0x0 } else { 0x1 };
    v[word.x() as usize] = res;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let mut v = state.v;
    v[0xF] = v[word.x() as usize] & 0x1;
    v[word.x() as usize] /= 0x2;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx = Vy - Vx; VF = not borrow
pub fn subn(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let (res, under) = state.v[word.y() as usize].overflowing_sub(state.v[word.x() as usize]);
    let mut v = state.v;
    v[0xF] = if under { 0x0 } else { 0x1 };
    v[word.x() as usize] = res;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let (res, over) = state.v[word.x() as usize].overflowing_mul(2);
    let mut v = state.v;
    v[0xF] = if over { 0x1 } else { 0x0 };
    v[word.x() as usize] = res;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// if Vx != Vy then pc += 2
pub fn skipn_x_y(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let pc = if state.v[word.x() as usize] != state.v[word.y() as usize] {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// I = nnn
pub fn mvi_i_nnn(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    Ok(State {
        pc: state.pc + 0x2,
        i: word.addr(),
        ..*state
    })
}

/// PC = V0 + nnn
pub fn jmp_v0_nnn(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    Ok(State {
        pc: u16::from(state.v[0x0]) + word.addr(),
        ..*state
    })
}

/// Vx = random byte & kk
pub fn rand(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let rand_byte: u8 = rand::random();
    let mut v = state.v;
    v[word.x() as usize] = rand_byte & word.kk();
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// XOR an n-row sprite from memory[I..I+n) onto the frame buffer at (Vx, Vy).
///
/// Each sprite row is one byte wide with its most significant bit drawn
/// leftmost. Both axes wrap. VF is set when any lit pixel is turned off.
/// Faults when the sprite rows run past the end of memory.
pub fn disp(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    if state.i as usize + word.n() as usize > MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds {
            i: state.i,
            pc: state.pc,
        });
    }

    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;

    // collision flag accumulates over the whole draw call
    v[0xF] = 0x0;

    for row in 0..word.n() as usize {
        let y = (state.v[word.y() as usize] as usize + row) % DISPLAY_HEIGHT;
        for col in 0..8 {
            let x = (state.v[word.x() as usize] as usize + col) % DISPLAY_WIDTH;
            let sprite_bit = (state.memory[state.i as usize + row] >> (7 - col)) & 1;
            v[0xF] |= sprite_bit & state.frame_buffer[y][x];
            frame_buffer[y][x] ^= sprite_bit;
        }
    }

    Ok(State {
        pc: state.pc + 0x2,
        draw_flag: true,
        v,
        frame_buffer,
        ..*state
    })
}

/// if key Vx is down then pc += 2; Vx >= 16 never matches
pub fn skip_key(word: u16, state: &State, keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let key = state.v[word.x() as usize] as usize;
    let pc = if key < KEY_COUNT && keys[key] {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// if key Vx is up then pc += 2; Vx >= 16 always skips
pub fn skipn_key(word: u16, state: &State, keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let key = state.v[word.x() as usize] as usize;
    let pc = if key < KEY_COUNT && keys[key] {
        state.pc + 0x2
    } else {
        state.pc + 0x4
    };
    Ok(State { pc, ..*state })
}

/// Vx = DT
pub fn mov_x_delay(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let mut v = state.v;
    v[word.x() as usize] = state.delay_timer;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Wait for a key press and store it in Vx.
///
/// The keypad is scanned 0..F in ascending order each cycle; the lowest key
/// down wins. While no key is down the program counter is left untouched so
/// the same word is re-evaluated next cycle. This is the machine's only
/// suspension point: the outer loop keeps polling input and presenting
/// frames while the program sits here.
pub fn mov_key(word: u16, state: &State, keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    match keys.iter().position(|&down| down) {
        Some(key) => {
            let mut v = state.v;
            v[word.x() as usize] = key as u8;
            Ok(State {
                pc: state.pc + 0x2,
                v,
                ..*state
            })
        }
        None => Ok(*state),
    }
}

/// DT = Vx
pub fn mov_delay_x(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    Ok(State {
        pc: state.pc + 0x2,
        delay_timer: state.v[word.x() as usize],
        ..*state
    })
}

/// ST = Vx
pub fn mov_sound(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    Ok(State {
        pc: state.pc + 0x2,
        sound_timer: state.v[word.x() as usize],
        ..*state
    })
}

/// I += Vx
pub fn add_i_x(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    Ok(State {
        pc: state.pc + 0x2,
        i: state.i.wrapping_add(u16::from(state.v[word.x() as usize])),
        ..*state
    })
}

/// I = address of the font glyph for digit Vx (glyphs are 5 bytes from 0x000)
pub fn sprite_pos(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    Ok(State {
        pc: state.pc + 0x2,
        i: u16::from(state.v[word.x() as usize]) * GLYPH_SIZE,
        ..*state
    })
}

/// memory[I..I+3] = hundreds, tens, ones of Vx; faults past the end of memory
pub fn movbcd(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let i = state.i as usize;
    if i + 0x3 > MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds {
            i: state.i,
            pc: state.pc,
        });
    }
    let bcd = [
        state.v[word.x() as usize] / 100 % 10,
        state.v[word.x() as usize] / 10 % 10,
        state.v[word.x() as usize] % 10,
    ];
    let mut memory = state.memory;
    memory[i..i + 0x3].copy_from_slice(&bcd);
    Ok(State {
        pc: state.pc + 0x2,
        memory,
        ..*state
    })
}

/// memory[I..=I+x] = V0..=Vx; I is left unchanged
pub fn movm_i_x(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let i = state.i as usize;
    let count = word.x() as usize + 1;
    if i + count > MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds {
            i: state.i,
            pc: state.pc,
        });
    }
    let mut memory = state.memory;
    memory[i..i + count].copy_from_slice(&state.v[..count]);
    Ok(State {
        pc: state.pc + 0x2,
        memory,
        ..*state
    })
}

/// V0..=Vx = memory[I..=I+x]; I is left unchanged
pub fn movm_x_i(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let i = state.i as usize;
    let count = word.x() as usize + 1;
    if i + count > MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds {
            i: state.i,
            pc: state.pc,
        });
    }
    let mut v = state.v;
    v[..count].copy_from_slice(&state.memory[i..i + count]);
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Unrecognized words execute as a plain no-op
pub fn unknown(word: u16, state: &State, _keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    log::debug!("unrecognized word {:04x} at pc {:04x}", word, state.pc);
    Ok(State {
        pc: state.pc + 0x2,
        ..*state
    })
}
