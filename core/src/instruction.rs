use crate::constants::KEY_COUNT;
use crate::error::Fault;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// Routes a decoded word to its executor.
///
/// Dispatch is an exhaustive match over the closed `Opcode` set, so adding a
/// variant without an executor fails to compile. Unclaimed words land on
/// `unknown`, which is an ordinary executor rather than an error path.
pub fn execute(word: u16, state: &State, keys: [bool; KEY_COUNT]) -> Result<State, Fault> {
    let executor = match Opcode::decode(word) {
        Opcode::Clear => clear,
        Opcode::Ret => ret,
        Opcode::JmpNnn => jmp_nnn,
        Opcode::Call => call,
        Opcode::SkipXKk => skip_x_kk,
        Opcode::SkipnXKk => skipn_x_kk,
        Opcode::SkipXY => skip_x_y,
        Opcode::MviXKk => mvi_x_kk,
        Opcode::AddXKk => add_x_kk,
        Opcode::MovXY => mov_x_y,
        Opcode::Or => or,
        Opcode::And => and,
        Opcode::Xor => xor,
        Opcode::AddXY => add_x_y,
        Opcode::Sub => sub,
        Opcode::Shr => shr,
        Opcode::Subn => subn,
        Opcode::Shl => shl,
        Opcode::SkipnXY => skipn_x_y,
        Opcode::MviINnn => mvi_i_nnn,
        Opcode::JmpV0Nnn => jmp_v0_nnn,
        Opcode::Rand => rand,
        Opcode::Disp => disp,
        Opcode::SkipKey => skip_key,
        Opcode::SkipnKey => skipn_key,
        Opcode::MovXDelay => mov_x_delay,
        Opcode::MovKey => mov_key,
        Opcode::MovDelayX => mov_delay_x,
        Opcode::MovSound => mov_sound,
        Opcode::AddIX => add_i_x,
        Opcode::SpritePos => sprite_pos,
        Opcode::Movbcd => movbcd,
        Opcode::MovmIX => movm_i_x,
        Opcode::MovmXI => movm_x_i,
        Opcode::Unknown => unknown,
    };
    executor(word, state, keys)
}
