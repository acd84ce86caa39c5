use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use c8core::disas::{format_fields, format_instruction};
use c8core::{Fault, MAX_PROGRAM_SIZE, PROGRAM_START};

use crate::run::RunOptions;

mod keymap;
mod run;

#[derive(Parser)]
#[command(about = "Chip-8 interpreter and disassembler", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a listing of a program without executing it
    Disas {
        /// Path to a .ch8 program image
        file: PathBuf,
        /// Also dump the decoded fields of every word
        #[arg(long)]
        debug: bool,
    },
    /// Run a program in an SDL2 window
    Interpret {
        /// Path to a .ch8 program image
        file: PathBuf,
        /// Log the average frame rate on every rendered frame
        #[arg(long)]
        show_fps: bool,
        /// Trace each instruction before it executes
        #[arg(long)]
        disas: bool,
        /// Trace the register file on every cycle
        #[arg(long)]
        dump_regs: bool,
    },
}

/// Prints one listing line per word, starting from the program start address.
/// A trailing odd byte is listed as the high byte of a final word.
fn disassemble(file: PathBuf, debug: bool) -> anyhow::Result<()> {
    let image =
        fs::read(&file).with_context(|| format!("unable to open {}", file.display()))?;
    if image.len() > MAX_PROGRAM_SIZE {
        return Err(Fault::ProgramTooLarge {
            size: image.len(),
            max_size: MAX_PROGRAM_SIZE,
        }
        .into());
    }

    for (offset, chunk) in image.chunks(2).enumerate() {
        let pc = PROGRAM_START + (offset as u16) * 2;
        let word = match *chunk {
            [left, right] => u16::from(left) << 8 | u16::from(right),
            [left] => u16::from(left) << 8,
            _ => unreachable!(),
        };
        println!("{}", format_instruction(pc, word));
        if debug {
            print!("{}", format_fields(word));
            println!(
                "\n============================================================================\n"
            );
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Disas { file, debug } => disassemble(file, debug),
        Command::Interpret {
            file,
            show_fps,
            disas,
            dump_regs,
        } => run::run(
            file,
            RunOptions {
                show_fps,
                trace_instructions: disas,
                dump_registers: dump_regs,
            },
        ),
    }
}
