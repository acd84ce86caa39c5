use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use sdl2::event::Event;

use c8core::disas::format_instruction;
use c8core::state::State;
use c8core::{Chip8, Clock, CLOCK_SPEED};
use c8display::Display;

use crate::keymap::keymap;

/// Options controlling the interpret loop traces.
pub struct RunOptions {
    pub show_fps: bool,
    pub trace_instructions: bool,
    pub dump_registers: bool,
}

/// The register file on one line, printed per cycle under `--dump-regs`.
fn format_registers(state: &State) -> String {
    let v: Vec<String> = state.v.iter().map(|r| format!("{:02x}", r)).collect();
    format!(
        "pc={:04x} i={:04x} sp={:02x} delay={:02x} sound={:02x} v=[{}]",
        state.pc,
        state.i,
        state.sp,
        state.delay_timer,
        state.sound_timer,
        v.join(" ")
    )
}

/// Loads a program and runs it in an SDL2 window until quit or a fault.
pub fn run(rom: PathBuf, options: RunOptions) -> anyhow::Result<()> {
    let mut chip8 = Chip8::new();

    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl).map_err(anyhow::Error::msg)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    let file = File::open(&rom).with_context(|| format!("unable to open {}", rom.display()))?;
    let mut reader = BufReader::new(file);
    let size = chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", rom.display()))?;
    log::info!("loaded {} byte program from {}", size, rom.display());

    let cycle_time = Duration::new(0, CLOCK_SPEED);
    let mut timer_clock = Clock::new();
    let started = Instant::now();
    let mut frame_counter: u32 = 0;

    'event: loop {
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame).map_err(anyhow::Error::msg)?;
            frame_counter += 1;
            if options.show_fps {
                let avg_fps = f64::from(frame_counter) / started.elapsed().as_secs_f64();
                println!("average fps = {:.2}", avg_fps);
            }
        }

        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_press(kc)
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc)
                    }
                }
                _ => continue,
            };
        }

        if options.trace_instructions {
            // a runaway program counter is reported by the step below
            if let Some(word) = chip8.peek_word() {
                println!("{}", format_instruction(chip8.state().pc, word));
            }
        }
        if options.dump_registers {
            println!("{}", format_registers(chip8.state()));
        }

        let cycle_start = Instant::now();
        if let Err(fault) = chip8.step() {
            log::error!("machine halted: {}", fault);
            return Err(fault.into());
        }

        if chip8.tick_timers(&mut timer_clock) {
            // terminal bell in place of a proper audio backend
            print!("\x07");
            io::stdout().flush()?;
        }

        let elapsed = cycle_start.elapsed();
        if cycle_time > elapsed {
            std::thread::sleep(cycle_time - elapsed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_registers() {
        let mut state = State::new();
        state.v[0x0] = 0xAB;
        state.v[0xF] = 0x01;
        state.i = 0x123;
        let line = format_registers(&state);
        assert!(line.starts_with("pc=0200 i=0123 sp=00 delay=00 sound=00 v=[ab"));
        assert!(line.ends_with("01]"));
    }
}
