use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::thread;
use std::time::Duration;

use log::{info, warn};
use sdl2::event::Event;

use quirk8_core::{Chip8, Palette};
use quirk8_display::Display;

use crate::keymap::keymap;

/// Wire the machine to the platform and loop until the window closes.
///
/// Each pass drains pending key events into the keypad, advances the machine
/// one instruction, presents the framebuffer when that instruction changed
/// it, and sleeps the configured delay. Timer decay rides along with the
/// steps, so the delay is also what sets the effective timer frequency.
pub fn run(rom: &Path, quirky: bool, palette: Palette, scale: u32, delay: u64) {
    let mut chip8 = Chip8::new(quirky, palette);

    // A rom that cannot be read leaves the machine in its reset state,
    // spinning harmlessly on the unknown opcodes of zeroed memory.
    match File::open(rom) {
        Ok(file) => match chip8.load_rom(&mut BufReader::new(file)) {
            Ok(size) => info!("loaded {} byte rom", size),
            Err(e) => warn!("{}; continuing with empty memory", e),
        },
        Err(e) => warn!("unable to open rom: {}; continuing with empty memory", e),
    }

    let sdl = sdl2::init().unwrap();
    let mut display = Display::new(&sdl, scale);
    let mut events = sdl.event_pump().unwrap();

    'event: loop {
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
            }
        }

        chip8.step();
        if let Some(frame) = chip8.get_frame() {
            display.render(frame);
        }

        thread::sleep(Duration::from_millis(delay));
    }
}
