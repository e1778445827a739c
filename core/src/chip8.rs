use std::io::Read;

use log::{info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{MAX_ROM_SIZE, PROGRAM_START};
use crate::error::Error;
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, Keypad, Palette, State};

/// # Chip-8
/// A Chip-8 machine and the step function that drives it.
///
/// Tracks:
/// - the machine `state` (registers, memory, stack, timers, framebuffer)
/// - the `keys` surface the host writes between steps
/// - a privately owned random source for the one opcode that needs one
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the machine one instruction at a time
/// - polling the framebuffer and beep signals after each step
///
/// The host decides the cadence: each `step` executes exactly one instruction
/// and then decays both timers by one, so calling it at roughly the timer
/// frequency times some multiplier approximates the original machine.
pub struct Chip8 {
    state: State,
    keys: Keypad,
    rng: StdRng,
}

impl Chip8 {
    /// A freshly reset machine. `quirky` selects the divergent historical
    /// behavior of the shift and bulk register transfer families; `palette`
    /// fixes the two framebuffer colors.
    pub fn new(quirky: bool, palette: Palette) -> Self {
        Chip8 {
            state: State::new(quirky, palette),
            keys: [false; 16],
            rng: StdRng::from_entropy(),
        }
    }

    /// Like `new` but with a deterministic random source, so tests covering
    /// Cxkk can assert exact outcomes.
    pub fn with_seed(quirky: bool, palette: Palette, seed: u64) -> Self {
        Chip8 {
            state: State::new(quirky, palette),
            keys: [false; 16],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Load a rom into memory at the entry point.
    ///
    /// The image is copied verbatim; anything beyond `MAX_ROM_SIZE` bytes
    /// cannot fit above the entry point and is refused rather than truncated.
    /// On failure the machine is left in its reset state, which executes
    /// zeroed memory as a harmless stream of unknown opcodes.
    ///
    /// # Arguments
    /// * `reader` a source of raw rom bytes, headerless
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(&rom);
        Ok(rom.len())
    }

    /// Returns the framebuffer if the last step mutated it.
    pub fn get_frame(&self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether the last step crossed the audible-tone condition (sound timer
    /// hitting 1 right before its decrement).
    pub fn get_beep(&self) -> bool {
        self.state.beep_flag
    }

    /// Set the pressed status of a key.
    ///
    /// # Arguments
    /// * `key` the key value 0x0..0xF
    pub fn key_press(&mut self, key: u8) {
        self.keys[key as usize] = true;
    }

    /// Unset the pressed status of a key.
    ///
    /// # Arguments
    /// * `key` the key value 0x0..0xF
    pub fn key_release(&mut self, key: u8) {
        self.keys[key as usize] = false;
    }

    /// Run one fetch-decode-execute cycle.
    ///
    /// The program counter is bumped past the fetched word before the
    /// instruction applies, unknown words are logged and skipped, and both
    /// timers decay at the end regardless of what ran.
    pub fn step(&mut self) {
        let word = self.fetch();
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            word,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        self.state.pc = self.state.pc.wrapping_add(2);
        self.state.draw_flag = false;
        self.state.beep_flag = false;

        match Instruction::decode(word) {
            Some(instruction) => {
                self.state = instruction.execute(&self.state, &self.keys, &mut self.rng)
            }
            None => warn!(
                "unknown opcode {:04X} at {:04X}",
                word,
                self.state.pc.wrapping_sub(2)
            ),
        }

        self.advance_timers();
    }

    /// Decay both timers, raising the beep signal on the sound timer's final
    /// tick.
    fn advance_timers(&mut self) {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            if self.state.sound_timer == 1 {
                info!("beep");
                self.state.beep_flag = true;
            }
            self.state.sound_timer -= 1;
        }
    }

    /// Combine the two bytes under the pc into a big-endian instruction word.
    fn fetch(&self) -> u16 {
        let hi = u16::from(self.state.memory[self.state.pc as usize]);
        let lo = u16::from(self.state.memory[self.state.pc as usize + 1]);
        hi << 8 | lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: Palette = Palette {
        enabled: 0xFF14_DCE6,
        disabled: 0xFF2D_9BC8,
    };

    fn chip8() -> Chip8 {
        Chip8::with_seed(false, PALETTE, 0x5EED)
    }

    fn chip8_with_rom(rom: &[u8]) -> Chip8 {
        let mut chip8 = chip8();
        chip8.load_rom(&mut &rom[..]).unwrap();
        chip8
    }

    #[test]
    fn test_fetch_combines_bytes_big_endian() {
        let chip8 = chip8_with_rom(&[0xAA, 0xBB]);
        assert_eq!(chip8.fetch(), 0xAABB);
    }

    #[test]
    fn test_load_rom_copies_to_entry_point() {
        let chip8 = chip8_with_rom(&[0x60, 0x05, 0x70, 0x03]);
        assert_eq!(chip8.state.memory[0x200..0x204], [0x60, 0x05, 0x70, 0x03]);
    }

    #[test]
    fn test_load_rom_reports_size() {
        let mut chip8 = chip8();
        let loaded = chip8.load_rom(&mut &[0u8; 100][..]).unwrap();
        assert_eq!(loaded, 100);
    }

    #[test]
    fn test_load_rom_fills_memory_exactly() {
        let mut chip8 = chip8();
        let rom = vec![0xAB; MAX_ROM_SIZE];
        chip8.load_rom(&mut &rom[..]).unwrap();
        assert_eq!(chip8.state.memory[0x200..], rom[..]);
    }

    #[test]
    fn test_load_rom_refuses_oversized_image() {
        let mut chip8 = chip8();
        let rom = vec![0xAB; MAX_ROM_SIZE + 1];
        match chip8.load_rom(&mut &rom[..]) {
            Err(Error::RomTooLarge { size, max }) => {
                assert_eq!(size, MAX_ROM_SIZE + 1);
                assert_eq!(max, MAX_ROM_SIZE);
            }
            other => panic!("expected RomTooLarge, got {:?}", other.map(|_| ())),
        }
        // nothing was copied
        assert_eq!(chip8.state.memory[0x200..], [0; MAX_ROM_SIZE]);
    }

    #[test]
    fn test_load_then_add_scenario() {
        // LD V0, 5 then ADD V0, 3
        let mut chip8 = chip8_with_rom(&[0x60, 0x05, 0x70, 0x03]);
        chip8.step();
        chip8.step();
        assert_eq!(chip8.state.v[0x0], 8);
        assert_eq!(chip8.state.pc, 0x204);
    }

    #[test]
    fn test_unknown_opcode_is_a_noop() {
        // zeroed memory decodes as 0000 forever
        let mut chip8 = chip8();
        chip8.step();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v, [0; 16]);
        assert_eq!(chip8.state.sp, 0);
    }

    #[test]
    fn test_draw_flag_lasts_one_step() {
        // CLS then LD V0, 5
        let mut chip8 = chip8_with_rom(&[0x00, 0xE0, 0x60, 0x05]);
        chip8.step();
        assert!(chip8.get_frame().is_some());
        chip8.step();
        assert!(chip8.get_frame().is_none());
    }

    #[test]
    fn test_timers_floor_at_zero() {
        let mut chip8 = chip8();
        chip8.state.delay_timer = 1;
        chip8.step();
        chip8.step();
        assert_eq!(chip8.state.delay_timer, 0);
        assert_eq!(chip8.state.sound_timer, 0);
    }

    #[test]
    fn test_timers_decay_each_step() {
        let mut chip8 = chip8();
        chip8.state.delay_timer = 3;
        chip8.state.sound_timer = 3;
        chip8.step();
        assert_eq!(chip8.state.delay_timer, 2);
        assert_eq!(chip8.state.sound_timer, 2);
    }

    #[test]
    fn test_beep_fires_exactly_once() {
        let mut chip8 = chip8();
        chip8.state.sound_timer = 2;
        chip8.step();
        assert!(!chip8.get_beep());
        chip8.step();
        // the 1 -> 0 transition is the audible step
        assert!(chip8.get_beep());
        chip8.step();
        assert!(!chip8.get_beep());
    }

    #[test]
    fn test_timers_decay_while_waiting_for_a_key() {
        let mut chip8 = chip8_with_rom(&[0xF1, 0x0A]);
        chip8.state.delay_timer = 2;
        chip8.step();
        assert_eq!(chip8.state.delay_timer, 1);
    }

    #[test]
    fn test_wait_key_blocks_until_pressed() {
        // LD V1, K
        let mut chip8 = chip8_with_rom(&[0xF1, 0x0A]);
        chip8.step();
        chip8.step();
        assert_eq!(chip8.state.pc, 0x200);
        chip8.key_press(0x5);
        chip8.step();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v[0x1], 0x5);
    }

    #[test]
    fn test_key_release_clears_pressed_state() {
        let mut chip8 = chip8();
        chip8.key_press(0xE);
        assert!(chip8.keys[0xE]);
        chip8.key_release(0xE);
        assert!(!chip8.keys[0xE]);
    }

    #[test]
    fn test_call_then_ret_resumes_after_call() {
        // CALL 0x204; (target) RET
        let mut chip8 = chip8_with_rom(&[0x22, 0x04, 0x00, 0x00, 0x00, 0xEE]);
        chip8.step();
        assert_eq!(chip8.state.pc, 0x204);
        chip8.step();
        // back at the instruction following the CALL
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        // RND V1, FF
        let rom = [0xC1, 0xFF];
        let mut a = Chip8::with_seed(false, PALETTE, 42);
        let mut b = Chip8::with_seed(false, PALETTE, 42);
        a.load_rom(&mut &rom[..]).unwrap();
        b.load_rom(&mut &rom[..]).unwrap();
        a.step();
        b.step();
        assert_eq!(a.state.v[0x1], b.state.v[0x1]);
    }
}
