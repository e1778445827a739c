use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SET, FONT_START, MEMORY_SIZE, NUM_KEYS, NUM_REGISTERS,
    PROGRAM_START, STACK_DEPTH,
};

/// The framebuffer is a flat row-major grid; the cell for (x, y) lives at
/// `y * DISPLAY_WIDTH + x`. Every cell holds one of the two palette colors.
pub type FrameBuffer = [u32; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// Pressed status of the hex keypad, indexed by key value 0x0..0xF.
pub type Keypad = [bool; NUM_KEYS];

/// The two colors a framebuffer cell can hold. Supplied by the host once at
/// construction and never changed mid-run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub enabled: u32,
    pub disabled: u32,
}

/// A snapshot of the machine between instructions
///
/// ## CPU
/// - (v) 16 primary 8-bit registers; VF doubles as the carry/borrow/collision
///   flag and is clobbered as a side effect of several instructions
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter, bumped by 2 on fetch before the
///   instruction's own effect applies
/// - (sp) a stack pointer into a 16-deep array of return addresses; pushes
///   write-then-increment, pops decrement-then-read, and nothing guards the
///   seventeenth nested call
///
/// ## Timers
/// - 2 8-bit timers (delay & sound), each decremented once at the end of every
///   step while nonzero
///
/// ## Memory
/// - 4096 bytes of flat address space; no protection separates the font area,
///   the program, and working data
/// - the framebuffer lives outside addressable memory and is drawn into only
///   through Dxyn
///
/// ## Configuration
/// - (quirky) selects the divergent historical behavior of 8xy6, 8xyE, Fx55
///   and Fx65; fixed at construction
/// - (palette) the enabled/disabled cell colors; fixed at construction
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; NUM_REGISTERS],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub beep_flag: bool,
    pub quirky: bool,
    pub palette: Palette,
}

impl State {
    /// A freshly reset machine: everything zeroed, the font copied in at
    /// 0x050, the program counter at the rom entry point, and every
    /// framebuffer cell set to the disabled color.
    pub fn new(quirky: bool, palette: Palette) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font_start = FONT_START as usize;
        memory[font_start..font_start + FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            memory,
            delay_timer: 0,
            sound_timer: 0,
            frame_buffer: [palette.disabled; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            draw_flag: false,
            beep_flag: false,
            quirky,
            palette,
        }
    }
}
