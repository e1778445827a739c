/// Horizontal framebuffer resolution in pixels.
pub const DISPLAY_WIDTH: usize = 64;

/// Vertical framebuffer resolution in pixels.
pub const DISPLAY_HEIGHT: usize = 32;

/// Size of the flat address space in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Address roms are loaded at and the initial program counter.
pub const PROGRAM_START: u16 = 0x200;

/// The largest rom image that fits between PROGRAM_START and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Address the builtin font glyphs are copied to on reset.
pub const FONT_START: u16 = 0x050;

/// Bytes per font glyph; Fx29 multiplies the digit by this to find its sprite.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// Nesting limit of the call stack. Calls beyond this corrupt no memory here
/// (unlike the hardware) but panic on the stack array bound instead.
pub const STACK_DEPTH: usize = 16;

/// Number of general purpose registers (V0..VF).
pub const NUM_REGISTERS: usize = 16;

/// Number of keys on the hex keypad.
pub const NUM_KEYS: usize = 16;

/// Sprites for the hex digits 0..F, five bytes per glyph, one bit per pixel.
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
