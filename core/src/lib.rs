pub use chip8::Chip8;
pub use error::Error;
pub use state::{FrameBuffer, Keypad, Palette};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod operations;
pub mod state;
