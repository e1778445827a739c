use thiserror::Error;

/// Failures surfaced while feeding the machine a rom. Everything past rom
/// loading is infallible by design: bad instructions are logged and skipped,
/// and the unguarded limits (stack depth, memory bounds) panic instead of
/// erroring, as documented on the types that own them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("rom is {size} bytes but at most {max} fit above the entry point")]
    RomTooLarge { size: usize, max: usize },

    #[error("failed to read rom")]
    Io(#[from] std::io::Error),
}
