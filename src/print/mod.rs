mod chunk;
mod errors;
mod tokens;

pub use chunk::{disassemble, print as chunk, trace};
pub use errors::{compile_error, error_message, runtime_error};
pub use tokens::{print as tokens, token};
