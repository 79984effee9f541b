mod chunk;
mod compiler;
mod error;
mod object;
mod scanner;
mod table;
mod token;
mod value;
mod vm;

pub mod print;

// Turn source code into tokens
pub use scanner::Scanner;
pub use token::{CharacterPosition, LineNumber, Token, TokenType};

// Compile source code into a chunk of bytecode
pub use chunk::{Chunk, ChunkBuilder, OpCode};
pub use compiler::compile;
pub use error::{CompileError, Error, InterpretError, Location, RuntimeError};

// Strings and the tables that intern them
pub use object::{hash_string, Heap, ObjString, StringRef};
pub use table::Table;
pub use value::{DisplayValue, Value};

// Run a chunk of bytecode
pub use vm::{State, STACK_MAX, VM};
