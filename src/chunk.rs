use crate::token::LineNumber;
use crate::value::Value;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
  Constant,
  Nil,
  True,
  False,
  Pop,
  GetLocal,
  SetLocal,
  GetGlobal,
  DefineGlobal,
  SetGlobal,
  Equal,
  Greater,
  Less,
  Add,
  Subtract,
  Multiply,
  Divide,
  Not,
  Negate,
  Print,
  Jump,
  JumpIfFalse,
  Loop,
  Return,
}

fn get_op_code(code: u8) -> Option<OpCode> {
  FromPrimitive::from_u8(code)
}

/// Write side of a chunk, used by the compiler
#[derive(Debug, Clone, Default)]
pub struct ChunkBuilder {
  code: Vec<u8>,
  lines: Vec<LineNumber>,
  constants: Vec<Value>,
}

impl ChunkBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn length(&self) -> usize {
    self.code.len()
  }

  pub fn write_opcode(&mut self, code: OpCode, line: LineNumber) {
    self.write_value(code as u8, line);
  }

  pub fn write_value(&mut self, code: u8, line: LineNumber) {
    self.code.push(code);
    self.lines.push(line);
  }

  pub fn write_long_value(&mut self, code: u16, line: LineNumber) {
    let [high, low] = code.to_be_bytes();
    self.write_value(high, line);
    self.write_value(low, line);
  }

  /// Overwrites the two byte operand starting at `offset`
  pub fn set_long_value(&mut self, offset: usize, value: u16) {
    let [high, low] = value.to_be_bytes();
    self.code[offset] = high;
    self.code[offset + 1] = low;
  }

  /// Adds a value to the constant pool, returning its index. An identical
  /// constant already in the pool is reused.
  pub fn add_constant(&mut self, value: Value) -> usize {
    self
      .constants
      .iter()
      .position(|existing| existing.is_identical(&value))
      .unwrap_or_else(|| {
        self.constants.push(value);
        self.constants.len() - 1
      })
  }

  pub fn finalize(mut self) -> Chunk {
    self.code.shrink_to_fit();
    self.lines.shrink_to_fit();
    self.constants.shrink_to_fit();

    Chunk {
      code: self.code,
      lines: self.lines,
      constants: self.constants,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct Chunk {
  code: Vec<u8>,
  lines: Vec<LineNumber>,
  constants: Vec<Value>,
}

impl Chunk {
  pub fn length(&self) -> usize {
    self.code.len()
  }

  pub fn is_empty(&self) -> bool {
    self.code.is_empty()
  }

  pub fn get(&self, position: usize) -> Option<OpCode> {
    self.code.get(position).copied().and_then(get_op_code)
  }

  pub fn get_value(&self, position: usize) -> u8 {
    self.code[position]
  }

  pub fn get_long_value(&self, position: usize) -> u16 {
    u16::from_be_bytes([self.code[position], self.code[position + 1]])
  }

  pub fn get_constant(&self, pointer: usize) -> Value {
    self.constants[pointer]
  }

  pub fn constants(&self) -> &[Value] {
    &self.constants
  }

  pub fn get_line_number(&self, position: usize) -> LineNumber {
    self.lines.get(position).copied().unwrap_or(0)
  }
}
