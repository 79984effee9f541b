use crate::chunk::{Chunk, OpCode};
use crate::object::Heap;
use crate::value::Value;

pub fn print(chunk: &Chunk, heap: &Heap, name: &str) {
  print!("{}", disassemble(chunk, heap, name));
}

/// Renders a whole chunk, one instruction per line
pub fn disassemble(chunk: &Chunk, heap: &Heap, name: &str) -> String {
  let mut output = format!("          ╭─[Bytecode:{}]\n", name);

  let mut position: usize = 0;
  let mut last_line_number = 0;

  while position < chunk.length() {
    let line_number = chunk.get_line_number(position);
    if line_number == last_line_number {
      output.push_str(&format!("     {:0>4} │ ", position));
    } else {
      output.push_str(&format!("{:<4} {:0>4} │ ", line_number, position));
      last_line_number = line_number;
    }

    position = disassemble_instruction(chunk, heap, position, &mut output);
  }
  output.push_str("──────────╯\n");

  output
}

/// Prints the stack followed by the instruction about to run
pub fn trace(chunk: &Chunk, heap: &Heap, stack: &[Value], position: usize) {
  let values: String = stack
    .iter()
    .map(|value| format!("[ {} ]", value.display(heap)))
    .collect();
  println!("          │ {}", values);

  let mut output = format!("     {:0>4} │ ", position);
  disassemble_instruction(chunk, heap, position, &mut output);
  print!("{}", output);
}

fn disassemble_instruction(
  chunk: &Chunk,
  heap: &Heap,
  position: usize,
  output: &mut String,
) -> usize {
  match chunk.get(position) {
    Some(OpCode::Constant) => constant_instruction("Constant", chunk, heap, position, output),
    Some(OpCode::Nil) => simple_instruction("Nil", position, output),
    Some(OpCode::True) => simple_instruction("True", position, output),
    Some(OpCode::False) => simple_instruction("False", position, output),
    Some(OpCode::Pop) => simple_instruction("Pop", position, output),
    Some(OpCode::GetLocal) => byte_instruction("Get Local", chunk, position, output),
    Some(OpCode::SetLocal) => byte_instruction("Set Local", chunk, position, output),
    Some(OpCode::GetGlobal) => constant_instruction("Get Global", chunk, heap, position, output),
    Some(OpCode::DefineGlobal) => {
      constant_instruction("Define Global", chunk, heap, position, output)
    }
    Some(OpCode::SetGlobal) => constant_instruction("Set Global", chunk, heap, position, output),
    Some(OpCode::Equal) => simple_instruction("Equal", position, output),
    Some(OpCode::Greater) => simple_instruction("Greater", position, output),
    Some(OpCode::Less) => simple_instruction("Less", position, output),
    Some(OpCode::Add) => simple_instruction("Add", position, output),
    Some(OpCode::Subtract) => simple_instruction("Subtract", position, output),
    Some(OpCode::Multiply) => simple_instruction("Multiply", position, output),
    Some(OpCode::Divide) => simple_instruction("Divide", position, output),
    Some(OpCode::Not) => simple_instruction("Not", position, output),
    Some(OpCode::Negate) => simple_instruction("Negate", position, output),
    Some(OpCode::Print) => simple_instruction("Print", position, output),
    Some(OpCode::Jump) => jump_instruction("Jump", 1, chunk, position, output),
    Some(OpCode::JumpIfFalse) => jump_instruction("Jump If False", 1, chunk, position, output),
    Some(OpCode::Loop) => jump_instruction("Loop", -1, chunk, position, output),
    Some(OpCode::Return) => simple_instruction("Return", position, output),
    None => {
      let code = chunk.get_value(position);
      output.push_str(&format!("Unknown OpCode {}\n", code));
      position + 1
    }
  }
}

fn simple_instruction(name: &str, position: usize, output: &mut String) -> usize {
  output.push_str(name);
  output.push('\n');
  position + 1
}

fn constant_instruction(
  name: &str,
  chunk: &Chunk,
  heap: &Heap,
  position: usize,
  output: &mut String,
) -> usize {
  let constant_location = chunk.get_value(position + 1);
  let constant = chunk.get_constant(constant_location as usize);

  output.push_str(&format!(
    "{} {} '{}'\n",
    name,
    constant_location,
    constant.display(heap)
  ));
  position + 2
}

fn byte_instruction(name: &str, chunk: &Chunk, position: usize, output: &mut String) -> usize {
  let value = chunk.get_value(position + 1);

  output.push_str(&format!("{} {}\n", name, value));
  position + 2
}

fn jump_instruction(
  name: &str,
  direction: i64,
  chunk: &Chunk,
  position: usize,
  output: &mut String,
) -> usize {
  let jump = i64::from(chunk.get_long_value(position + 1));
  let target = position as i64 + 3 + jump * direction;

  output.push_str(&format!("{} {:0>4} -> {:0>4}\n", name, position, target));
  position + 3
}
