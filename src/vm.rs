use crate::chunk::{Chunk, OpCode};
use crate::compiler::{self, LOCALS_MAX};
use crate::error::{CompileError, InterpretError, RuntimeError};
use crate::object::Heap;
use crate::table::Table;
use crate::value::Value;

use std::io::{self, Write};

#[cfg(feature = "debug-stack")]
use crate::print;

/// Room for a full set of locals plus the temporaries of deeply nested expressions
pub const STACK_MAX: usize = LOCALS_MAX * 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Ready,
  Running,
  CompileError,
  RuntimeError,
  Halted,
}

macro_rules! runtime_error {
  (($vm:expr, $chunk:expr, $ip:expr), $($message:tt)+) => {{
    let message = format!($($message)+);
    $vm.stack.clear();
    $vm.state = State::RuntimeError;

    Err(RuntimeError {
      message,
      line: $chunk.get_line_number($ip - 1),
    })
  }};
}

macro_rules! push {
  (($vm:expr, $chunk:expr, $ip:expr), $value:expr) => {
    if $vm.stack.len() >= STACK_MAX {
      return runtime_error!(($vm, $chunk, $ip), "Stack overflow.");
    }
    $vm.stack.push($value);
  };
}

macro_rules! numeric_expression {
  (($vm:expr, $chunk:expr, $ip:expr), $token:tt) => {
    numeric_expression!(($vm, $chunk, $ip), $token, Number)
  };

  (($vm:expr, $chunk:expr, $ip:expr), $token:tt, $type:tt) => {
    let (right, left) = ($vm.pop(), $vm.pop());

    match (left, right) {
      (Value::Number(left), Value::Number(right)) => {
        $vm.stack.push(Value::$type(left $token right));
      }
      _ => {
        return runtime_error!(($vm, $chunk, $ip), "Operands must be numbers.");
      }
    }
  };
}

pub struct VM<W = io::Stdout> {
  stack: Vec<Value>,
  globals: Table,
  heap: Heap,
  state: State,
  output: W,
}

impl VM {
  pub fn new() -> Self {
    Self::with_output(io::stdout())
  }
}

impl Default for VM {
  fn default() -> Self {
    Self::new()
  }
}

impl<W: Write> VM<W> {
  /// Creates a VM whose `print` statements write to `output`
  pub fn with_output(output: W) -> Self {
    Self {
      stack: Vec::with_capacity(STACK_MAX),
      globals: Table::new(),
      heap: Heap::new(),
      state: State::Ready,
      output,
    }
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn heap(&self) -> &Heap {
    &self.heap
  }

  pub fn output(&self) -> &W {
    &self.output
  }

  pub fn into_output(self) -> W {
    self.output
  }

  pub fn get_global(&self, name: &str) -> Option<Value> {
    let name = self.heap.find(name)?;
    self.globals.get(name)
  }

  /// Compiles and runs `source`. Globals and strings are kept between calls,
  /// but the stack is reset each time.
  pub fn interpret(&mut self, source: &str) -> Result<(), InterpretError> {
    let chunk = self.compile(source)?;
    self.run(&chunk)?;

    Ok(())
  }

  /// Compiles `source` against this VM's heap, so the chunk can be run here
  pub fn compile(&mut self, source: &str) -> Result<Chunk, Vec<CompileError>> {
    self.stack.clear();
    self.state = State::Ready;

    compiler::compile(source, &mut self.heap).map_err(|errors| {
      self.state = State::CompileError;
      errors
    })
  }

  #[inline]
  fn peek(&self) -> Value {
    self.stack.last().copied().unwrap_or_default()
  }

  #[inline]
  fn pop(&mut self) -> Value {
    self.stack.pop().unwrap_or_default()
  }

  pub fn run(&mut self, chunk: &Chunk) -> Result<(), RuntimeError> {
    self.stack.clear();
    self.state = State::Running;

    let mut ip: usize = 0;

    loop {
      if ip >= chunk.length() {
        self.state = State::Halted;
        return Ok(());
      }

      #[cfg(feature = "debug-stack")]
      print::trace(chunk, &self.heap, &self.stack, ip);

      let instruction = chunk.get(ip);
      ip += 1;

      match instruction {
        Some(OpCode::Constant) => {
          let constant = chunk.get_constant(chunk.get_value(ip) as usize);
          ip += 1;
          push!((self, chunk, ip), constant);
        }
        Some(OpCode::Nil) => {
          push!((self, chunk, ip), Value::Nil);
        }
        Some(OpCode::True) => {
          push!((self, chunk, ip), Value::Boolean(true));
        }
        Some(OpCode::False) => {
          push!((self, chunk, ip), Value::Boolean(false));
        }
        Some(OpCode::Pop) => {
          self.pop();
        }

        Some(OpCode::GetLocal) => {
          let slot = chunk.get_value(ip) as usize;
          ip += 1;
          let value = self.stack[slot];
          push!((self, chunk, ip), value);
        }
        Some(OpCode::SetLocal) => {
          let slot = chunk.get_value(ip) as usize;
          ip += 1;
          // Assignment is an expression, so the value stays on the stack
          self.stack[slot] = self.peek();
        }

        Some(OpCode::GetGlobal) => {
          let Value::String(name) = chunk.get_constant(chunk.get_value(ip) as usize) else {
            return runtime_error!((self, chunk, ip), "Variable name must be a string.");
          };
          ip += 1;

          match self.globals.get(name) {
            Some(value) => {
              push!((self, chunk, ip), value);
            }
            None => {
              return runtime_error!(
                (self, chunk, ip),
                "Undefined variable '{}'.",
                self.heap.as_str(name)
              );
            }
          }
        }
        Some(OpCode::DefineGlobal) => {
          let Value::String(name) = chunk.get_constant(chunk.get_value(ip) as usize) else {
            return runtime_error!((self, chunk, ip), "Variable name must be a string.");
          };
          ip += 1;

          self.globals.set(name, self.peek());
          self.pop();
        }
        Some(OpCode::SetGlobal) => {
          let Value::String(name) = chunk.get_constant(chunk.get_value(ip) as usize) else {
            return runtime_error!((self, chunk, ip), "Variable name must be a string.");
          };
          ip += 1;

          // Assigning never declares, so undo the insert if the name was new
          if self.globals.set(name, self.peek()) {
            self.globals.delete(name);
            return runtime_error!(
              (self, chunk, ip),
              "Undefined variable '{}'.",
              self.heap.as_str(name)
            );
          }
        }

        Some(OpCode::Equal) => {
          let (right, left) = (self.pop(), self.pop());
          self.stack.push(Value::Boolean(left == right));
        }
        Some(OpCode::Greater) => {
          numeric_expression!((self, chunk, ip), >, Boolean);
        }
        Some(OpCode::Less) => {
          numeric_expression!((self, chunk, ip), <, Boolean);
        }

        Some(OpCode::Add) => {
          let (right, left) = (self.pop(), self.pop());

          match (left, right) {
            (Value::Number(left), Value::Number(right)) => {
              self.stack.push(Value::Number(left + right));
            }
            (Value::String(left), Value::String(right)) => {
              let left = self.heap.as_str(left);
              let right = self.heap.as_str(right);

              let mut concatenated = String::with_capacity(left.len() + right.len());
              concatenated.push_str(left);
              concatenated.push_str(right);

              let result = self.heap.take_string(concatenated);
              self.stack.push(Value::String(result));
            }
            _ => {
              return runtime_error!(
                (self, chunk, ip),
                "Operands must be two numbers or two strings."
              );
            }
          }
        }
        Some(OpCode::Subtract) => {
          numeric_expression!((self, chunk, ip), -);
        }
        Some(OpCode::Multiply) => {
          numeric_expression!((self, chunk, ip), *);
        }
        Some(OpCode::Divide) => {
          numeric_expression!((self, chunk, ip), /);
        }
        Some(OpCode::Not) => {
          let value = self.pop();
          self.stack.push(Value::Boolean(value.is_falsy()));
        }
        Some(OpCode::Negate) => match self.pop() {
          Value::Number(value) => self.stack.push(Value::Number(-value)),
          _ => {
            return runtime_error!((self, chunk, ip), "Operand must be a number.");
          }
        },

        Some(OpCode::Print) => {
          let value = self.pop();
          if let Err(error) = writeln!(self.output, "{}", value.display(&self.heap)) {
            return runtime_error!((self, chunk, ip), "Could not write output: {}", error);
          }
        }

        Some(OpCode::Jump) => {
          let offset = chunk.get_long_value(ip) as usize;
          ip += 2 + offset;
        }
        Some(OpCode::JumpIfFalse) => {
          let offset = chunk.get_long_value(ip) as usize;
          ip += 2;
          if self.peek().is_falsy() {
            ip += offset;
          }
        }
        Some(OpCode::Loop) => {
          let offset = chunk.get_long_value(ip) as usize;
          ip += 2;
          ip -= offset;
        }

        Some(OpCode::Return) => {
          self.state = State::Halted;
          return Ok(());
        }
        None => {
          return runtime_error!(
            (self, chunk, ip),
            "Unknown opcode {}.",
            chunk.get_value(ip - 1)
          );
        }
      }
    }
  }
}
