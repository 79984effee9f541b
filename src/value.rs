use crate::object::{Heap, StringRef};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
  #[default]
  Nil,
  Boolean(bool),
  Number(f64),
  String(StringRef),
}

impl Value {
  pub fn is_falsy(&self) -> bool {
    matches!(self, Value::Nil | Value::Boolean(false))
  }

  /// Whether two constants can share a slot in a constant pool. Unlike `==`,
  /// numbers are compared by their bits so `0` and `-0` stay distinct.
  pub fn is_identical(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Number(value), Value::Number(other)) => value.to_bits() == other.to_bits(),
      _ => self == other,
    }
  }

  pub fn display<'h>(&self, heap: &'h Heap) -> DisplayValue<'h> {
    DisplayValue { value: *self, heap }
  }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Self::Boolean(value)
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Self::Number(value)
  }
}

impl From<StringRef> for Value {
  fn from(value: StringRef) -> Self {
    Self::String(value)
  }
}

/// A value paired with the heap its strings live in
pub struct DisplayValue<'h> {
  value: Value,
  heap: &'h Heap,
}

impl fmt::Display for DisplayValue<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.value {
      Value::Nil => write!(f, "nil"),
      Value::Boolean(value) => write!(f, "{}", value),
      Value::Number(value) => write!(f, "{}", value),
      Value::String(value) => write!(f, "{}", self.heap.as_str(value)),
    }
  }
}
