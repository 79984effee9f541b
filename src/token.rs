use crate::error::Error;

pub type LineNumber = u32;
pub type CharacterPosition = usize;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TokenType {
  // Brackets
  LeftParen,
  RightParen,
  LeftBrace,
  RightBrace,

  // Separators
  Comma,
  Dot,
  Semicolon,

  // Operators
  Minus,
  MinusMinus,
  Plus,
  Slash,
  Star,
  Bang,

  // Comparators
  BangEqual,
  Equal,
  EqualEqual,
  Greater,
  GreaterEqual,
  Less,
  LessEqual,

  // Values
  Identifier,
  String,
  Number,
  True,
  False,
  Nil,

  // Keywords
  And,
  Class,
  Else,
  For,
  Fun,
  If,
  Or,
  Print,
  Return,
  Super,
  This,
  Var,
  While,

  // Blank
  Error,
  EndOfFile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
  pub token_type: TokenType,

  pub start: CharacterPosition,
  pub end: CharacterPosition,
  pub line: LineNumber,

  /// Parsed value of a number literal
  pub literal: Option<f64>,
  /// Reason an error token was produced
  pub error: Option<Error>,
}

impl Token {
  pub fn get_value<'s>(&self, source: &'s str) -> &'s str {
    source.get(self.start..self.end).unwrap_or("")
  }
}
