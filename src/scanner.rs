use crate::error::Error;
use crate::token::{CharacterPosition, LineNumber, Token, TokenType};

pub struct Scanner<'source> {
  source: &'source str,
  bytes: &'source [u8],

  start: CharacterPosition,
  current: CharacterPosition,
  line: LineNumber,
}

impl<'source> Scanner<'source> {
  pub fn new(source: &'source str) -> Self {
    Self {
      source,
      bytes: source.as_bytes(),
      start: 0,
      current: 0,
      line: 1,
    }
  }

  fn at_end(&self) -> bool {
    self.current >= self.bytes.len()
  }

  fn advance(&mut self) -> u8 {
    self.current += 1;
    self.bytes[self.current - 1]
  }

  fn peek(&self) -> Option<u8> {
    self.bytes.get(self.current).copied()
  }

  fn peek_equals(&self, expected: u8) -> bool {
    self.peek() == Some(expected)
  }

  fn peek_next(&self) -> Option<u8> {
    self.bytes.get(self.current + 1).copied()
  }

  fn lexeme(&self) -> &'source str {
    self.source.get(self.start..self.current).unwrap_or("")
  }

  /// Scans the next token. Once the end of the source is reached, every
  /// further call returns another `EndOfFile` token.
  pub fn next_token(&mut self) -> Token {
    skip_whitespace(self);
    self.start = self.current;

    if self.at_end() {
      return make_token(self, TokenType::EndOfFile);
    }

    let character = self.advance();

    if let Some(token_type) = get_two_character_token(character, self.peek()) {
      self.advance();
      return make_token(self, token_type);
    }

    match character {
      b'0'..=b'9' => number_token(self),
      b'_' | b'a'..=b'z' | b'A'..=b'Z' => identifier_token(self),
      b'"' => string_token(self),
      b'(' => make_token(self, TokenType::LeftParen),
      b')' => make_token(self, TokenType::RightParen),
      b'{' => make_token(self, TokenType::LeftBrace),
      b'}' => make_token(self, TokenType::RightBrace),
      b';' => make_token(self, TokenType::Semicolon),
      b',' => make_token(self, TokenType::Comma),
      b'.' => make_token(self, TokenType::Dot),
      b'-' => make_token(self, TokenType::Minus),
      b'+' => make_token(self, TokenType::Plus),
      b'/' => make_token(self, TokenType::Slash),
      b'*' => make_token(self, TokenType::Star),
      b'!' => make_token(self, TokenType::Bang),
      b'=' => make_token(self, TokenType::Equal),
      b'<' => make_token(self, TokenType::Less),
      b'>' => make_token(self, TokenType::Greater),
      _ => {
        // Consume the rest of a multi-byte character so spans stay on char boundaries
        while !self.at_end() && !self.source.is_char_boundary(self.current) {
          self.current += 1;
        }
        error_token(self, Error::UnexpectedCharacter)
      }
    }
  }
}

fn get_two_character_token(char1: u8, char2: Option<u8>) -> Option<TokenType> {
  match (char1, char2?) {
    (b'!', b'=') => Some(TokenType::BangEqual),
    (b'=', b'=') => Some(TokenType::EqualEqual),
    (b'<', b'=') => Some(TokenType::LessEqual),
    (b'>', b'=') => Some(TokenType::GreaterEqual),
    (b'-', b'-') => Some(TokenType::MinusMinus),
    _ => None,
  }
}

fn make_token(scanner: &Scanner, token_type: TokenType) -> Token {
  Token {
    token_type,
    start: scanner.start,
    end: scanner.current,
    line: scanner.line,
    literal: None,
    error: None,
  }
}

fn error_token(scanner: &Scanner, error: Error) -> Token {
  Token {
    error: Some(error),
    ..make_token(scanner, TokenType::Error)
  }
}

fn skip_whitespace(scanner: &mut Scanner) {
  loop {
    match scanner.peek() {
      Some(b'\n') => {
        scanner.advance();
        scanner.line += 1;
      }
      Some(b' ' | b'\t' | b'\r') => {
        scanner.advance();
      }
      Some(b'/') if scanner.peek_next() == Some(b'/') => {
        while !scanner.peek_equals(b'\n') && !scanner.at_end() {
          scanner.advance();
        }
      }
      _ => break,
    };
  }
}

fn string_token(scanner: &mut Scanner) -> Token {
  while !scanner.peek_equals(b'"') && !scanner.at_end() {
    if scanner.peek_equals(b'\n') {
      scanner.line += 1;
    }
    scanner.advance();
  }

  if scanner.at_end() {
    error_token(scanner, Error::UnterminatedString)
  } else {
    scanner.advance(); // closing quote
    make_token(scanner, TokenType::String)
  }
}

fn number_token(scanner: &mut Scanner) -> Token {
  while is_digit(scanner.peek()) {
    scanner.advance();
  }

  if scanner.peek_equals(b'.') && is_digit(scanner.peek_next()) {
    scanner.advance();

    while is_digit(scanner.peek()) {
      scanner.advance();
    }
  }

  Token {
    literal: scanner.lexeme().parse().ok(),
    ..make_token(scanner, TokenType::Number)
  }
}

fn identifier_token(scanner: &mut Scanner) -> Token {
  while is_alpha(scanner.peek()) || is_digit(scanner.peek()) {
    scanner.advance();
  }

  make_token(scanner, identifier_type(scanner.lexeme()))
}

fn identifier_type(identifier: &str) -> TokenType {
  match identifier {
    "and" => TokenType::And,
    "class" => TokenType::Class,
    "else" => TokenType::Else,
    "false" => TokenType::False,
    "for" => TokenType::For,
    "fun" => TokenType::Fun,
    "if" => TokenType::If,
    "nil" => TokenType::Nil,
    "or" => TokenType::Or,
    "print" => TokenType::Print,
    "return" => TokenType::Return,
    "super" => TokenType::Super,
    "this" => TokenType::This,
    "true" => TokenType::True,
    "var" => TokenType::Var,
    "while" => TokenType::While,
    _ => TokenType::Identifier,
  }
}

fn is_digit(c: Option<u8>) -> bool {
  matches!(c, Some(b'0'..=b'9'))
}

fn is_alpha(c: Option<u8>) -> bool {
  matches!(c, Some(b'a'..=b'z' | b'A'..=b'Z' | b'_'))
}
