use crate::chunk::{Chunk, ChunkBuilder, OpCode};
use crate::error::{CompileError, Error, Location};
use crate::object::Heap;
use crate::scanner::Scanner;
use crate::token::{Token, TokenType};
use crate::value::Value;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

#[cfg(any(feature = "debug-token", feature = "debug-bytecode"))]
use crate::print;

pub const LOCALS_MAX: usize = u8::MAX as usize + 1;

#[derive(Debug, FromPrimitive, PartialOrd, PartialEq, Clone, Copy)]
enum Precedence {
  None = 1,
  Assignment, // =
  Or,         // or
  And,        // and
  Equality,   // == !=
  Comparison, // < > <= >=
  Term,       // + -
  Factor,     // * /
  Unary,      // ! -
  Call,       // . ()
  Primary,
}

impl Precedence {
  fn next(self) -> Precedence {
    FromPrimitive::from_u8(self as u8 + 1).unwrap_or(Precedence::Primary)
  }
}

#[derive(Debug, Clone, Copy)]
enum Prefix {
  Grouping,
  Unary,
  Number,
  String,
  Literal,
  Variable,
}

#[derive(Debug, Clone, Copy)]
enum Infix {
  Binary,
  And,
  Or,
}

struct ParseRule {
  prefix: Option<Prefix>,
  infix: Option<Infix>,
  precedence: Precedence,
}

fn get_rule(token_type: TokenType) -> ParseRule {
  match token_type {
    TokenType::LeftParen => ParseRule {
      prefix: Some(Prefix::Grouping),
      infix: None,
      precedence: Precedence::None,
    },

    TokenType::Minus => ParseRule {
      prefix: Some(Prefix::Unary),
      infix: Some(Infix::Binary),
      precedence: Precedence::Term,
    },
    TokenType::Plus => ParseRule {
      prefix: None,
      infix: Some(Infix::Binary),
      precedence: Precedence::Term,
    },
    TokenType::Star | TokenType::Slash => ParseRule {
      prefix: None,
      infix: Some(Infix::Binary),
      precedence: Precedence::Factor,
    },

    TokenType::Bang => ParseRule {
      prefix: Some(Prefix::Unary),
      infix: None,
      precedence: Precedence::None,
    },
    TokenType::BangEqual | TokenType::EqualEqual => ParseRule {
      prefix: None,
      infix: Some(Infix::Binary),
      precedence: Precedence::Equality,
    },
    TokenType::Greater | TokenType::GreaterEqual | TokenType::Less | TokenType::LessEqual => {
      ParseRule {
        prefix: None,
        infix: Some(Infix::Binary),
        precedence: Precedence::Comparison,
      }
    }

    TokenType::Identifier => ParseRule {
      prefix: Some(Prefix::Variable),
      infix: None,
      precedence: Precedence::None,
    },
    TokenType::String => ParseRule {
      prefix: Some(Prefix::String),
      infix: None,
      precedence: Precedence::None,
    },
    TokenType::Number => ParseRule {
      prefix: Some(Prefix::Number),
      infix: None,
      precedence: Precedence::None,
    },
    TokenType::True | TokenType::False | TokenType::Nil => ParseRule {
      prefix: Some(Prefix::Literal),
      infix: None,
      precedence: Precedence::None,
    },

    TokenType::And => ParseRule {
      prefix: None,
      infix: Some(Infix::And),
      precedence: Precedence::And,
    },
    TokenType::Or => ParseRule {
      prefix: None,
      infix: Some(Infix::Or),
      precedence: Precedence::Or,
    },

    _ => ParseRule {
      prefix: None,
      infix: None,
      precedence: Precedence::None,
    },
  }
}

#[derive(Debug)]
struct Local<'s> {
  name: &'s str,
  /// `None` until the variable's initializer has been compiled
  depth: Option<usize>,
}

struct Compiler<'s, 'h> {
  source: &'s str,
  scanner: Scanner<'s>,
  heap: &'h mut Heap,

  current: Token,
  previous: Token,

  errors: Vec<CompileError>,
  panic_mode: bool,

  chunk: ChunkBuilder,

  locals: Vec<Local<'s>>,
  scope_depth: usize,
}

// Token Handling
impl<'s, 'h> Compiler<'s, 'h> {
  fn new(source: &'s str, heap: &'h mut Heap) -> Self {
    let blank = Token {
      token_type: TokenType::EndOfFile,
      start: 0,
      end: 0,
      line: 1,
      literal: None,
      error: None,
    };

    Self {
      source,
      scanner: Scanner::new(source),
      heap,
      current: blank,
      previous: blank,
      errors: Vec::new(),
      panic_mode: false,
      chunk: ChunkBuilder::new(),
      locals: Vec::new(),
      scope_depth: 0,
    }
  }

  fn advance(&mut self) {
    self.previous = self.current;

    loop {
      self.current = self.scanner.next_token();

      #[cfg(feature = "debug-token")]
      print::token(self.source, &self.current);

      match self.current.error {
        Some(error) if self.current.token_type == TokenType::Error => {
          self.error_at(self.current, error)
        }
        _ => break,
      }
    }
  }

  fn check(&self, token_type: TokenType) -> bool {
    self.current.token_type == token_type
  }

  fn matches(&mut self, token_type: TokenType) -> bool {
    if self.check(token_type) {
      self.advance();
      true
    } else {
      false
    }
  }

  fn consume(&mut self, token_type: TokenType, error: Error) {
    if self.check(token_type) {
      self.advance();
    } else {
      self.error_at(self.current, error);
    }
  }

  fn error_at(&mut self, token: Token, error: Error) {
    if self.panic_mode {
      return;
    }
    self.panic_mode = true;

    let location = match token.token_type {
      TokenType::EndOfFile => Location::EndOfFile,
      TokenType::Error => Location::Unknown,
      _ => Location::Token(token.get_value(self.source).to_string()),
    };

    self.errors.push(CompileError {
      error,
      line: token.line,
      start: token.start,
      end: token.end,
      location,
    });
  }

  fn error(&mut self, error: Error) {
    self.error_at(self.previous, error);
  }

  fn synchronize(&mut self) {
    self.panic_mode = false;

    while !self.check(TokenType::EndOfFile) {
      if self.previous.token_type == TokenType::Semicolon {
        return;
      }

      match self.current.token_type {
        TokenType::Class
        | TokenType::Fun
        | TokenType::Var
        | TokenType::For
        | TokenType::If
        | TokenType::While
        | TokenType::Print
        | TokenType::Return => return,
        _ => self.advance(),
      }
    }
  }
}

// Emit Bytecode
impl<'s, 'h> Compiler<'s, 'h> {
  fn emit_opcode(&mut self, code: OpCode) {
    self.chunk.write_opcode(code, self.previous.line);
  }

  fn emit_value(&mut self, value: u8) {
    self.chunk.write_value(value, self.previous.line);
  }

  fn emit_opcodes(&mut self, first: OpCode, second: OpCode) {
    self.emit_opcode(first);
    self.emit_opcode(second);
  }

  fn make_constant(&mut self, value: Value) -> u8 {
    let constant_position = self.chunk.add_constant(value);

    match u8::try_from(constant_position) {
      Ok(position) => position,
      Err(_) => {
        self.error(Error::TooManyConstants);
        0
      }
    }
  }

  fn emit_constant(&mut self, value: Value) {
    let constant = self.make_constant(value);
    self.emit_opcode(OpCode::Constant);
    self.emit_value(constant);
  }

  fn emit_jump(&mut self, instruction: OpCode) -> usize {
    self.emit_opcode(instruction);
    self.chunk.write_long_value(u16::MAX, self.previous.line);
    self.chunk.length() - 2
  }

  fn patch_jump(&mut self, offset: usize) {
    // -2 to skip over the jump's own operand
    let jump = self.chunk.length() - offset - 2;

    match u16::try_from(jump) {
      Ok(jump) => self.chunk.set_long_value(offset, jump),
      Err(_) => self.error(Error::TooBigJump),
    }
  }

  fn emit_loop(&mut self, loop_start: usize) {
    self.emit_opcode(OpCode::Loop);

    let offset = self.chunk.length() - loop_start + 2;
    match u16::try_from(offset) {
      Ok(offset) => self.chunk.write_long_value(offset, self.previous.line),
      Err(_) => {
        self.error(Error::TooBigLoop);
        self.chunk.write_long_value(u16::MAX, self.previous.line);
      }
    }
  }
}

// Scopes and Variables
impl<'s, 'h> Compiler<'s, 'h> {
  fn begin_scope(&mut self) {
    self.scope_depth += 1;
  }

  fn end_scope(&mut self) {
    self.scope_depth -= 1;

    while let Some(local) = self.locals.last() {
      if local.depth.map_or(true, |depth| depth > self.scope_depth) {
        self.locals.pop();
        self.emit_opcode(OpCode::Pop);
      } else {
        break;
      }
    }
  }

  fn identifier_constant(&mut self, name: Token) -> u8 {
    let identifier = self.heap.intern(name.get_value(self.source));
    self.make_constant(Value::from(identifier))
  }

  fn add_local(&mut self, name: &'s str) {
    if self.locals.len() == LOCALS_MAX {
      self.error(Error::TooManyLocals);
      return;
    }

    self.locals.push(Local { name, depth: None });
  }

  fn declare_variable(&mut self) {
    if self.scope_depth == 0 {
      return;
    }

    let name = self.previous.get_value(self.source);
    let already_exists = self
      .locals
      .iter()
      .rev()
      .take_while(|local| local.depth.map_or(true, |depth| depth >= self.scope_depth))
      .any(|local| local.name == name);

    if already_exists {
      self.error(Error::VariableAlreadyExists);
    }

    self.add_local(name);
  }

  fn parse_variable(&mut self, error: Error) -> u8 {
    self.consume(TokenType::Identifier, error);

    self.declare_variable();
    if self.scope_depth > 0 {
      return 0;
    }

    self.identifier_constant(self.previous)
  }

  fn mark_initialized(&mut self) {
    let depth = self.scope_depth;
    if let Some(local) = self.locals.last_mut() {
      local.depth = Some(depth);
    }
  }

  fn define_variable(&mut self, global: u8) {
    if self.scope_depth > 0 {
      self.mark_initialized();
      return;
    }

    self.emit_opcode(OpCode::DefineGlobal);
    self.emit_value(global);
  }

  fn resolve_local(&mut self, name: &str) -> Option<u8> {
    let (slot, initialized) = self
      .locals
      .iter()
      .enumerate()
      .rev()
      .find(|(_, local)| local.name == name)
      .map(|(slot, local)| (slot, local.depth.is_some()))?;

    if !initialized {
      self.error(Error::ReadInOwnInitializer);
    }

    // LOCALS_MAX keeps every slot within a byte
    Some(slot as u8)
  }

  fn named_variable(&mut self, name: Token, can_assign: bool) {
    let (get, set, argument) = match self.resolve_local(name.get_value(self.source)) {
      Some(slot) => (OpCode::GetLocal, OpCode::SetLocal, slot),
      None => {
        let global = self.identifier_constant(name);
        (OpCode::GetGlobal, OpCode::SetGlobal, global)
      }
    };

    if can_assign && self.matches(TokenType::Equal) {
      self.expression();
      self.emit_opcode(set);
    } else {
      self.emit_opcode(get);
    }
    self.emit_value(argument);
  }
}

// Expressions
impl<'s, 'h> Compiler<'s, 'h> {
  fn expression(&mut self) {
    self.parse_precedence(Precedence::Assignment);
  }

  fn parse_precedence(&mut self, precedence: Precedence) {
    self.advance();

    let prefix_rule = match get_rule(self.previous.token_type).prefix {
      Some(rule) => rule,
      None => {
        self.error(Error::ExpectedExpression);
        return;
      }
    };

    let can_assign = precedence <= Precedence::Assignment;
    self.prefix(prefix_rule, can_assign);

    while precedence <= get_rule(self.current.token_type).precedence {
      self.advance();

      if let Some(infix_rule) = get_rule(self.previous.token_type).infix {
        self.infix(infix_rule);
      }
    }

    if can_assign && self.matches(TokenType::Equal) {
      self.error(Error::InvalidAssignmentTarget);
    }
  }

  fn prefix(&mut self, rule: Prefix, can_assign: bool) {
    match rule {
      Prefix::Grouping => self.grouping(),
      Prefix::Unary => self.unary(),
      Prefix::Number => self.number(),
      Prefix::String => self.string(),
      Prefix::Literal => self.literal(),
      Prefix::Variable => self.named_variable(self.previous, can_assign),
    }
  }

  fn infix(&mut self, rule: Infix) {
    match rule {
      Infix::Binary => self.binary(),
      Infix::And => self.and(),
      Infix::Or => self.or(),
    }
  }

  fn grouping(&mut self) {
    self.expression();
    self.consume(TokenType::RightParen, Error::ExpectedBracketAfterExpression);
  }

  fn number(&mut self) {
    let value = self.previous.literal.unwrap_or_default();
    self.emit_constant(Value::from(value));
  }

  fn string(&mut self) {
    let lexeme = self.previous.get_value(self.source);
    let contents = lexeme.get(1..lexeme.len().saturating_sub(1)).unwrap_or_default();

    let string = self.heap.intern(contents);
    self.emit_constant(Value::from(string));
  }

  fn literal(&mut self) {
    match self.previous.token_type {
      TokenType::True => self.emit_opcode(OpCode::True),
      TokenType::False => self.emit_opcode(OpCode::False),
      _ => self.emit_opcode(OpCode::Nil),
    }
  }

  fn unary(&mut self) {
    let operator = self.previous.token_type;

    // Same precedence, so `!!x` and `- -x` nest
    self.parse_precedence(Precedence::Unary);

    match operator {
      TokenType::Bang => self.emit_opcode(OpCode::Not),
      _ => self.emit_opcode(OpCode::Negate),
    }
  }

  fn binary(&mut self) {
    let operator = self.previous.token_type;
    self.parse_precedence(get_rule(operator).precedence.next());

    match operator {
      TokenType::Plus => self.emit_opcode(OpCode::Add),
      TokenType::Minus => self.emit_opcode(OpCode::Subtract),
      TokenType::Star => self.emit_opcode(OpCode::Multiply),
      TokenType::Slash => self.emit_opcode(OpCode::Divide),
      TokenType::EqualEqual => self.emit_opcode(OpCode::Equal),
      TokenType::BangEqual => self.emit_opcodes(OpCode::Equal, OpCode::Not),
      TokenType::Greater => self.emit_opcode(OpCode::Greater),
      TokenType::GreaterEqual => self.emit_opcodes(OpCode::Less, OpCode::Not),
      TokenType::Less => self.emit_opcode(OpCode::Less),
      TokenType::LessEqual => self.emit_opcodes(OpCode::Greater, OpCode::Not),
      _ => {}
    }
  }

  fn and(&mut self) {
    let end_jump = self.emit_jump(OpCode::JumpIfFalse);

    self.emit_opcode(OpCode::Pop);
    self.parse_precedence(Precedence::And);

    self.patch_jump(end_jump);
  }

  fn or(&mut self) {
    let else_jump = self.emit_jump(OpCode::JumpIfFalse);
    let end_jump = self.emit_jump(OpCode::Jump);

    self.patch_jump(else_jump);
    self.emit_opcode(OpCode::Pop);

    self.parse_precedence(Precedence::Or);
    self.patch_jump(end_jump);
  }
}

// Statements
impl<'s, 'h> Compiler<'s, 'h> {
  fn declaration(&mut self) {
    if self.matches(TokenType::Var) {
      self.var_declaration();
    } else {
      self.statement();
    }

    if self.panic_mode {
      self.synchronize();
    }
  }

  fn var_declaration(&mut self) {
    let global = self.parse_variable(Error::ExpectedVariableName);

    if self.matches(TokenType::Equal) {
      self.expression();
    } else {
      self.emit_opcode(OpCode::Nil);
    }
    self.consume(TokenType::Semicolon, Error::ExpectedSemicolonAfterDeclaration);

    self.define_variable(global);
  }

  fn statement(&mut self) {
    if self.matches(TokenType::Print) {
      self.print_statement();
    } else if self.matches(TokenType::If) {
      self.if_statement();
    } else if self.matches(TokenType::While) {
      self.while_statement();
    } else if self.matches(TokenType::For) {
      self.for_statement();
    } else if self.matches(TokenType::LeftBrace) {
      self.begin_scope();
      self.block();
      self.end_scope();
    } else {
      self.expression_statement();
    }
  }

  fn print_statement(&mut self) {
    self.expression();
    self.consume(TokenType::Semicolon, Error::ExpectedSemicolonAfterValue);
    self.emit_opcode(OpCode::Print);
  }

  fn expression_statement(&mut self) {
    self.expression();
    self.consume(TokenType::Semicolon, Error::ExpectedSemicolonAfterExpression);
    self.emit_opcode(OpCode::Pop);
  }

  fn block(&mut self) {
    while !self.check(TokenType::RightBrace) && !self.check(TokenType::EndOfFile) {
      self.declaration();
    }

    self.consume(TokenType::RightBrace, Error::ExpectedEndOfBlock);
  }

  fn condition(&mut self, keyword: &'static str) {
    self.consume(
      TokenType::LeftParen,
      Error::MissingBracketBeforeCondition(keyword),
    );
    self.expression();
    self.consume(TokenType::RightParen, Error::MissingBracketAfterCondition);
  }

  fn if_statement(&mut self) {
    self.condition("if");

    let then_jump = self.emit_jump(OpCode::JumpIfFalse);
    self.emit_opcode(OpCode::Pop);
    self.statement();

    let else_jump = self.emit_jump(OpCode::Jump);
    self.patch_jump(then_jump);
    self.emit_opcode(OpCode::Pop);

    if self.matches(TokenType::Else) {
      self.statement();
    }
    self.patch_jump(else_jump);
  }

  fn while_statement(&mut self) {
    let loop_start = self.chunk.length();
    self.condition("while");

    let exit_jump = self.emit_jump(OpCode::JumpIfFalse);
    self.emit_opcode(OpCode::Pop);
    self.statement();
    self.emit_loop(loop_start);

    self.patch_jump(exit_jump);
    self.emit_opcode(OpCode::Pop);
  }

  fn for_statement(&mut self) {
    self.begin_scope();
    self.consume(
      TokenType::LeftParen,
      Error::MissingBracketBeforeCondition("for"),
    );

    if self.matches(TokenType::Semicolon) {
      // No initializer
    } else if self.matches(TokenType::Var) {
      self.var_declaration();
    } else {
      self.expression_statement();
    }

    let mut loop_start = self.chunk.length();

    let mut exit_jump = None;
    if !self.matches(TokenType::Semicolon) {
      self.expression();
      self.consume(
        TokenType::Semicolon,
        Error::ExpectedSemicolonAfterLoopCondition,
      );

      exit_jump = Some(self.emit_jump(OpCode::JumpIfFalse));
      self.emit_opcode(OpCode::Pop);
    }

    if !self.matches(TokenType::RightParen) {
      // The increment runs after the body, so jump over it now and loop back to it later
      let body_jump = self.emit_jump(OpCode::Jump);
      let increment_start = self.chunk.length();

      self.expression();
      self.emit_opcode(OpCode::Pop);
      self.consume(TokenType::RightParen, Error::ExpectedBracketAfterForClauses);

      self.emit_loop(loop_start);
      loop_start = increment_start;
      self.patch_jump(body_jump);
    }

    self.statement();
    self.emit_loop(loop_start);

    if let Some(exit_jump) = exit_jump {
      self.patch_jump(exit_jump);
      self.emit_opcode(OpCode::Pop);
    }

    self.end_scope();
  }
}

/// Compiles `source` into a chunk, interning every string literal and global
/// name into `heap`. All errors found are returned, and no chunk is produced
/// if there were any.
pub fn compile(source: &str, heap: &mut Heap) -> Result<Chunk, Vec<CompileError>> {
  let mut compiler = Compiler::new(source, heap);
  compiler.advance();

  while !compiler.matches(TokenType::EndOfFile) {
    compiler.declaration();
  }

  compiler.emit_opcode(OpCode::Return);

  if !compiler.errors.is_empty() {
    return Err(compiler.errors);
  }

  let chunk = compiler.chunk.finalize();

  #[cfg(feature = "debug-bytecode")]
  print::chunk(&chunk, compiler.heap, "<script>");

  Ok(chunk)
}

#[cfg(test)]
mod test {
  use super::*;

  fn bytes(source: &str) -> Vec<u8> {
    let mut heap = Heap::new();
    let chunk = compile(source, &mut heap).unwrap();
    (0..chunk.length()).map(|i| chunk.get_value(i)).collect()
  }

  fn errors(source: &str) -> Vec<String> {
    let mut heap = Heap::new();
    compile(source, &mut heap)
      .unwrap_err()
      .iter()
      .map(ToString::to_string)
      .collect()
  }

  #[test]
  fn precedence_shapes_bytecode() {
    use OpCode::*;

    assert_eq!(
      bytes("1 + 2 * 3;"),
      vec![
        Constant as u8,
        0,
        Constant as u8,
        1,
        Constant as u8,
        2,
        Multiply as u8,
        Add as u8,
        Pop as u8,
        Return as u8
      ]
    );
    assert_eq!(
      bytes("!(1 >= 2);"),
      vec![
        Constant as u8,
        0,
        Constant as u8,
        1,
        Less as u8,
        Not as u8,
        Not as u8,
        Pop as u8,
        Return as u8
      ]
    );
  }

  #[test]
  fn locals_live_on_the_stack() {
    use OpCode::*;

    assert_eq!(
      bytes("{ var a = 1; a = 2; }"),
      vec![
        Constant as u8,
        0,
        Constant as u8,
        1,
        SetLocal as u8,
        0,
        Pop as u8,
        Pop as u8,
        Return as u8
      ]
    );
  }

  #[test]
  fn jumps_are_patched() {
    use OpCode::*;

    assert_eq!(
      bytes("if (true) nil; else false;"),
      vec![
        True as u8,
        JumpIfFalse as u8,
        0,
        6,
        Pop as u8,
        Nil as u8,
        Pop as u8,
        Jump as u8,
        0,
        3,
        Pop as u8,
        False as u8,
        Pop as u8,
        Return as u8
      ]
    );
  }

  #[test]
  fn recovers_after_an_error() {
    assert_eq!(
      errors("print 1 +;\nprint 2;"),
      vec!["[line 1] Error at ';': Expect expression."]
    );
    assert_eq!(
      errors("print ;\nvar 1;\nprint 3;"),
      vec![
        "[line 1] Error at ';': Expect expression.",
        "[line 2] Error at '1': Expect variable name."
      ]
    );
  }

  #[test]
  fn error_locations() {
    assert_eq!(
      errors("print 1"),
      vec!["[line 1] Error at end: Expect ';' after value."]
    );
    assert_eq!(errors("@"), vec!["[line 1] Error: Unexpected character."]);
    assert_eq!(
      errors("\n\"open"),
      vec!["[line 2] Error: Unterminated string."]
    );
  }

  #[test]
  fn invalid_assignment_target() {
    assert_eq!(
      errors("a + b = c;"),
      vec!["[line 1] Error at '=': Invalid assignment target."]
    );
  }

  #[test]
  fn local_variable_errors() {
    assert_eq!(
      errors("{ var a = 1; var a = 2; }"),
      vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
    );
    assert_eq!(
      errors("{ var a = a; }"),
      vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
    );
  }

  #[test]
  fn condition_brackets() {
    assert_eq!(
      errors("while true) {}"),
      vec!["[line 1] Error at 'true': Expect '(' after 'while'."]
    );
    assert_eq!(
      errors("for (;;"),
      vec!["[line 1] Error at end: Expect expression."]
    );
  }

  #[test]
  fn too_many_constants() {
    let numbers: Vec<String> = (0..=256).map(|i| i.to_string()).collect();
    let source = format!("print {};", numbers.join(" + "));

    let mut heap = Heap::new();
    let errors = compile(&source, &mut heap).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error, Error::TooManyConstants);
  }

  #[test]
  fn jump_limits() {
    let body = "print 1;".repeat(22_000);

    assert_eq!(
      errors(&format!("if (false) {{ {body} }}")),
      vec!["[line 1] Error at '}': Too much code to jump over."]
    );
    assert_eq!(
      errors(&format!("while (false) {{ {body} }}")),
      vec!["[line 1] Error at '}': Loop body too large."]
    );

    let mut heap = Heap::new();
    let body = "print 1;".repeat(21_000);
    assert!(compile(&format!("if (false) {{ {body} }}"), &mut heap).is_ok());
    assert!(compile(&format!("while (false) {{ {body} }}"), &mut heap).is_ok());
  }

  #[test]
  fn too_many_locals() {
    let declarations: String = (0..=LOCALS_MAX).map(|i| format!("var v{i};")).collect();
    let source = format!("{{ {declarations} }}");

    let mut heap = Heap::new();
    let errors = compile(&source, &mut heap).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error, Error::TooManyLocals);
  }

  #[test]
  fn interns_identifiers_and_literals() {
    let mut heap = Heap::new();
    compile("var name = \"name\";", &mut heap).unwrap();

    assert_eq!(heap.len(), 1);
    assert!(heap.find("name").is_some());
  }
}
