use crate::token::{CharacterPosition, LineNumber};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  UnexpectedCharacter,
  UnterminatedString,
  ExpectedExpression,
  ExpectedBracketAfterExpression,
  ExpectedSemicolonAfterValue,
  ExpectedSemicolonAfterExpression,
  ExpectedVariableName,
  ExpectedSemicolonAfterDeclaration,
  ExpectedEndOfBlock,
  MissingBracketBeforeCondition(&'static str),
  MissingBracketAfterCondition,
  ExpectedSemicolonAfterLoopCondition,
  ExpectedBracketAfterForClauses,
  InvalidAssignmentTarget,
  TooManyConstants,
  TooManyLocals,
  VariableAlreadyExists,
  ReadInOwnInitializer,
  TooBigJump,
  TooBigLoop,
}

impl Error {
  pub fn get_title(&self) -> &'static str {
    match self {
      Self::UnexpectedCharacter => "Unexpected Character",
      Self::UnterminatedString => "Unterminated String",
      Self::ExpectedExpression => "Expected Expression",
      Self::ExpectedBracketAfterExpression => "Expected Closing Bracket",
      Self::ExpectedSemicolonAfterValue
      | Self::ExpectedSemicolonAfterExpression
      | Self::ExpectedSemicolonAfterDeclaration
      | Self::ExpectedSemicolonAfterLoopCondition => "Expected Semicolon",
      Self::ExpectedVariableName => "Expected Variable Name",
      Self::ExpectedEndOfBlock => "Expected End of Block",
      Self::MissingBracketBeforeCondition(_) => "Expected Bracket Before Condition",
      Self::MissingBracketAfterCondition => "Expected Bracket After Condition",
      Self::ExpectedBracketAfterForClauses => "Expected Bracket After Clauses",
      Self::InvalidAssignmentTarget => "Invalid Assignment Target",
      Self::TooManyConstants => "Too Many Constants",
      Self::TooManyLocals => "Too Many Local Variables",
      Self::VariableAlreadyExists => "Variable Already Exists",
      Self::ReadInOwnInitializer => "Variable Used In Own Initializer",
      Self::TooBigJump => "Jump Too Large",
      Self::TooBigLoop => "Loop Too Large",
    }
  }

  pub fn get_message(&self) -> String {
    match self {
      Self::UnexpectedCharacter => "Unexpected character.".to_string(),
      Self::UnterminatedString => "Unterminated string.".to_string(),
      Self::ExpectedExpression => "Expect expression.".to_string(),
      Self::ExpectedBracketAfterExpression => "Expect ')' after expression.".to_string(),
      Self::ExpectedSemicolonAfterValue => "Expect ';' after value.".to_string(),
      Self::ExpectedSemicolonAfterExpression => "Expect ';' after expression.".to_string(),
      Self::ExpectedVariableName => "Expect variable name.".to_string(),
      Self::ExpectedSemicolonAfterDeclaration => {
        "Expect ';' after variable declaration.".to_string()
      }
      Self::ExpectedEndOfBlock => "Expect '}' after block.".to_string(),
      Self::MissingBracketBeforeCondition(keyword) => format!("Expect '(' after '{keyword}'."),
      Self::MissingBracketAfterCondition => "Expect ')' after condition.".to_string(),
      Self::ExpectedSemicolonAfterLoopCondition => "Expect ';' after loop condition.".to_string(),
      Self::ExpectedBracketAfterForClauses => "Expect ')' after for clauses.".to_string(),
      Self::InvalidAssignmentTarget => "Invalid assignment target.".to_string(),
      Self::TooManyConstants => "Too many constants in one chunk.".to_string(),
      Self::TooManyLocals => "Too many local variables in function.".to_string(),
      Self::VariableAlreadyExists => "Already a variable with this name in this scope.".to_string(),
      Self::ReadInOwnInitializer => "Can't read local variable in its own initializer.".to_string(),
      Self::TooBigJump => "Too much code to jump over.".to_string(),
      Self::TooBigLoop => "Loop body too large.".to_string(),
    }
  }
}

/// Where in the source a compile error was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
  Token(String),
  EndOfFile,
  Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
  pub error: Error,
  pub line: LineNumber,
  pub start: CharacterPosition,
  pub end: CharacterPosition,
  pub location: Location,
}

impl CompileError {
  pub fn message(&self) -> String {
    self.error.get_message()
  }
}

impl fmt::Display for CompileError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[line {}] Error", self.line)?;
    match &self.location {
      Location::Token(lexeme) => write!(f, " at '{lexeme}'")?,
      Location::EndOfFile => write!(f, " at end")?,
      Location::Unknown => {}
    }
    write!(f, ": {}", self.message())
  }
}

impl std::error::Error for CompileError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
  pub message: String,
  pub line: LineNumber,
}

impl fmt::Display for RuntimeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}\n[line {}] in script", self.message, self.line)
  }
}

impl std::error::Error for RuntimeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
  Compile(Vec<CompileError>),
  Runtime(RuntimeError),
}

impl fmt::Display for InterpretError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Compile(errors) => {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("\n"))
      }
      Self::Runtime(error) => write!(f, "{error}"),
    }
  }
}

impl std::error::Error for InterpretError {}

impl From<RuntimeError> for InterpretError {
  fn from(error: RuntimeError) -> Self {
    Self::Runtime(error)
  }
}

impl From<Vec<CompileError>> for InterpretError {
  fn from(errors: Vec<CompileError>) -> Self {
    Self::Compile(errors)
  }
}
