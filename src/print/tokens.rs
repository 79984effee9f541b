use crate::scanner::Scanner;
use crate::token::{Token, TokenType};

fn remove_carriage_returns(value: &str) -> String {
  str::replace(value, "\r", "")
}

pub fn print(source: &str) {
  let mut scanner = Scanner::new(source);
  let mut line = 0;

  println!("     ╭─[Tokens]");
  loop {
    let token = scanner.next_token();
    if token.line == line {
      print!("     │ ");
    } else {
      print!("{:>4} │ ", token.line);
      line = token.line;
    }
    println!("{}", describe(source, &token));

    if token.token_type == TokenType::EndOfFile {
      break;
    }
  }
  println!("─────╯");
}

/// Prints a single token as it is scanned
pub fn token(source: &str, token: &Token) {
  println!("{:>4} │ {}", token.line, describe(source, token));
}

fn describe(source: &str, token: &Token) -> String {
  match token.error {
    Some(error) => format!("{:?} ({})", token.token_type, error.get_message()),
    None => format!(
      "{:?} ({})",
      token.token_type,
      remove_carriage_returns(token.get_value(source))
    ),
  }
}
