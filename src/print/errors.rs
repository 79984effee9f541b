use crate::error::{CompileError, RuntimeError};

use ariadne::{Label, Report, ReportKind, Source};
use std::ops::Range;

fn red(text: &str) -> String {
  format!("\u{001b}[31m{}\u{001b}[0m", text)
}

fn bold(text: &str) -> String {
  format!("\u{001b}[1m{}\u{001b}[0m", text)
}

pub fn error_message(message: &str) {
  eprintln!("{} {}", bold(&red("Error:")), bold(message));
}

/// Converts a byte offset into the character offset ariadne expects
fn character_offset(source: &str, byte_offset: usize) -> usize {
  source
    .char_indices()
    .take_while(|(index, _)| *index < byte_offset)
    .count()
}

fn error_span(source: &str, start: usize, end: usize) -> Range<usize> {
  let length = source.chars().count();
  let start = character_offset(source, start).min(length);
  let end = character_offset(source, end).clamp(start, length);

  if start < end {
    start..end
  } else if start < length {
    start..start + 1
  } else {
    length.saturating_sub(1)..length
  }
}

fn line_span(source: &str, line: usize) -> Range<usize> {
  let start: usize = source
    .split_inclusive('\n')
    .take(line.saturating_sub(1))
    .map(|line| line.chars().count())
    .sum();
  let length = source
    .split_inclusive('\n')
    .nth(line.saturating_sub(1))
    .map_or(0, |line| line.trim_end().chars().count());

  start..start + length.max(1)
}

fn report(file: &str, source: &str, title: &str, message: &str, span: Range<usize>) {
  let result = Report::build(ReportKind::Error, file, span.start)
    .with_message(title)
    .with_label(Label::new((file, span)).with_message(message))
    .finish()
    .eprint((file, Source::from(source)));

  if result.is_err() {
    error_message(message);
  }
}

pub fn compile_error(file: &str, source: &str, error: &CompileError) {
  if source.is_empty() {
    error_message(&error.to_string());
    return;
  }

  let span = error_span(source, error.start, error.end);
  report(file, source, &error.to_string(), &error.message(), span);
}

pub fn runtime_error(file: &str, source: &str, error: &RuntimeError) {
  if source.is_empty() || error.line == 0 {
    error_message(&error.to_string());
    return;
  }

  let title = format!("{} [line {}]", error.message, error.line);
  let span = line_span(source, error.line as usize);
  report(file, source, &title, &error.message, span);
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn spans_count_characters() {
    let source = "print \"é\" + ;";
    assert_eq!(character_offset(source, 12), 11);
    assert_eq!(error_span(source, 12, 13), 11..12);
  }

  #[test]
  fn empty_spans_are_widened() {
    let source = "print 1";
    assert_eq!(error_span(source, 2, 2), 2..3);
    assert_eq!(error_span(source, 7, 7), 6..7);
  }

  #[test]
  fn line_spans() {
    let source = "var a = 1;\nprint a + nil;\n";
    assert_eq!(line_span(source, 1), 0..10);
    assert_eq!(line_span(source, 2), 11..25);
  }
}
