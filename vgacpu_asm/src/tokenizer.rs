use std::iter::Enumerate;
use std::str::Split;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LineKind<'a> {
  Blank,
  Comment(&'a str),
  /// Code with its leading whitespace stripped.
  Code(&'a str),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SourceLine<'a> {
  /// 1-based.
  pub number: usize,
  pub text: &'a str,
}

impl<'a> SourceLine<'a> {
  pub fn kind(&self) -> LineKind<'a> {
    let stripped = self.text.trim_start();
    if stripped.is_empty() {
      LineKind::Blank
    } else if stripped.starts_with("//") {
      LineKind::Comment(stripped)
    } else {
      LineKind::Code(stripped)
    }
  }
}

/// Lines of a source text, produced lazily.
pub struct Lines<'a> {
  inner: Enumerate<Split<'a, char>>,
}

/// Splits `source` on `\n`. A final line without a newline is still returned.
pub fn split(source: &str) -> Lines<'_> {
  Lines { inner: source.split('\n').enumerate() }
}

impl<'a> Iterator for Lines<'a> {
  type Item = SourceLine<'a>;

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(index, text)| SourceLine { number: index + 1, text })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(source: &str) -> Vec<LineKind<'_>> {
    split(source).map(|line| line.kind()).collect()
  }

  #[test]
  fn test_line_numbers_are_one_based() {
    let numbers: Vec<usize> = split("a\nb\nc").map(|line| line.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
  }

  #[test]
  fn test_last_line_without_newline() {
    let lines: Vec<&str> = split("nop\nhalt").map(|line| line.text).collect();
    assert_eq!(lines, vec!["nop", "halt"]);
  }

  #[test]
  fn test_classification() {
    assert_eq!(kinds("\n   \n\t// note\n  push r1\n"), vec![
      LineKind::Blank,
      LineKind::Blank,
      LineKind::Comment("// note"),
      LineKind::Code("push r1"),
      LineKind::Blank,
    ]);
  }

  #[test]
  fn test_single_slash_is_code() {
    assert_eq!(kinds("/ nop"), vec![LineKind::Code("/ nop")]);
  }

  #[test]
  fn test_carriage_return_line_is_blank() {
    assert_eq!(kinds("\r\nnop\r\n"), vec![
      LineKind::Blank,
      LineKind::Code("nop\r"),
      LineKind::Blank,
    ]);
  }

  #[test]
  fn test_empty_source() {
    assert_eq!(kinds(""), vec![LineKind::Blank]);
  }
}
