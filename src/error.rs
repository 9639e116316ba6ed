//! Shared error utilities used across the compilation pipeline.
//!
//! Diagnostics are kept lightweight on purpose. Scan errors point at the
//! offending character with a caret under its source line; parse and
//! semantic errors name the construct in prose, since tokens carry no
//! position of their own.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

/// One variant per error category, so the driver can pick a distinct exit
/// status for each.
#[derive(Debug, Snafu)]
pub enum CompileError {
  #[snafu(display("scan error: {message}\n{line_text}\n{marker}"))]
  Scan {
    message: String,
    line_text: String,
    marker: String,
  },

  #[snafu(display("parse error: {message}"))]
  Parse { message: String },

  #[snafu(display("semantic error: {message}"))]
  Semantic { message: String },
}

impl CompileError {
  /// Construct a scan error anchored at a character offset in the source.
  ///
  /// The source is the scanner's character buffer, which already carries the
  /// implicit trailing newline, so a line containing `loc` always exists.
  pub fn scan_at(source: &[char], loc: usize, message: impl Into<String>) -> Self {
    let loc = loc.min(source.len().saturating_sub(1));
    let line_start = source[..loc]
      .iter()
      .rposition(|&c| c == '\n')
      .map(|i| i + 1)
      .unwrap_or(0);
    let line_end = source[loc..]
      .iter()
      .position(|&c| c == '\n')
      .map(|i| loc + i)
      .unwrap_or(source.len());
    let line_number = source[..line_start].iter().filter(|&&c| c == '\n').count() + 1;

    let prefix = format!("{line_number} | ");
    let text: String = source[line_start..line_end].iter().collect();
    let marker = format!("{}^", " ".repeat(prefix.chars().count() + (loc - line_start)));
    Self::Scan {
      message: message.into(),
      line_text: format!("{prefix}{text}"),
      marker,
    }
  }

  pub fn parse(message: impl Into<String>) -> Self {
    Self::Parse {
      message: message.into(),
    }
  }

  pub fn semantic(message: impl Into<String>) -> Self {
    Self::Semantic {
      message: message.into(),
    }
  }

  /// Process exit status for this error category. The driver reserves 1 for
  /// file I/O failures and 2 for usage errors.
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::Scan { .. } => 3,
      Self::Parse { .. } => 4,
      Self::Semantic { .. } => 5,
    }
  }
}
