//! Accumulates the generated C text.
//!
//! The emitter is a dumb sink with two ordered regions: a header for the
//! include line, the `main` signature and variable declarations, and a body
//! for the statements in program order. The parser appends and never reads
//! back; well-formedness of the fragments is entirely the parser's problem.

/// Two append-only text buffers, finalized into one artifact.
pub struct Emitter {
  header: String,
  code: String,
}

impl Emitter {
  pub fn new() -> Self {
    Self {
      header: String::new(),
      code: String::new(),
    }
  }

  /// Append a fragment to the body without a line break.
  pub fn emit(&mut self, fragment: &str) {
    self.code.push_str(fragment);
  }

  /// Append a full line to the body.
  pub fn emit_line(&mut self, fragment: &str) {
    self.code.push_str(fragment);
    self.code.push('\n');
  }

  /// Append a full line to the header region.
  pub fn header_line(&mut self, fragment: &str) {
    self.header.push_str(fragment);
    self.header.push('\n');
  }

  /// Concatenate header then body. Consumes the emitter so finalization can
  /// only happen once.
  pub fn finalize(self) -> String {
    let mut out = self.header;
    out.push_str(&self.code);
    out
  }
}

impl Default for Emitter {
  fn default() -> Self {
    Self::new()
  }
}
