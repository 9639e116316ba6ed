//! Crate root: wires together the compilation pipeline.
//!
//! The stages are intentionally small and composable so they can be evolved
//! independently:
//! - `scanner` performs lexical analysis, one token per request.
//! - `parser` owns all syntactic and semantic knowledge and drives emission.
//! - `emitter` accumulates the generated C text and finalizes it once.
//! - `error` centralises reporting utilities shared by the other modules.

pub mod emitter;
pub mod error;
pub mod parser;
pub mod scanner;

pub use error::{CompileError, CompileResult};

/// Compile a Teeny source string into C source text.
pub fn compile(source: &str) -> CompileResult<String> {
  let scanner = scanner::Scanner::new(source);
  let mut emitter = emitter::Emitter::new();
  let mut parser = parser::Parser::new(scanner, &mut emitter)?;
  parser.parse()?;
  Ok(emitter.finalize())
}
