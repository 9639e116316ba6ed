//! Recursive-descent parser that emits C as a side effect of recognition.
//!
//! The parser keeps a two-token lookahead window over the scanner and walks
//! the grammar top-down, one function per production. There is no AST: every
//! rule with a code-generation obligation appends its fragment to the
//! injected emitter the moment the rule is recognised, so recognition and
//! generation stay in lockstep. Symbol and label bookkeeping happens inline,
//! except the goto/label consistency check, which has to wait until the whole
//! program has been consumed because labels may be declared after the goto
//! that names them.

use std::collections::HashSet;

use crate::emitter::Emitter;
use crate::error::{CompileError, CompileResult};
use crate::scanner::{Scanner, Token, TokenKind};

/// Grammar driver. Wraps one scanner and one emitter for exactly one
/// top-to-bottom traversal of the `program` rule.
pub struct Parser<'a> {
  scanner: Scanner,
  emitter: &'a mut Emitter,
  current: Token,
  next: Token,
  symbols: HashSet<String>,
  declared_labels: HashSet<String>,
  gotoed_labels: HashSet<String>,
}

impl<'a> Parser<'a> {
  /// Prime the two-slot lookahead window. Fails if the first two tokens
  /// already trip a scan error.
  pub fn new(mut scanner: Scanner, emitter: &'a mut Emitter) -> CompileResult<Self> {
    let current = scanner.get_token()?;
    let next = scanner.get_token()?;
    Ok(Self {
      scanner,
      emitter,
      current,
      next,
      symbols: HashSet::new(),
      declared_labels: HashSet::new(),
      gotoed_labels: HashSet::new(),
    })
  }

  /// True if the current token has the given kind.
  pub fn check_current(&self, kind: TokenKind) -> bool {
    self.current.kind == kind
  }

  /// True if the token after the current one has the given kind.
  pub fn check_next(&self, kind: TokenKind) -> bool {
    self.next.kind == kind
  }

  /// Shift the lookahead window by one token.
  fn advance(&mut self) -> CompileResult<()> {
    self.current = std::mem::replace(&mut self.next, self.scanner.get_token()?);
    Ok(())
  }

  /// Require the current token to have the given kind, then advance.
  fn match_token(&mut self, kind: TokenKind) -> CompileResult<()> {
    if !self.check_current(kind) {
      return Err(CompileError::parse(format!(
        "expected {:?}, but found {:?}",
        kind, self.current.kind
      )));
    }
    self.advance()
  }

  /// Run the start symbol to completion.
  ///
  /// program ::= { NEWLINE } { statement }
  pub fn parse(&mut self) -> CompileResult<()> {
    self.emitter.header_line("#include <stdio.h>");
    self.emitter.header_line("int main(int argc, char *argv[]) {");

    while self.check_current(TokenKind::Newline) {
      self.advance()?;
    }

    while !self.check_current(TokenKind::Eof) {
      self.statement()?;
    }

    // Deferred check: every goto target must have been declared somewhere in
    // the program, possibly after the goto that references it.
    for label in &self.gotoed_labels {
      if !self.declared_labels.contains(label) {
        return Err(CompileError::semantic(format!(
          "attempting to GOTO an undeclared label {label}"
        )));
      }
    }

    self.emitter.emit_line("return 0;");
    self.emitter.emit_line("}");
    Ok(())
  }

  /// statement ::= "PRINT" (expression | STRING) NL
  ///             | "IF" comparison "THEN" NL { statement } "ENDIF" NL
  ///             | "WHILE" comparison "REPEAT" NL { statement } "ENDWHILE" NL
  ///             | "LABEL" IDENT NL
  ///             | "GOTO" IDENT NL
  ///             | "LET" IDENT "=" expression NL
  ///             | "INPUT" IDENT NL
  fn statement(&mut self) -> CompileResult<()> {
    match self.current.kind {
      TokenKind::Print => {
        self.match_token(TokenKind::Print)?;
        if self.check_current(TokenKind::String) {
          self
            .emitter
            .emit_line(&format!("printf(\"%s\\n\", \"{}\");", self.current.spelling));
          self.match_token(TokenKind::String)?;
        } else {
          self.emitter.emit("printf(\"%.2f\\n\", (float)(");
          self.expression()?;
          self.emitter.emit_line("));");
        }
      }
      TokenKind::If => {
        self.match_token(TokenKind::If)?;
        self.emitter.emit("if(");
        self.comparison()?;
        self.match_token(TokenKind::Then)?;
        self.nl()?;
        self.emitter.emit_line(") {");

        while !self.check_current(TokenKind::Endif) {
          self.statement()?;
        }
        self.match_token(TokenKind::Endif)?;
        self.emitter.emit_line("}");
      }
      TokenKind::While => {
        self.match_token(TokenKind::While)?;
        self.emitter.emit("while (");
        self.comparison()?;
        self.match_token(TokenKind::Repeat)?;
        self.nl()?;
        self.emitter.emit_line(") {");

        while !self.check_current(TokenKind::Endwhile) {
          self.statement()?;
        }
        self.match_token(TokenKind::Endwhile)?;
        self.emitter.emit_line("}");
      }
      TokenKind::Label => {
        self.match_token(TokenKind::Label)?;
        let name = self.current.spelling.clone();
        if !self.declared_labels.insert(name.clone()) {
          return Err(CompileError::semantic(format!("label {name} already exists")));
        }
        self.emitter.emit_line(&format!("{name}:"));
        self.match_token(TokenKind::Ident)?;
      }
      TokenKind::Goto => {
        self.match_token(TokenKind::Goto)?;
        // Recorded unconditionally; validity is checked after the program
        // has been fully consumed, so forward references stay legal.
        let name = self.current.spelling.clone();
        self.gotoed_labels.insert(name.clone());
        self.emitter.emit_line(&format!("goto {name};"));
        self.match_token(TokenKind::Ident)?;
      }
      TokenKind::Let => {
        self.match_token(TokenKind::Let)?;
        let name = self.current.spelling.clone();
        self.declare_variable(&name);
        self.emitter.emit(&format!("{name} = "));
        self.match_token(TokenKind::Ident)?;
        self.match_token(TokenKind::Eq)?;
        self.expression()?;
        self.emitter.emit_line(";");
      }
      TokenKind::Input => {
        self.match_token(TokenKind::Input)?;
        let name = self.current.spelling.clone();
        self.declare_variable(&name);
        // Guard the read: a malformed number zeroes the variable and the
        // offending token is discarded so the next read starts clean.
        self
          .emitter
          .emit_line(&format!("if(0 == scanf(\"%f\", &{name})) {{"));
        self.emitter.emit_line(&format!("{name} = 0;"));
        self.emitter.emit_line("scanf(\"%*s\");");
        self.emitter.emit_line("}");
        self.match_token(TokenKind::Ident)?;
      }
      _ => {
        return Err(CompileError::parse(format!(
          "{} does not start a valid statement",
          self.current
        )));
      }
    }

    self.nl()
  }

  /// Add a variable to the symbol set, emitting its declaration into the
  /// header the first time the name is seen.
  fn declare_variable(&mut self, name: &str) {
    if self.symbols.insert(name.to_string()) {
      self.emitter.header_line(&format!("float {name};"));
    }
  }

  /// comparison ::= expression compOp expression { compOp expression }
  ///
  /// At least one comparator is mandatory; a bare expression is not a valid
  /// comparison.
  fn comparison(&mut self) -> CompileResult<()> {
    self.expression()?;

    if self.is_comparison_operator() {
      self.emitter.emit(&self.current.spelling);
      self.advance()?;
      self.expression()?;
    } else {
      return Err(CompileError::parse(format!(
        "expected a comparison operator, but found {}",
        self.current
      )));
    }

    while self.is_comparison_operator() {
      self.emitter.emit(&self.current.spelling);
      self.advance()?;
      self.expression()?;
    }
    Ok(())
  }

  fn is_comparison_operator(&self) -> bool {
    matches!(
      self.current.kind,
      TokenKind::EqEq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
    )
  }

  /// expression ::= term { ("+" | "-") term }
  fn expression(&mut self) -> CompileResult<()> {
    self.term()?;
    while matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
      self.emitter.emit(&self.current.spelling);
      self.advance()?;
      self.term()?;
    }
    Ok(())
  }

  /// term ::= unary { ("*" | "/") unary }
  fn term(&mut self) -> CompileResult<()> {
    self.unary()?;
    while matches!(self.current.kind, TokenKind::Asterisk | TokenKind::Slash) {
      self.emitter.emit(&self.current.spelling);
      self.advance()?;
      self.unary()?;
    }
    Ok(())
  }

  /// unary ::= ["+" | "-"] primary
  fn unary(&mut self) -> CompileResult<()> {
    if matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
      self.emitter.emit(&self.current.spelling);
      self.advance()?;
    }
    self.primary()
  }

  /// primary ::= NUMBER | IDENT
  ///
  /// Identifiers must already be in the symbol set: unlike labels, variables
  /// may not be referenced ahead of their declaring LET or INPUT.
  fn primary(&mut self) -> CompileResult<()> {
    match self.current.kind {
      TokenKind::Number => {
        self.emitter.emit(&self.current.spelling);
        self.advance()
      }
      TokenKind::Ident => {
        if !self.symbols.contains(&self.current.spelling) {
          return Err(CompileError::semantic(format!(
            "referencing a non-existent variable {}",
            self.current.spelling
          )));
        }
        self.emitter.emit(&self.current.spelling);
        self.advance()
      }
      _ => Err(CompileError::parse(format!(
        "expected a number or an identifier, but found {}",
        self.current
      ))),
    }
  }

  /// NL ::= NEWLINE { NEWLINE }
  fn nl(&mut self) -> CompileResult<()> {
    self.match_token(TokenKind::Newline)?;
    while self.check_current(TokenKind::Newline) {
      self.advance()?;
    }
    Ok(())
  }
}
