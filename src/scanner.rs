//! Lexical analysis: turns the raw input string into an on-demand stream of
//! tokens.
//!
//! The scanner is intentionally tiny. It knows nothing about the grammar
//! beyond recognising lexemes, and it hands out one token per `get_token`
//! call instead of building a vector up front, so the parser drives the pace.
//! Two-character operators are resolved by peeking one character ahead.

use crate::error::{CompileError, CompileResult};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Eof,
  Newline,
  Number,
  Ident,
  String,
  // Keywords. Spellings are the variant names uppercased.
  Label,
  Goto,
  Print,
  Input,
  Let,
  If,
  Then,
  Endif,
  While,
  Repeat,
  Endwhile,
  // Operators.
  Eq,
  Plus,
  Minus,
  Asterisk,
  Slash,
  EqEq,
  NotEq,
  Lt,
  LtEq,
  Gt,
  GtEq,
}

impl TokenKind {
  /// Look up a keyword by its exact spelling. Keywords are uppercase and the
  /// match is case-sensitive, so `If` or `print` come back as `None` and get
  /// classified as identifiers.
  pub fn keyword(spelling: &str) -> Option<TokenKind> {
    match spelling {
      "LABEL" => Some(Self::Label),
      "GOTO" => Some(Self::Goto),
      "PRINT" => Some(Self::Print),
      "INPUT" => Some(Self::Input),
      "LET" => Some(Self::Let),
      "IF" => Some(Self::If),
      "THEN" => Some(Self::Then),
      "ENDIF" => Some(Self::Endif),
      "WHILE" => Some(Self::While),
      "REPEAT" => Some(Self::Repeat),
      "ENDWHILE" => Some(Self::Endwhile),
      _ => None,
    }
  }
}

/// Thin pairing of a lexeme's exact source spelling with its kind.
///
/// EOF and NEWLINE use the synthetic spellings `\0` and `\n`; string tokens
/// carry their contents without the delimiting quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub spelling: String,
  pub kind: TokenKind,
}

impl Token {
  /// Convenience constructor to keep the scanning branches readable.
  pub fn new(spelling: impl Into<String>, kind: TokenKind) -> Self {
    Self {
      spelling: spelling.into(),
      kind,
    }
  }
}

impl std::fmt::Display for Token {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "Token {{ spelling = {}, kind = {:?} }}",
      self.spelling, self.kind
    )
  }
}

/// Streaming scanner over the source text.
///
/// The scanner appends a newline to the input so every grammar rule that
/// expects line termination can rely on one, and it reports a NUL sentinel
/// once the cursor runs past the end. The cursor never moves backwards;
/// lookahead is limited to `peek`.
pub struct Scanner {
  source: Vec<char>,
  pos: usize,
  current: char,
}

impl Scanner {
  pub fn new(input: &str) -> Self {
    let source: Vec<char> = input.chars().chain(std::iter::once('\n')).collect();
    let current = source[0];
    Self {
      source,
      pos: 0,
      current,
    }
  }

  /// The character currently under the cursor, NUL once past the end.
  pub fn current_char(&self) -> char {
    self.current
  }

  /// Advance the cursor one position. Safe to call arbitrarily often past
  /// the end of input; the current character just stays NUL.
  pub fn next_char(&mut self) {
    self.pos += 1;
    self.current = self.source.get(self.pos).copied().unwrap_or('\0');
  }

  /// The character one position ahead of the cursor, without advancing.
  pub fn peek(&self) -> char {
    self.source.get(self.pos + 1).copied().unwrap_or('\0')
  }

  fn skip_whitespace(&mut self) {
    while matches!(self.current, ' ' | '\t' | '\r') {
      self.next_char();
    }
  }

  /// Comments run from `#` to the end of the line. The newline itself is
  /// left for `get_token` so line termination still reaches the parser.
  fn skip_comment(&mut self) {
    if self.current == '#' {
      while self.current != '\n' {
        self.next_char();
      }
    }
  }

  fn error_here(&self, message: impl Into<String>) -> CompileError {
    CompileError::scan_at(&self.source, self.pos, message)
  }

  /// Consume one lexeme and return its token, leaving the cursor one past
  /// the lexeme. Past end-of-input this keeps returning `Eof`.
  pub fn get_token(&mut self) -> CompileResult<Token> {
    self.skip_whitespace();
    self.skip_comment();

    let token = match self.current {
      '+' => Token::new("+", TokenKind::Plus),
      '-' => Token::new("-", TokenKind::Minus),
      '*' => Token::new("*", TokenKind::Asterisk),
      '/' => Token::new("/", TokenKind::Slash),
      '\n' => Token::new("\n", TokenKind::Newline),
      '\0' => Token::new("\0", TokenKind::Eof),
      '=' => {
        if self.peek() == '=' {
          self.next_char();
          Token::new("==", TokenKind::EqEq)
        } else {
          Token::new("=", TokenKind::Eq)
        }
      }
      '<' => {
        if self.peek() == '=' {
          self.next_char();
          Token::new("<=", TokenKind::LtEq)
        } else {
          Token::new("<", TokenKind::Lt)
        }
      }
      '>' => {
        if self.peek() == '=' {
          self.next_char();
          Token::new(">=", TokenKind::GtEq)
        } else {
          Token::new(">", TokenKind::Gt)
        }
      }
      '!' => {
        if self.peek() == '=' {
          self.next_char();
          Token::new("!=", TokenKind::NotEq)
        } else {
          let got = self.peek();
          return Err(self.error_here(format!("expected !=, got {got:?}")));
        }
      }
      '"' => {
        self.next_char();
        let start = self.pos;
        while self.current != '"' {
          // No escape sequences: anything that would confuse the emitted
          // printf format string is rejected outright.
          if matches!(self.current, '\r' | '\n' | '\t' | '\\' | '%') {
            return Err(self.error_here(format!(
              "illegal character in string: {:?}",
              self.current
            )));
          }
          self.next_char();
        }
        let spelling: String = self.source[start..self.pos].iter().collect();
        Token::new(spelling, TokenKind::String)
      }
      c if c.is_ascii_digit() => {
        let start = self.pos;
        while self.peek().is_ascii_digit() {
          self.next_char();
        }
        if self.peek() == '.' {
          self.next_char();
          // A decimal point must be followed by at least one digit.
          if !self.peek().is_ascii_digit() {
            let got = self.peek();
            return Err(self.error_here(format!("illegal character in number: {got:?}")));
          }
          while self.peek().is_ascii_digit() {
            self.next_char();
          }
        }
        let spelling: String = self.source[start..=self.pos].iter().collect();
        Token::new(spelling, TokenKind::Number)
      }
      c if c.is_ascii_alphabetic() => {
        let start = self.pos;
        while self.peek().is_ascii_alphanumeric() {
          self.next_char();
        }
        let spelling: String = self.source[start..=self.pos].iter().collect();
        match TokenKind::keyword(&spelling) {
          Some(kind) => Token::new(spelling, kind),
          None => Token::new(spelling, TokenKind::Ident),
        }
      }
      c => {
        return Err(self.error_here(format!("unknown token: {c:?}")));
      }
    };

    self.next_char();
    Ok(token)
  }
}
