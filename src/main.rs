use std::env;
use std::fs;
use std::process;

use teenyc::scanner::{Scanner, TokenKind};
use teenyc::CompileResult;

const OUTPUT_PATH: &str = "out.c";

fn main() {
  let args: Vec<String> = env::args().collect();

  let (dump_tokens, path) = match args.len() {
    2 if args[1] != "--tokens" => (false, args[1].as_str()),
    3 if args[1] == "--tokens" => (true, args[2].as_str()),
    _ => {
      let program = args.first().map(String::as_str).unwrap_or("teenyc");
      eprintln!("usage: {program} [--tokens] <source-file>");
      process::exit(2);
    }
  };

  let source = fs::read_to_string(path).unwrap_or_else(|err| {
    eprintln!("error reading '{path}': {err}");
    process::exit(1);
  });

  if dump_tokens {
    if let Err(err) = dump_token_stream(&source) {
      eprintln!("{err}");
      process::exit(err.exit_code());
    }
    return;
  }

  match teenyc::compile(&source) {
    Ok(code) => {
      fs::write(OUTPUT_PATH, code).unwrap_or_else(|err| {
        eprintln!("error writing '{OUTPUT_PATH}': {err}");
        process::exit(1);
      });
      println!("compilation complete, wrote {OUTPUT_PATH}");
    }
    Err(err) => {
      eprintln!("{err}");
      process::exit(err.exit_code());
    }
  }
}

/// Debugging aid: print the token stream instead of compiling.
fn dump_token_stream(source: &str) -> CompileResult<()> {
  let mut scanner = Scanner::new(source);
  loop {
    let token = scanner.get_token()?;
    if token.kind == TokenKind::Eof {
      return Ok(());
    }
    println!("{token}");
  }
}
