//! Parser behaviour: grammar acceptance, semantic checks and the exact C
//! fragments the parser emits while recognising each construct.

use teenyc::compile;
use teenyc::emitter::Emitter;
use teenyc::error::CompileError;
use teenyc::parser::Parser;
use teenyc::scanner::{Scanner, TokenKind};

#[test]
fn lookahead_window_is_primed_on_construction() {
  let scanner = Scanner::new("LET a = 1");
  let mut emitter = Emitter::new();
  let parser = Parser::new(scanner, &mut emitter).unwrap();

  assert!(parser.check_current(TokenKind::Let));
  assert!(parser.check_next(TokenKind::Ident));
  assert!(!parser.check_next(TokenKind::Eq));
}

#[test]
fn empty_program_still_gets_the_boilerplate() {
  let out = compile("").unwrap();
  assert_eq!(
    out,
    "#include <stdio.h>\nint main(int argc, char *argv[]) {\nreturn 0;\n}\n"
  );
}

#[test]
fn print_string_becomes_a_printf_of_the_literal() {
  let out = compile("PRINT \"hello, world!\"\n").unwrap();
  assert_eq!(
    out,
    "#include <stdio.h>\n\
     int main(int argc, char *argv[]) {\n\
     printf(\"%s\\n\", \"hello, world!\");\n\
     return 0;\n\
     }\n"
  );
}

#[test]
fn print_expression_is_cast_to_float() {
  let out = compile("LET a = 1\nPRINT a + 2 * 3\n").unwrap();
  assert!(out.contains("printf(\"%.2f\\n\", (float)(a+2*3));"), "got:\n{out}");
}

#[test]
fn let_declares_once_and_assigns_every_time() {
  let out = compile("LET a = 1\nLET b = 2\nLET a = a + 1\nINPUT c\n").unwrap();

  // Declarations land in the header, before any assignment, in first-use
  // order, exactly once per name.
  let header_end = out.find("a = 1;").unwrap();
  let header = &out[..header_end];
  let decl_a = header.find("float a;").unwrap();
  let decl_b = header.find("float b;").unwrap();
  let decl_c = header.find("float c;").unwrap();
  assert!(decl_a < decl_b && decl_b < decl_c);
  assert_eq!(out.matches("float a;").count(), 1);
  assert_eq!(out.matches("float b;").count(), 1);
  assert_eq!(out.matches("float c;").count(), 1);

  assert!(out.contains("a = 1;"));
  assert!(out.contains("a = a+1;"));
}

#[test]
fn input_emits_the_guarded_scanf() {
  let out = compile("INPUT nums\n").unwrap();
  assert!(out.contains("float nums;"));
  assert!(out.contains(
    "if(0 == scanf(\"%f\", &nums)) {\nnums = 0;\nscanf(\"%*s\");\n}\n"
  ));
}

#[test]
fn if_and_while_emit_brace_blocks() {
  let source = "\
LET i = 5
WHILE i > 0 REPEAT
    IF i == 1 THEN
        PRINT \"last\"
    ENDIF
    LET i = i - 1
ENDWHILE
";
  let out = compile(source).unwrap();
  assert!(out.contains("while (i>0) {"), "got:\n{out}");
  assert!(out.contains("if(i==1) {"), "got:\n{out}");
  // One closing brace per block plus the one closing main.
  assert_eq!(out.matches('}').count(), 3);
}

#[test]
fn chained_comparators_are_passed_through() {
  let out = compile("LET a = 1\nIF 1 < a <= 3 THEN\nENDIF\n").unwrap();
  assert!(out.contains("if(1<a<=3) {"), "got:\n{out}");
}

#[test]
fn unary_sign_is_passed_through() {
  let out = compile("LET a = -1\nPRINT -a\n").unwrap();
  assert!(out.contains("a = -1;"));
  assert!(out.contains("(float)(-a)"));
}

#[test]
fn label_and_goto_emit_c_labels() {
  let out = compile("LET i = 0\nLABEL top\nLET i = i + 1\nGOTO top\n").unwrap();
  assert!(out.contains("top:\n"));
  assert!(out.contains("goto top;\n"));
}

#[test]
fn forward_goto_reference_is_legal() {
  let out = compile("GOTO done\nLABEL done\n").unwrap();
  let goto_pos = out.find("goto done;").unwrap();
  let label_pos = out.find("done:").unwrap();
  assert!(goto_pos < label_pos);
}

#[test]
fn goto_to_a_missing_label_is_rejected_at_end_of_program() {
  let err = compile("GOTO missing\nLABEL other\n").unwrap_err();
  assert!(matches!(err, CompileError::Semantic { .. }), "got {err:?}");
  assert!(err.to_string().contains("missing"));
}

#[test]
fn duplicate_label_is_rejected() {
  let err = compile("LABEL a\nLABEL a\n").unwrap_err();
  assert!(matches!(err, CompileError::Semantic { .. }), "got {err:?}");
  assert!(err.to_string().contains("already exists"));
}

#[test]
fn variable_use_before_declaration_is_rejected() {
  let err = compile("PRINT x\n").unwrap_err();
  assert!(matches!(err, CompileError::Semantic { .. }), "got {err:?}");
  assert!(err.to_string().contains("non-existent variable x"));
}

#[test]
fn variables_unlike_labels_may_not_be_forward_referenced() {
  let err = compile("PRINT x\nLET x = 1\n").unwrap_err();
  assert!(matches!(err, CompileError::Semantic { .. }), "got {err:?}");
}

#[test]
fn comparison_requires_at_least_one_comparator() {
  let err = compile("IF 1 THEN\nENDIF\n").unwrap_err();
  assert!(matches!(err, CompileError::Parse { .. }), "got {err:?}");
  assert!(err.to_string().contains("comparison operator"));
}

#[test]
fn unrecognized_statement_keyword_is_rejected() {
  let err = compile("foo\n").unwrap_err();
  assert!(matches!(err, CompileError::Parse { .. }), "got {err:?}");
  assert!(err.to_string().contains("does not start a valid statement"));
}

#[test]
fn let_requires_an_equals_sign() {
  let err = compile("LET a 1\n").unwrap_err();
  assert!(matches!(err, CompileError::Parse { .. }), "got {err:?}");
}

#[test]
fn leading_blank_lines_and_comments_are_allowed() {
  let source = "\n\n# a comment on its own line\n\nPRINT \"hi\"\n";
  let out = compile(source).unwrap();
  assert!(out.contains("printf(\"%s\\n\", \"hi\");"));
}

#[test]
fn error_categories_map_to_distinct_exit_codes() {
  let scan = compile("LET a = $\n").unwrap_err();
  let parse = compile("LET a 1\n").unwrap_err();
  let semantic = compile("PRINT x\n").unwrap_err();

  assert_eq!(scan.exit_code(), 3);
  assert_eq!(parse.exit_code(), 4);
  assert_eq!(semantic.exit_code(), 5);
}
