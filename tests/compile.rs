//! End-to-end translation tests: whole source programs in, C artifacts out.

use bracken::{Codegen, CompileError};
use pretty_assertions::assert_eq;

#[test]
fn conditional_program_produces_full_artifact() {
    let source = "LET x = 5\nIF x > 1 THEN\nPRINT \"big\"\nENDIF\n";
    let artifact = Codegen::translate(source).unwrap();
    assert_eq!(
        artifact,
        "#include <stdio.h>\n\
         int main(void){\n\
         float x;\n\
         x = 5;\n\
         if(x>1){\n\
         printf(\"big\\n\");\n\
         }\n\
         return 0;\n\
         }\n"
    );
}

#[test]
fn countdown_loop_with_label_and_goto() {
    let source = "\
LET i = 3
WHILE i > 0 REPEAT
LET i = i - 1
ENDWHILE
LABEL done
GOTO done
";
    let artifact = Codegen::translate(source).unwrap();
    assert_eq!(
        artifact,
        "#include <stdio.h>\n\
         int main(void){\n\
         float i;\n\
         i = 3;\n\
         while(i>0){\n\
         i = i-1;\n\
         }\n\
         done:;\n\
         goto done;\n\
         return 0;\n\
         }\n"
    );
}

#[test]
fn input_emits_guarded_read() {
    let artifact = Codegen::translate("INPUT n\nPRINT n\n").unwrap();
    assert_eq!(
        artifact,
        "#include <stdio.h>\n\
         int main(void){\n\
         float n;\n\
         if(0 == scanf(\"%f\", &n)) {\n\
         n = 0;\n\
         scanf(\"%*s\");\n\
         }\n\
         printf(\"%.2f\\n\", (float)(n));\n\
         return 0;\n\
         }\n"
    );
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let source = "\n# a program\n\nLET total = 1 + 2 # inline note\nPRINT total\n";
    let artifact = Codegen::translate(source).unwrap();
    assert!(artifact.contains("total = 1+2;"));
    assert!(artifact.contains("printf(\"%.2f\\n\", (float)(total));"));
    assert!(!artifact.contains("a program"));
    assert!(!artifact.contains("inline note"));
}

#[test]
fn undeclared_variable_fails_without_artifact() {
    match Codegen::translate("PRINT y\n") {
        Err(CompileError::Semantic(message)) => assert!(message.contains('y')),
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

#[test]
fn goto_without_label_fails_only_after_full_stream() {
    // The same jump is fine once any later statement declares the label.
    assert!(Codegen::translate("GOTO end\nLABEL end\n").is_ok());
    match Codegen::translate("GOTO end\n") {
        Err(CompileError::Semantic(message)) => assert!(message.contains("end")),
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

#[test]
fn missing_final_line_break_is_a_syntax_error() {
    assert!(matches!(
        Codegen::translate("PRINT \"x\""),
        Err(CompileError::Syntax(_))
    ));
}

#[test]
fn lexical_failure_surfaces_from_the_pipeline() {
    assert!(matches!(
        Codegen::translate("LET x = 12.\n"),
        Err(CompileError::Lexical(_))
    ));
}
