//! Recursive-descent translation of the source grammar straight into C.
//!
//! ```text
//! program    ::= {statement}
//! statement  ::= "PRINT" (expression | string) nl
//!              | "IF" comparison "THEN" nl {statement} "ENDIF" nl
//!              | "WHILE" comparison "REPEAT" nl {statement} "ENDWHILE" nl
//!              | "LET" ident "=" expression nl
//!              | "LABEL" ident nl
//!              | "GOTO" ident nl
//!              | "INPUT" ident nl
//! comparison ::= expression (("==" | "!=" | ">" | ">=" | "<" | "<=") expression)+
//! expression ::= term {("-" | "+") term}
//! term       ::= unary {("/" | "*") unary}
//! unary      ::= ["+" | "-"] primary
//! primary    ::= number | ident
//! nl         ::= "\n"+
//! ```
//!
//! Each production both checks structure and emits its fragment of the
//! output, so nesting in the generated C is balanced by the call structure
//! itself and no syntax tree is ever built. A comparison needs at least one
//! operator: the language has no boolean expressions, so a bare expression
//! can never stand where a condition is expected.

use std::collections::HashSet;
use std::mem;

use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::syntax::{Scanner, Token, TokenKind};

use super::emit::Emitter;

pub struct Codegen<'s> {
    scanner: Scanner<'s>,
    current: Token,
    peek: Token,
    symbols: HashSet<String>,
    labels_declared: HashSet<String>,
    labels_gotoed: HashSet<String>,
    emitter: Emitter,
}

impl<'s> Codegen<'s> {
    /// Runs the whole pipeline over `source` and returns the C artifact.
    pub fn translate(source: &'s str) -> CompileResult<String> {
        let mut scanner = Scanner::new(source);
        let current = scanner.next_token()?;
        let peek = scanner.next_token()?;
        let mut codegen = Codegen {
            scanner,
            current,
            peek,
            symbols: HashSet::new(),
            labels_declared: HashSet::new(),
            labels_gotoed: HashSet::new(),
            emitter: Emitter::new(),
        };
        codegen.program()?;
        Ok(codegen.emitter.finish())
    }

    fn advance(&mut self) -> CompileResult<()> {
        self.current = mem::replace(&mut self.peek, self.scanner.next_token()?);
        Ok(())
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if !self.check(kind) {
            return Err(CompileError::Syntax(format!(
                "expected {kind:?}, got {:?} ({:?})",
                self.current.content, self.current.kind
            )));
        }
        let token = self.current.clone();
        self.advance()?;
        Ok(token)
    }

    // Adds `name` to the symbol set on first sight and emits its
    // declaration into the header, ahead of every statement.
    fn declare(&mut self, name: &str) {
        if self.symbols.insert(name.to_string()) {
            debug!(variable = name, "first use, declaring");
            self.emitter.header_line(&format!("float {name};"));
        }
    }

    fn program(&mut self) -> CompileResult<()> {
        self.emitter.header_line("#include <stdio.h>");
        self.emitter.header_line("int main(void){");

        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        while !self.check(TokenKind::Eof) {
            self.statement()?;
        }

        self.emitter.emit_line("return 0;");
        self.emitter.emit_line("}");

        // Forward jumps are legal, so this is the earliest point at which
        // unresolved labels can be detected. Sorted for a stable message.
        let mut unresolved: Vec<&str> = self
            .labels_gotoed
            .difference(&self.labels_declared)
            .map(String::as_str)
            .collect();
        if !unresolved.is_empty() {
            unresolved.sort_unstable();
            return Err(CompileError::Semantic(format!(
                "GOTO to undeclared label: {}",
                unresolved.join(", ")
            )));
        }
        debug!(
            variables = self.symbols.len(),
            labels = self.labels_declared.len(),
            "translation finished"
        );
        Ok(())
    }

    fn statement(&mut self) -> CompileResult<()> {
        match self.current.kind {
            TokenKind::KeywordPrint => {
                self.advance()?;
                if self.check(TokenKind::LiteralString) {
                    self.emitter
                        .emit_line(&format!("printf(\"{}\\n\");", self.current.content));
                    self.advance()?;
                } else {
                    self.emitter.emit("printf(\"%.2f\\n\", (float)(");
                    self.expression()?;
                    self.emitter.emit_line("));");
                }
            }
            TokenKind::KeywordIf => {
                self.advance()?;
                self.emitter.emit("if(");
                self.comparison()?;
                self.expect(TokenKind::KeywordThen)?;
                self.newline()?;
                self.emitter.emit_line("){");
                while !self.check(TokenKind::KeywordEndif) {
                    self.statement()?;
                }
                self.expect(TokenKind::KeywordEndif)?;
                self.emitter.emit_line("}");
            }
            TokenKind::KeywordWhile => {
                self.advance()?;
                self.emitter.emit("while(");
                self.comparison()?;
                self.expect(TokenKind::KeywordRepeat)?;
                self.newline()?;
                self.emitter.emit_line("){");
                while !self.check(TokenKind::KeywordEndwhile) {
                    self.statement()?;
                }
                self.expect(TokenKind::KeywordEndwhile)?;
                self.emitter.emit_line("}");
            }
            TokenKind::KeywordLet => {
                self.advance()?;
                let target = self.expect(TokenKind::Identifier)?;
                self.declare(&target.content);
                self.emitter.emit(&format!("{} = ", target.content));
                self.expect(TokenKind::PunctEqualsSign)?;
                self.expression()?;
                self.emitter.emit_line(";");
            }
            TokenKind::KeywordLabel => {
                self.advance()?;
                let label = self.expect(TokenKind::Identifier)?;
                if !self.labels_declared.insert(label.content.clone()) {
                    return Err(CompileError::Semantic(format!(
                        "label already declared: {}",
                        label.content
                    )));
                }
                self.emitter.emit_line(&format!("{}:;", label.content));
            }
            TokenKind::KeywordGoto => {
                self.advance()?;
                let label = self.expect(TokenKind::Identifier)?;
                self.labels_gotoed.insert(label.content.clone());
                self.emitter.emit_line(&format!("goto {};", label.content));
            }
            TokenKind::KeywordInput => {
                self.advance()?;
                let target = self.expect(TokenKind::Identifier)?;
                self.declare(&target.content);
                // A failed read leaves the variable at zero and flushes the
                // pending input word.
                self.emitter
                    .emit_line(&format!("if(0 == scanf(\"%f\", &{})) {{", target.content));
                self.emitter.emit_line(&format!("{} = 0;", target.content));
                self.emitter.emit_line("scanf(\"%*s\");");
                self.emitter.emit_line("}");
            }
            _ => {
                return Err(CompileError::Syntax(format!(
                    "invalid statement at {:?} ({:?})",
                    self.current.content, self.current.kind
                )));
            }
        }
        self.newline()
    }

    fn comparison(&mut self) -> CompileResult<()> {
        self.expression()?;
        if !self.current.kind.is_comparison() {
            return Err(CompileError::Syntax(format!(
                "expected comparison operator, got {:?}",
                self.current.content
            )));
        }
        while self.current.kind.is_comparison() {
            self.emitter.emit(&self.current.content);
            self.advance()?;
            self.expression()?;
        }
        Ok(())
    }

    fn expression(&mut self) -> CompileResult<()> {
        self.term()?;
        while matches!(
            self.current.kind,
            TokenKind::PunctPlusSign | TokenKind::PunctHyphenMinus
        ) {
            self.emitter.emit(&self.current.content);
            self.advance()?;
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> CompileResult<()> {
        self.unary()?;
        while matches!(
            self.current.kind,
            TokenKind::PunctAsterisk | TokenKind::PunctSolidus
        ) {
            self.emitter.emit(&self.current.content);
            self.advance()?;
            self.unary()?;
        }
        Ok(())
    }

    fn unary(&mut self) -> CompileResult<()> {
        if matches!(
            self.current.kind,
            TokenKind::PunctPlusSign | TokenKind::PunctHyphenMinus
        ) {
            self.emitter.emit(&self.current.content);
            self.advance()?;
        }
        self.primary()
    }

    fn primary(&mut self) -> CompileResult<()> {
        match self.current.kind {
            TokenKind::LiteralNumber => {
                self.emitter.emit(&self.current.content);
                self.advance()
            }
            TokenKind::Identifier => {
                if !self.symbols.contains(&self.current.content) {
                    return Err(CompileError::Semantic(format!(
                        "variable referenced before assignment: {}",
                        self.current.content
                    )));
                }
                self.emitter.emit(&self.current.content);
                self.advance()
            }
            _ => Err(CompileError::Syntax(format!(
                "unexpected token at {:?} ({:?})",
                self.current.content, self.current.kind
            ))),
        }
    }

    fn newline(&mut self) -> CompileResult<()> {
        self.expect(TokenKind::Newline)?;
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        Ok(())
    }
}
