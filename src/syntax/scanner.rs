use tracing::trace;
use winnow::{
    error::{ContextError, ErrMode},
    stream::{Location, Stream},
    token::take_while,
    Located, PResult, Parser,
};

use crate::error::{CompileError, CompileResult};

use super::token::{lex_token, Token, TokenKind};

/// Pull-based tokenizer over in-memory source text.
///
/// Each `next_token` call lazily produces the next token; the sequence ends
/// with `Eof`, which repeats on further calls so the grammar engine can stop
/// on it without a special case.
pub struct Scanner<'s> {
    source: &'s str,
    input: Located<&'s str>,
}

impl<'s> Scanner<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            input: Located::new(source),
        }
    }

    pub fn next_token(&mut self) -> CompileResult<Token> {
        self.skip_trivia();
        let at = self.input.location();
        if self.input.eof_offset() == 0 {
            return Ok(Token {
                kind: TokenKind::Eof,
                content: String::new(),
                span: at..at,
            });
        }
        let token = lex_token
            .parse_next(&mut self.input)
            .map_err(|err| self.lexical_error(err))?;
        trace!(kind = ?token.kind, content = %token.content, "token");
        Ok(token)
    }

    // Space, tab, and carriage return separate tokens; `#` comments run to
    // the end of the line without consuming the line break itself.
    fn skip_trivia(&mut self) {
        loop {
            let _: PResult<&str> =
                take_while(0.., (' ', '\t', '\r')).parse_next(&mut self.input);
            let hash: PResult<char> = '#'.parse_next(&mut self.input);
            if hash.is_ok() {
                let _: PResult<&str> =
                    take_while(0.., |c: char| c != '\n').parse_next(&mut self.input);
                continue;
            }
            break;
        }
    }

    fn lexical_error(&self, err: ErrMode<ContextError>) -> CompileError {
        let at = self.input.location();
        let found = match self.source[at..].chars().next() {
            Some(c) => format!("{c:?}"),
            None => "end of input".to_string(),
        };
        let context = match err {
            ErrMode::Backtrack(inner) | ErrMode::Cut(inner) => inner
                .context()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            ErrMode::Incomplete(_) => String::new(),
        };
        if context.is_empty() {
            CompileError::Lexical(format!("unknown token {found} at byte {at}"))
        } else {
            CompileError::Lexical(format!("{context} at byte {at}, found {found}"))
        }
    }
}
