use std::ops::Range;

use winnow::{
    ascii::{alpha1, digit1},
    combinator::{alt, cut_err, opt, preceded},
    error::{StrContext, StrContextValue},
    token::{literal, take_while},
    Located, PResult, Parser,
};

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub content: String,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Newline,
    LiteralNumber,
    LiteralString,
    Identifier,
    KeywordPrint,
    KeywordIf,
    KeywordThen,
    KeywordEndif,
    KeywordWhile,
    KeywordRepeat,
    KeywordEndwhile,
    KeywordLet,
    KeywordLabel,
    KeywordGoto,
    KeywordInput,
    PunctPlusSign,
    PunctHyphenMinus,
    PunctAsterisk,
    PunctSolidus,
    PunctEqualsSign,
    PunctEqualsSignEqualsSign,
    PunctExclamationMarkEqualsSign,
    PunctLessThanSign,
    PunctLessThanSignEqualsSign,
    PunctGreaterThanSign,
    PunctGreaterThanSignEqualsSign,
}

impl TokenKind {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::PunctEqualsSignEqualsSign
                | TokenKind::PunctExclamationMarkEqualsSign
                | TokenKind::PunctLessThanSign
                | TokenKind::PunctLessThanSignEqualsSign
                | TokenKind::PunctGreaterThanSign
                | TokenKind::PunctGreaterThanSignEqualsSign
        )
    }
}

/// Classifies a whole letter-run. Reserved words are matched exactly, so
/// `PRINTER` stays an identifier.
pub fn keyword_kind(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "PRINT" => TokenKind::KeywordPrint,
        "IF" => TokenKind::KeywordIf,
        "THEN" => TokenKind::KeywordThen,
        "ENDIF" => TokenKind::KeywordEndif,
        "WHILE" => TokenKind::KeywordWhile,
        "REPEAT" => TokenKind::KeywordRepeat,
        "ENDWHILE" => TokenKind::KeywordEndwhile,
        "LET" => TokenKind::KeywordLet,
        "LABEL" => TokenKind::KeywordLabel,
        "GOTO" => TokenKind::KeywordGoto,
        "INPUT" => TokenKind::KeywordInput,
        _ => return None,
    };
    Some(kind)
}

fn token<T: Into<String>>(kind: TokenKind) -> impl Fn((T, Range<usize>)) -> Token {
    move |(content, span)| Token {
        kind,
        content: content.into(),
        span,
    }
}

pub fn lex_token(s: &mut Located<&str>) -> PResult<Token> {
    alt((lex_newline, lex_number, lex_word, lex_string, lex_punct)).parse_next(s)
}

fn lex_newline(s: &mut Located<&str>) -> PResult<Token> {
    literal("\n")
        .with_span()
        .map(token(TokenKind::Newline))
        .parse_next(s)
}

fn lex_number(s: &mut Located<&str>) -> PResult<Token> {
    (
        digit1,
        opt(preceded(
            '.',
            cut_err(digit1).context(StrContext::Expected(StrContextValue::Description(
                "digit after decimal point",
            ))),
        )),
    )
        .map(|(whole, frac): (&str, Option<&str>)| match frac {
            Some(frac) => format!("{whole}.{frac}"),
            None => whole.to_string(),
        })
        .with_span()
        .map(token(TokenKind::LiteralNumber))
        .parse_next(s)
}

fn lex_word(s: &mut Located<&str>) -> PResult<Token> {
    alpha1
        .with_span()
        .map(|(text, span): (&str, Range<usize>)| Token {
            kind: keyword_kind(text).unwrap_or(TokenKind::Identifier),
            content: text.into(),
            span,
        })
        .parse_next(s)
}

// Line breaks, tabs, backslashes, and percent signs are reserved inside
// string literals; they would leak into the printf format otherwise.
fn lex_string(s: &mut Located<&str>) -> PResult<Token> {
    preceded(
        '"',
        cut_err((
            take_while(0.., |c| !matches!(c, '"' | '\r' | '\n' | '\t' | '\\' | '%')),
            '"',
        ))
        .context(StrContext::Label("string literal")),
    )
    .map(|(text, _): (&str, char)| text)
    .with_span()
    .map(token(TokenKind::LiteralString))
    .parse_next(s)
}

fn lex_punct(s: &mut Located<&str>) -> PResult<Token> {
    alt((
        literal("==")
            .with_span()
            .map(token(TokenKind::PunctEqualsSignEqualsSign)),
        literal("<=")
            .with_span()
            .map(token(TokenKind::PunctLessThanSignEqualsSign)),
        literal(">=")
            .with_span()
            .map(token(TokenKind::PunctGreaterThanSignEqualsSign)),
        lex_not_eq,
        literal("=")
            .with_span()
            .map(token(TokenKind::PunctEqualsSign)),
        literal("<")
            .with_span()
            .map(token(TokenKind::PunctLessThanSign)),
        literal(">")
            .with_span()
            .map(token(TokenKind::PunctGreaterThanSign)),
        literal("+")
            .with_span()
            .map(token(TokenKind::PunctPlusSign)),
        literal("-")
            .with_span()
            .map(token(TokenKind::PunctHyphenMinus)),
        literal("*")
            .with_span()
            .map(token(TokenKind::PunctAsterisk)),
        literal("/")
            .with_span()
            .map(token(TokenKind::PunctSolidus)),
    ))
    .parse_next(s)
}

// A bare `!` is not a token of the language.
fn lex_not_eq(s: &mut Located<&str>) -> PResult<Token> {
    preceded(
        '!',
        cut_err('=').context(StrContext::Expected(StrContextValue::Description(
            "`=` after `!`",
        ))),
    )
    .with_span()
    .map(|(_, span)| Token {
        kind: TokenKind::PunctExclamationMarkEqualsSign,
        content: "!=".into(),
        span,
    })
    .parse_next(s)
}
