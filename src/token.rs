// This file is part of the pgn-tree library.
// Copyright (C) 2017-2024 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Split PGN text into lexical tokens.
//!
//! The [`Tokenizer`] is lazy: it scans only as far as the parser asks, and
//! can be restarted at any offset it previously reported.
//!
//! # Examples
//!
//! ```
//! use pgn_tree::token::{TokenKind, Tokenizer};
//!
//! let kinds = Tokenizer::new("1. e4 $1 *")
//!     .map(|token| token.map(|t| t.kind))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(kinds, [
//!     TokenKind::Number,
//!     TokenKind::Dot,
//!     TokenKind::Word,
//!     TokenKind::Dollar,
//!     TokenKind::Number,
//!     TokenKind::Asterisk,
//!     TokenKind::EndOfInput,
//! ]);
//! # Ok::<_, pgn_tree::Error>(())
//! ```

use std::iter::FusedIterator;

use crate::errors::Error;

/// The lexical class of a [`Token`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum TokenKind {
    /// A run of ASCII digits, like a move number.
    Number,
    /// A single `.`.
    Dot,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`. Always followed by [`TokenKind::CommentText`].
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// A double quoted string including its quotes.
    QuotedString,
    /// A bare word, like a SAN move, a tag name or `1-0`.
    Word,
    /// `$`, introducing a numeric annotation glyph.
    Dollar,
    /// `*`
    Asterisk,
    /// A run of `!` and `?`, like `!?`.
    Glyph,
    /// The raw body of a `{ comment }`, possibly empty.
    CommentText,
    /// A `;` comment up to the end of the line, including the `;`.
    LineComment,
    /// The end of the input. Produced exactly once by the iterator.
    EndOfInput,
}

/// A token with its raw lexeme and byte offset.
///
/// The lexeme is always the exact input slice at the offset:
/// `&input[token.offset..token.end()] == token.lexeme`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// The byte offset just after the lexeme.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.lexeme.len()
    }

    /// The raw contents of a [`TokenKind::QuotedString`], without quotes.
    /// Other tokens are returned unchanged.
    pub fn unquoted(&self) -> &'a str {
        match self.kind {
            TokenKind::QuotedString => self
                .lexeme
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(self.lexeme),
            _ => self.lexeme,
        }
    }
}

/// Scans PGN text into [`Token`]s.
///
/// Whitespace, a leading byte order mark and `%` escape lines are skipped
/// and never produced.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    in_comment: bool,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Tokenizer<'a> {
        let mut tokenizer = Tokenizer::at(input, 0);
        if input.starts_with('\u{feff}') {
            tokenizer.pos = '\u{feff}'.len_utf8();
        }
        tokenizer
    }

    /// Restarts scanning at a byte offset, usually one previously reported
    /// by [`Tokenizer::offset()`] or [`Token::offset`]. Offsets inside a
    /// multi-byte character are moved forward to the next character.
    pub fn at(input: &'a str, offset: usize) -> Tokenizer<'a> {
        let mut pos = offset.min(input.len());
        while !input.is_char_boundary(pos) {
            pos += 1;
        }
        Tokenizer {
            input,
            pos,
            in_comment: false,
            done: false,
        }
    }

    /// The byte offset where the next token scan starts.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn token(&mut self, kind: TokenKind, start: usize, end: usize) -> Token<'a> {
        self.pos = end;
        Token {
            kind,
            lexeme: &self.input[start..end],
            offset: start,
        }
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.bytes();
        while let Some(&ch) = bytes.get(self.pos) {
            match ch {
                b' ' | b'\t' | b'\r' | b'\n' | b'\x0c' => self.pos += 1,
                b'%' if self.pos == 0 || bytes[self.pos - 1] == b'\n' => {
                    self.pos = memchr::memchr(b'\n', &bytes[self.pos..])
                        .map_or(bytes.len(), |eol| self.pos + eol + 1);
                }
                _ => break,
            }
        }
    }

    fn scan_while(&self, start: usize, pred: impl Fn(u8) -> bool) -> usize {
        let bytes = self.bytes();
        start
            + bytes[start..]
                .iter()
                .position(|&ch| !pred(ch))
                .unwrap_or(bytes.len() - start)
    }

    fn quoted_string(&mut self, start: usize) -> Result<Token<'a>, Error> {
        let bytes = self.bytes();
        let mut pos = start + 1;
        loop {
            match memchr::memchr3(b'"', b'\\', b'\n', &bytes[pos..]) {
                Some(delta) if bytes[pos + delta] == b'"' => {
                    return Ok(self.token(TokenKind::QuotedString, start, pos + delta + 1));
                }
                Some(delta) if bytes[pos + delta] == b'\\' => {
                    // Skip escaped character.
                    pos = (pos + delta + 2).min(bytes.len());
                }
                _ => {
                    return Err(Error::Tag {
                        offset: start,
                        reason: "unterminated tag value",
                    });
                }
            }
        }
    }

    /// Scans the next token. Returns [`TokenKind::EndOfInput`] (repeatedly)
    /// once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Errors with [`Error::Lex`] on a character that starts no token, and
    /// with [`Error::Tag`] on a quoted string without closing quote.
    pub fn next_token(&mut self) -> Result<Token<'a>, Error> {
        let bytes = self.bytes();

        if self.in_comment {
            self.in_comment = false;
            let start = self.pos;
            let end = memchr::memchr(b'}', &bytes[start..]).map_or(bytes.len(), |i| start + i);
            return Ok(self.token(TokenKind::CommentText, start, end));
        }

        self.skip_whitespace();

        let start = self.pos;
        let Some(&ch) = bytes.get(start) else {
            return Ok(self.token(TokenKind::EndOfInput, start, start));
        };

        Ok(match ch {
            b'[' => self.token(TokenKind::LBracket, start, start + 1),
            b']' => self.token(TokenKind::RBracket, start, start + 1),
            b'{' => {
                self.in_comment = true;
                self.token(TokenKind::LBrace, start, start + 1)
            }
            b'}' => self.token(TokenKind::RBrace, start, start + 1),
            b'(' => self.token(TokenKind::LParen, start, start + 1),
            b')' => self.token(TokenKind::RParen, start, start + 1),
            b'$' => self.token(TokenKind::Dollar, start, start + 1),
            b'*' => self.token(TokenKind::Asterisk, start, start + 1),
            b'.' => self.token(TokenKind::Dot, start, start + 1),
            b'"' => return self.quoted_string(start),
            b';' => {
                let end = memchr::memchr(b'\n', &bytes[start..]).map_or(bytes.len(), |i| start + i);
                self.token(TokenKind::LineComment, start, end)
            }
            b'!' | b'?' => {
                let end = self.scan_while(start, |ch| ch == b'!' || ch == b'?');
                self.token(TokenKind::Glyph, start, end)
            }
            ch if is_word_start(ch) => {
                let end = self.scan_while(start, is_word_char);
                let kind = if bytes[start..end].iter().all(u8::is_ascii_digit) {
                    TokenKind::Number
                } else {
                    TokenKind::Word
                };
                self.token(kind, start, end)
            }
            _ => {
                return Err(Error::Lex {
                    offset: start,
                    unexpected: self.input[start..].chars().next().unwrap_or('\u{fffd}'),
                });
            }
        })
    }
}

fn is_word_start(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'-'
}

fn is_word_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, b'_' | b'+' | b'#' | b'=' | b'/' | b':' | b'-')
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        self.done = !matches!(token, Ok(Token { kind, .. }) if kind != TokenKind::EndOfInput);
        Some(token)
    }
}

impl FusedIterator for Tokenizer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Tokenizer::new(input)
            .map(|token| token.expect("valid token").kind)
            .collect()
    }

    fn lexemes(input: &str) -> Vec<&str> {
        Tokenizer::new(input)
            .map(|token| token.expect("valid token").lexeme)
            .collect()
    }

    #[test]
    fn test_tag_pair() {
        use TokenKind::*;
        assert_eq!(
            kinds("[White \"Fischer, Robert J.\"]"),
            [LBracket, Word, QuotedString, RBracket, EndOfInput]
        );
        assert_eq!(
            lexemes("[White \"Fischer, Robert J.\"]"),
            ["[", "White", "\"Fischer, Robert J.\"", "]", ""]
        );
    }

    #[test]
    fn test_movetext() {
        use TokenKind::*;
        assert_eq!(
            kinds("1. e4 {best by test} e5!? $14 (1... c5) 1/2-1/2"),
            [
                Number, Dot, Word, LBrace, CommentText, RBrace, Word, Glyph, Dollar, Number,
                LParen, Number, Dot, Dot, Dot, Word, RParen, Word, EndOfInput
            ]
        );
        assert_eq!(
            lexemes("12...Nxe4+ 0-1"),
            ["12", ".", ".", ".", "Nxe4+", "0-1", ""]
        );
    }

    #[test]
    fn test_offsets() {
        let input = "  1.e4\n{ hi }";
        for token in Tokenizer::new(input) {
            let token = token.expect("valid token");
            assert_eq!(&input[token.offset..token.end()], token.lexeme);
        }
        let tokens: Vec<_> = Tokenizer::new(input).map(|t| t.expect("valid token")).collect();
        assert_eq!(tokens[0].offset, 2);
        assert_eq!(tokens[2].offset, 4);
        assert_eq!(tokens[4].lexeme, " hi ");
    }

    #[test]
    fn test_comment_body_is_raw() {
        use TokenKind::*;
        assert_eq!(kinds("{ @#ä] ( }"), [LBrace, CommentText, RBrace, EndOfInput]);
        assert_eq!(kinds("{}"), [LBrace, CommentText, RBrace, EndOfInput]);
        assert_eq!(kinds("{ unterminated"), [LBrace, CommentText, EndOfInput]);
    }

    #[test]
    fn test_skipped() {
        use TokenKind::*;
        assert_eq!(kinds("\u{feff}*"), [Asterisk, EndOfInput]);
        assert_eq!(kinds("% escaped line ]]\n*"), [Asterisk, EndOfInput]);
        assert_eq!(kinds("*\n%escape\n*"), [Asterisk, Asterisk, EndOfInput]);
        assert_eq!(kinds("e4 ; rest of line\n*"), [Word, LineComment, Asterisk, EndOfInput]);
        assert_eq!(kinds(" \t\r\n"), [EndOfInput]);
    }

    #[test]
    fn test_quoted_string_escapes() {
        let mut tokenizer = Tokenizer::new(r#""a \"quoted\" name\\""#);
        let token = tokenizer.next_token().expect("valid token");
        assert_eq!(token.kind, TokenKind::QuotedString);
        assert_eq!(token.unquoted(), r#"a \"quoted\" name\\"#);
    }

    #[test]
    fn test_unterminated_quoted_string() {
        let mut tokenizer = Tokenizer::new("[Event \"open\n]");
        tokenizer.next_token().expect("bracket");
        tokenizer.next_token().expect("name");
        assert_eq!(
            tokenizer.next_token(),
            Err(Error::Tag {
                offset: 7,
                reason: "unterminated tag value"
            })
        );
    }

    #[test]
    fn test_lex_error() {
        let results: Vec<_> = Tokenizer::new("e4 @").collect();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[1],
            Err(Error::Lex {
                offset: 3,
                unexpected: '@'
            })
        );

        assert_eq!(
            Tokenizer::new("é").next_token(),
            Err(Error::Lex {
                offset: 0,
                unexpected: 'é'
            })
        );
    }

    #[test]
    fn test_restart() {
        let input = "1. e4 e5 *";
        let mut tokenizer = Tokenizer::new(input);
        tokenizer.next_token().expect("number");
        tokenizer.next_token().expect("dot");
        let saved = tokenizer.offset();
        let rest: Vec<_> = tokenizer.map(|t| t.expect("valid token")).collect();
        let restarted: Vec<_> = Tokenizer::at(input, saved)
            .map(|t| t.expect("valid token"))
            .collect();
        assert_eq!(rest, restarted);
        assert_eq!(Tokenizer::at(input, 100).next_token().map(|t| t.kind), Ok(TokenKind::EndOfInput));
    }

    #[test]
    fn test_end_of_input_once() {
        let mut tokenizer = Tokenizer::new("*");
        assert!(tokenizer.next().is_some());
        assert!(tokenizer.next().is_some());
        assert!(tokenizer.next().is_none());
        assert!(tokenizer.next().is_none());
    }
}
