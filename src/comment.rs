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

use std::fmt;

use crate::{cursor::Cursor, errors::Error, token::TokenKind};

/// A comment attached to the movetext.
///
/// Holds the raw text between `{` and `}`, or after `;` up to the end of
/// the line. Adjacent comments that land in the same place are joined with
/// a single space.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Comment(pub String);

impl Comment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The comment with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }

    fn push(&mut self, text: &str) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        self.0.push_str(text);
    }

    fn merge(slot: Option<Comment>, text: &str) -> Comment {
        let mut comment = slot.unwrap_or_default();
        comment.push(text);
        comment
    }

    /// Joins `other` onto the comment in `slot`, or fills an empty slot.
    pub(crate) fn append(slot: &mut Option<Comment>, other: Comment) {
        *slot = Some(match slot.take() {
            Some(comment) => Comment::merge(Some(comment), &other.0),
            None => other,
        });
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Comment {
    fn from(text: &str) -> Comment {
        Comment(text.to_owned())
    }
}

/// Reads one comment, if the next token starts one.
fn parse_comment<'a>(cursor: &mut Cursor<'a>) -> Result<Option<&'a str>, Error> {
    let token = cursor.peek()?;
    match token.kind {
        TokenKind::LineComment => {
            cursor.bump()?;
            let text = token.lexeme.strip_prefix(';').unwrap_or(token.lexeme);
            Ok(Some(text.strip_suffix('\r').unwrap_or(text)))
        }
        TokenKind::LBrace => {
            cursor.bump()?;
            let body = cursor.bump()?;
            debug_assert_eq!(body.kind, TokenKind::CommentText);
            if cursor.eat(TokenKind::RBrace)?.is_none() {
                return Err(Error::Movetext {
                    offset: token.offset,
                    expected: "'}' to close comment",
                });
            }
            Ok(Some(body.lexeme))
        }
        _ => Ok(None),
    }
}

/// Reads a run of adjacent comments into one.
pub(crate) fn parse_comments(cursor: &mut Cursor<'_>) -> Result<Option<Comment>, Error> {
    let mut merged = None;
    while let Some(text) = parse_comment(cursor)? {
        merged = Some(Comment::merge(merged, text));
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Tokenizer;

    #[test]
    fn test_brace_comment_is_raw() -> Result<(), Error> {
        let mut cursor = Cursor::new(Tokenizer::new("{ keeps  spacing; and (parens) } e4"));
        assert_eq!(
            parse_comments(&mut cursor)?,
            Some(Comment::from(" keeps  spacing; and (parens) "))
        );
        assert_eq!(cursor.peek()?.lexeme, "e4");
        Ok(())
    }

    #[test]
    fn test_merge() -> Result<(), Error> {
        let mut cursor = Cursor::new(Tokenizer::new("{a} ; line\r\n{} {b} e4"));
        let comment = parse_comments(&mut cursor)?.expect("comment");
        assert_eq!(comment.as_str(), "a  line  b");
        assert_eq!(cursor.peek()?.lexeme, "e4");
        Ok(())
    }

    #[test]
    fn test_unterminated() {
        let mut cursor = Cursor::new(Tokenizer::new("e4 {never closed"));
        assert!(cursor.bump().is_ok());
        assert_eq!(
            parse_comments(&mut cursor),
            Err(Error::Movetext {
                offset: 3,
                expected: "'}' to close comment",
            })
        );
    }

    #[test]
    fn test_no_comment() -> Result<(), Error> {
        let mut cursor = Cursor::new(Tokenizer::new("e4"));
        assert_eq!(parse_comments(&mut cursor)?, None);
        Ok(())
    }
}
