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

use arrayvec::ArrayVec;

use crate::{
    errors::Error,
    token::{Token, TokenKind, Tokenizer},
};

const LOOKAHEAD: usize = 2;

/// Token stream with a bounded lookahead for the recursive descent parsers.
#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    tokenizer: Tokenizer<'a>,
    lookahead: ArrayVec<Token<'a>, LOOKAHEAD>,
}

impl<'a> Cursor<'a> {
    pub fn new(tokenizer: Tokenizer<'a>) -> Cursor<'a> {
        Cursor {
            tokenizer,
            lookahead: ArrayVec::new(),
        }
    }

    fn fill(&mut self, n: usize) -> Result<(), Error> {
        debug_assert!(n < LOOKAHEAD);
        while self.lookahead.len() <= n {
            let token = self.tokenizer.next_token()?;
            self.lookahead.push(token);
        }
        Ok(())
    }

    pub fn peek(&mut self) -> Result<Token<'a>, Error> {
        self.peek_nth(0)
    }

    pub fn peek_nth(&mut self, n: usize) -> Result<Token<'a>, Error> {
        self.fill(n)?;
        Ok(self.lookahead[n])
    }

    pub fn bump(&mut self) -> Result<Token<'a>, Error> {
        self.fill(0)?;
        Ok(self.lookahead.remove(0))
    }

    /// Consumes the next token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> Result<Option<Token<'a>>, Error> {
        Ok(if self.peek()?.kind == kind {
            Some(self.bump()?)
        } else {
            None
        })
    }

    /// The offset of the next unconsumed token.
    pub fn offset(&self) -> usize {
        self.lookahead
            .first()
            .map_or_else(|| self.tokenizer.offset(), |token| token.offset)
    }

    pub fn input(&self) -> &'a str {
        self.tokenizer.input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookahead() -> Result<(), Error> {
        let mut cursor = Cursor::new(Tokenizer::new("12... Nf3"));
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.peek()?.kind, TokenKind::Number);
        assert_eq!(cursor.peek_nth(1)?.kind, TokenKind::Dot);
        assert_eq!(cursor.eat(TokenKind::Dot)?, None);
        assert_eq!(cursor.bump()?.lexeme, "12");
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.eat(TokenKind::Dot)?.map(|t| t.offset), Some(2));
        assert_eq!(cursor.bump()?.offset, 3);
        assert_eq!(cursor.bump()?.offset, 4);
        assert_eq!(cursor.bump()?.lexeme, "Nf3");
        assert_eq!(cursor.offset(), 9);
        assert_eq!(cursor.bump()?.kind, TokenKind::EndOfInput);
        assert_eq!(cursor.peek()?.kind, TokenKind::EndOfInput);
        Ok(())
    }

    #[test]
    fn test_lex_error_on_peek() {
        let mut cursor = Cursor::new(Tokenizer::new("e4 @"));
        assert!(cursor.bump().is_ok());
        assert!(matches!(cursor.peek(), Err(Error::Lex { offset: 3, .. })));
    }
}
