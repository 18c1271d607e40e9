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

use thiserror::Error as ThisError;

/// Error when parsing PGN. Every variant carries the byte offset into the
/// input where parsing stopped.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(ThisError, Debug, Clone, Eq, PartialEq, Hash)]
pub enum Error {
    /// A character that does not start any token.
    #[error("unexpected character {unexpected:?} at offset {offset}")]
    Lex { offset: usize, unexpected: char },
    /// A malformed tag pair, like a missing `]` or an unterminated value.
    #[error("malformed tag pair at offset {offset}: {reason}")]
    Tag { offset: usize, reason: &'static str },
    /// A move token that does not have the shape of any SAN move.
    #[error("invalid move at offset {offset}: {reason}")]
    San { offset: usize, reason: &'static str },
    /// An unexpected token in the movetext.
    #[error("unexpected token at offset {offset}, expected {expected}")]
    Movetext {
        offset: usize,
        expected: &'static str,
    },
    /// A game without its terminating result.
    #[error("malformed game at offset {offset}: {reason}")]
    Game { offset: usize, reason: &'static str },
    /// Variations nested deeper than
    /// [`ParserConfig::max_variation_depth`](crate::ParserConfig::max_variation_depth).
    #[error("variation depth {depth} exceeds the limit at offset {offset}")]
    RecursionLimitExceeded { depth: usize, offset: usize },
}

impl Error {
    /// The byte offset into the input where the error was detected.
    pub const fn offset(&self) -> usize {
        match *self {
            Error::Lex { offset, .. }
            | Error::Tag { offset, .. }
            | Error::San { offset, .. }
            | Error::Movetext { offset, .. }
            | Error::Game { offset, .. }
            | Error::RecursionLimitExceeded { offset, .. } => offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::San {
            offset: 22,
            reason: "not a recognized move token",
        };
        assert_eq!(
            err.to_string(),
            "invalid move at offset 22: not a recognized move token"
        );
        assert_eq!(err.offset(), 22);

        let err = Error::Lex {
            offset: 3,
            unexpected: '@',
        };
        assert_eq!(err.to_string(), "unexpected character '@' at offset 3");
    }
}
