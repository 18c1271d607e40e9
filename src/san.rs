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

//! Classify move tokens in Standard Algebraic Notation.
//!
//! Only the shape of a move is checked. Whether it is legal, or whether a
//! disambiguation is actually needed, depends on a position and is out of
//! scope.
//!
//! # Examples
//!
//! ```
//! use pgn_tree::{File, Role, Square};
//! use pgn_tree::san::{Disambiguation, San, SanMove};
//!
//! let m: SanMove = "Nbd7".parse()?;
//! assert_eq!(m.san, San::Piece {
//!     role: Role::Knight,
//!     disambiguation: Disambiguation::File(File::B),
//!     to: "d7".parse().expect("valid square"),
//!     capture: false,
//! });
//! assert!(!m.is_check);
//! assert_eq!(m.to_string(), "Nbd7");
//! # Ok::<_, pgn_tree::san::InvalidSan>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    castling_side::CastlingSide,
    errors,
    role::Role,
    square::{File, Rank, Square},
    token::Token,
};

/// Error when a token does not have the shape of a SAN move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct InvalidSan {
    reason: &'static str,
}

impl InvalidSan {
    const UNRECOGNIZED: InvalidSan = InvalidSan::new("not a recognized move token");

    const fn new(reason: &'static str) -> InvalidSan {
        InvalidSan { reason }
    }

    pub const fn reason(&self) -> &'static str {
        self.reason
    }
}

impl fmt::Display for InvalidSan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid san: {}", self.reason)
    }
}

impl Error for InvalidSan {}

/// The origin hint of a piece move, like the `b` in `Nbd7`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Disambiguation {
    None,
    File(File),
    Rank(Rank),
    Square(Square),
}

impl Disambiguation {
    /// Classifies the characters between the piece letter and the
    /// destination (without capture marker). A single character is a file
    /// or a rank by its character class, regardless of position.
    fn from_ascii(s: &[u8]) -> Result<Disambiguation, InvalidSan> {
        match *s {
            [] => Ok(Disambiguation::None),
            [ch] => File::from_char(char::from(ch))
                .map(Disambiguation::File)
                .or_else(|| Rank::from_char(char::from(ch)).map(Disambiguation::Rank))
                .ok_or(InvalidSan::new("invalid disambiguation")),
            [_, _] => Square::from_ascii(s)
                .map(Disambiguation::Square)
                .map_err(|_| InvalidSan::new("invalid disambiguation")),
            _ => Err(InvalidSan::new("disambiguation too long")),
        }
    }
}

impl fmt::Display for Disambiguation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Disambiguation::None => Ok(()),
            Disambiguation::File(file) => write!(f, "{file}"),
            Disambiguation::Rank(rank) => write!(f, "{rank}"),
            Disambiguation::Square(square) => write!(f, "{square}"),
        }
    }
}

/// The shape of a move in Standard Algebraic Notation, without check and
/// checkmate markers.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum San {
    /// `e4`, `exd5` or `e8=Q`. `from_file` is set exactly for captures.
    Pawn {
        from_file: Option<File>,
        to: Square,
        capture: bool,
        promotion: Option<Role>,
    },
    /// `Nf3`, `Nbd7`, `R1e2`, `Qh4xe1`.
    Piece {
        role: Role,
        disambiguation: Disambiguation,
        to: Square,
        capture: bool,
    },
    /// `O-O` or `O-O-O`.
    Castle(CastlingSide),
    /// A null move placeholder, written `..`, `--` or `Z0`.
    Null,
}

impl San {
    /// Classifies a move token without check and checkmate markers.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSan`] if the token has none of the move shapes.
    pub fn from_ascii(san: &[u8]) -> Result<San, InvalidSan> {
        match san {
            b"O-O-O" | b"0-0-0" => Ok(San::Castle(CastlingSide::QueenSide)),
            b"O-O" | b"0-0" => Ok(San::Castle(CastlingSide::KingSide)),
            b".." | b"--" | b"Z0" => Ok(San::Null),
            [] => Err(InvalidSan::new("empty move token")),
            [piece, rest @ ..] => match Role::from_char(char::from(*piece)) {
                Some(role) => San::piece_from_ascii(role, rest),
                None => San::pawn_from_ascii(san),
            },
        }
    }

    // Parsed right to left: destination square, optional capture marker,
    // then whatever is left is disambiguation.
    fn piece_from_ascii(role: Role, rest: &[u8]) -> Result<San, InvalidSan> {
        let Some(split) = rest.len().checked_sub(2) else {
            return Err(InvalidSan::new("missing destination square"));
        };
        let (prefix, to) = rest.split_at(split);
        let to = Square::from_ascii(to).map_err(|_| InvalidSan::new("invalid destination square"))?;

        let (prefix, capture) = match prefix.split_last() {
            Some((b'x', prefix)) => (prefix, true),
            _ => (prefix, false),
        };

        Ok(San::Piece {
            role,
            disambiguation: Disambiguation::from_ascii(prefix)?,
            to,
            capture,
        })
    }

    fn pawn_from_ascii(san: &[u8]) -> Result<San, InvalidSan> {
        let (body, promotion) = match *san {
            [ref body @ .., b'=', role] => (
                body,
                Some(
                    Role::promotion_from_char(char::from(role))
                        .ok_or(InvalidSan::new("invalid promotion"))?,
                ),
            ),
            _ => (san, None),
        };

        match *body {
            [_, _] => Ok(San::Pawn {
                from_file: None,
                to: Square::from_ascii(body).map_err(|_| InvalidSan::UNRECOGNIZED)?,
                capture: false,
                promotion,
            }),
            [from, b'x', _, _] => Ok(San::Pawn {
                from_file: Some(File::from_char(char::from(from)).ok_or(InvalidSan::UNRECOGNIZED)?),
                to: Square::from_ascii(&body[2..]).map_err(|_| InvalidSan::UNRECOGNIZED)?,
                capture: true,
                promotion,
            }),
            _ => Err(InvalidSan::UNRECOGNIZED),
        }
    }

    pub const fn is_capture(&self) -> bool {
        matches!(
            *self,
            San::Pawn { capture: true, .. } | San::Piece { capture: true, .. }
        )
    }

    /// The destination square, if the move has one.
    pub const fn to(&self) -> Option<Square> {
        match *self {
            San::Pawn { to, .. } | San::Piece { to, .. } => Some(to),
            San::Castle(_) | San::Null => None,
        }
    }
}

impl FromStr for San {
    type Err = InvalidSan;

    fn from_str(san: &str) -> Result<San, InvalidSan> {
        San::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Pawn {
                from_file,
                to,
                capture,
                promotion,
            } => {
                if let Some(file) = from_file {
                    write!(f, "{file}")?;
                }
                if capture {
                    f.write_str("x")?;
                }
                write!(f, "{to}")?;
                if let Some(role) = promotion {
                    write!(f, "={}", role.char())?;
                }
                Ok(())
            }
            San::Piece {
                role,
                disambiguation,
                to,
                capture,
            } => {
                write!(f, "{}{}", role.char(), disambiguation)?;
                if capture {
                    f.write_str("x")?;
                }
                write!(f, "{to}")
            }
            San::Castle(side) => f.write_str(side.as_str()),
            San::Null => f.write_str("--"),
        }
    }
}

/// A [`San`] with check and checkmate markers.
///
/// The markers are recorded independently as written. A well-formed token
/// carries at most one of them, but nothing is cross-validated.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct SanMove {
    pub san: San,
    pub is_check: bool,
    pub is_mate: bool,
}

impl SanMove {
    /// A null move without markers.
    pub const NULL: SanMove = SanMove {
        san: San::Null,
        is_check: false,
        is_mate: false,
    };

    /// Classifies a move token, including trailing `+` and `#` markers.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSan`] if the token is not syntactically valid.
    pub fn from_ascii(ascii: &[u8]) -> Result<SanMove, InvalidSan> {
        let mut san = ascii;
        let mut is_check = false;
        let mut is_mate = false;
        loop {
            match san.split_last() {
                Some((b'+', rest)) => {
                    is_check = true;
                    san = rest;
                }
                Some((b'#', rest)) => {
                    is_mate = true;
                    san = rest;
                }
                _ => break,
            }
        }

        Ok(SanMove {
            san: San::from_ascii(san)?,
            is_check,
            is_mate,
        })
    }
}

impl FromStr for SanMove {
    type Err = InvalidSan;

    fn from_str(san: &str) -> Result<SanMove, InvalidSan> {
        SanMove::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for SanMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.san)?;
        if self.is_check {
            f.write_str("+")?;
        }
        if self.is_mate {
            f.write_str("#")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SanMove {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use std::fmt::Write as _;

        // Longest shapes with both markers: Qa1xh8+# and exd8=Q+#
        let mut s = arrayvec::ArrayString::<8>::new();
        let _ = write!(s, "{self}");
        serializer.serialize_str(&s)
    }
}

/// Classifies a [`Token`] as a SAN move, reporting failures at the token's
/// offset.
///
/// # Errors
///
/// Returns [`errors::Error::San`] if the lexeme is not a valid move token.
pub fn classify(token: &Token<'_>) -> Result<SanMove, errors::Error> {
    SanMove::from_ascii(token.lexeme.as_bytes()).map_err(|err| errors::Error::San {
        offset: token.offset,
        reason: err.reason(),
    })
}
