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

use std::{error::Error, fmt, str::FromStr};

/// A file of the chessboard, `a` to `h`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum File {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    /// Gets the file from its lowercase letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_tree::File;
    ///
    /// assert_eq!(File::from_char('d'), Some(File::D));
    /// assert_eq!(File::from_char('D'), None);
    /// ```
    pub const fn from_char(ch: char) -> Option<File> {
        Some(match ch {
            'a' => File::A,
            'b' => File::B,
            'c' => File::C,
            'd' => File::D,
            'e' => File::E,
            'f' => File::F,
            'g' => File::G,
            'h' => File::H,
            _ => return None,
        })
    }

    pub const fn char(self) -> char {
        (b'a' + self as u8) as char
    }

    /// `A` to `H`, in this order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A rank of the chessboard, `1` to `8`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Rank {
    First = 0,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    /// Gets the rank from its digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_tree::Rank;
    ///
    /// assert_eq!(Rank::from_char('7'), Some(Rank::Seventh));
    /// assert_eq!(Rank::from_char('9'), None);
    /// ```
    pub const fn from_char(ch: char) -> Option<Rank> {
        Some(match ch {
            '1' => Rank::First,
            '2' => Rank::Second,
            '3' => Rank::Third,
            '4' => Rank::Fourth,
            '5' => Rank::Fifth,
            '6' => Rank::Sixth,
            '7' => Rank::Seventh,
            '8' => Rank::Eighth,
            _ => return None,
        })
    }

    pub const fn char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// `First` to `Eighth`, in this order.
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// A square of the chessboard, as written in SAN: file then rank.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square { file, rank }
    }

    /// Parses a square name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if the input is not exactly a lowercase
    /// file followed by a rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_tree::{File, Rank, Square};
    ///
    /// let sq = Square::from_ascii(b"d7")?;
    /// assert_eq!(sq.file(), File::D);
    /// assert_eq!(sq.rank(), Rank::Seventh);
    /// # Ok::<_, pgn_tree::ParseSquareError>(())
    /// ```
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match *s {
            [file, rank] => Ok(Square::from_coords(
                File::from_char(char::from(file)).ok_or(ParseSquareError)?,
                Rank::from_char(char::from(rank)).ok_or(ParseSquareError)?,
            )),
            _ => Err(ParseSquareError),
        }
    }

    #[inline]
    pub const fn file(self) -> File {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// The square as a `(file, rank)` pair of characters, like `('e', '4')`.
    pub const fn chars(self) -> (char, char) {
        (self.file.char(), self.rank.char())
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string().to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        for file in File::ALL {
            for rank in Rank::ALL {
                let name = format!("{}{}", file.char(), rank.char());
                let square: Square = name.parse().expect("valid square");
                assert_eq!(square.file(), file);
                assert_eq!(square.rank(), rank);
                assert_eq!(square.to_string(), name);
            }
        }
    }

    #[test]
    fn test_invalid_square() {
        for name in ["", "e", "e9", "i1", "E4", "4e", "e44"] {
            assert_eq!(name.parse::<Square>(), Err(ParseSquareError), "{name}");
        }
    }
}
