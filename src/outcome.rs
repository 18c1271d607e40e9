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

/// The game termination marker: `1-0`, `0-1`, `1/2-1/2` or `*`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum GameResult {
    /// `1-0`
    WhiteWins,
    /// `0-1`
    BlackWins,
    /// `1/2-1/2`
    Draw,
    /// `*`, the game is ongoing, abandoned or the result is not known.
    Unknown,
}

impl GameResult {
    /// Parses a game termination marker.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGameResult`] for anything but the four markers.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_tree::GameResult;
    ///
    /// assert_eq!(GameResult::from_ascii(b"1/2-1/2"), Ok(GameResult::Draw));
    /// assert!(GameResult::from_ascii(b"1-1").is_err());
    /// ```
    pub fn from_ascii(s: &[u8]) -> Result<GameResult, InvalidGameResult> {
        Ok(match s {
            b"1-0" => GameResult::WhiteWins,
            b"0-1" => GameResult::BlackWins,
            b"1/2-1/2" => GameResult::Draw,
            b"*" => GameResult::Unknown,
            _ => return Err(InvalidGameResult),
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Unknown => "*",
        }
    }

    /// Whether the game has a known outcome.
    pub const fn is_known(self) -> bool {
        !matches!(self, GameResult::Unknown)
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameResult {
    type Err = InvalidGameResult;

    fn from_str(s: &str) -> Result<GameResult, InvalidGameResult> {
        GameResult::from_ascii(s.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for GameResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Error when parsing an invalid game result.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct InvalidGameResult;

impl fmt::Display for InvalidGameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid game result")
    }
}

impl Error for InvalidGameResult {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result() {
        for result in [
            GameResult::WhiteWins,
            GameResult::BlackWins,
            GameResult::Draw,
            GameResult::Unknown,
        ] {
            assert_eq!(result.as_str().parse(), Ok(result));
        }
        assert_eq!("1/2".parse::<GameResult>(), Err(InvalidGameResult));
        assert_eq!("0-0".parse::<GameResult>(), Err(InvalidGameResult));
        assert!(!GameResult::Unknown.is_known());
        assert!(GameResult::Draw.is_known());
    }
}
