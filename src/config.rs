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

/// Default nesting limit for parenthesized variations.
pub const DEFAULT_MAX_VARIATION_DEPTH: usize = 64;

/// What to do when a game in a database fails to parse.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum OnMalformedGame {
    /// Fail the whole database with the error.
    #[default]
    Abort,
    /// Keep the games parsed so far, record the error and stop.
    SkipRemainder,
}

/// Parser configuration.
///
/// # Examples
///
/// ```
/// use pgn_tree::{OnMalformedGame, ParserConfig};
///
/// let config = ParserConfig::default()
///     .with_max_variation_depth(8)
///     .with_on_malformed_game(OnMalformedGame::SkipRemainder);
///
/// assert_eq!(config.max_variation_depth, 8);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct ParserConfig {
    /// Maximum nesting of parenthesized variations. The main line is at
    /// depth 0, so a limit of 0 rejects all variations.
    pub max_variation_depth: usize,
    pub on_malformed_game: OnMalformedGame,
}

impl ParserConfig {
    #[must_use]
    pub const fn with_max_variation_depth(mut self, max_variation_depth: usize) -> ParserConfig {
        self.max_variation_depth = max_variation_depth;
        self
    }

    #[must_use]
    pub const fn with_on_malformed_game(mut self, on_malformed_game: OnMalformedGame) -> ParserConfig {
        self.on_malformed_game = on_malformed_game;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> ParserConfig {
        ParserConfig {
            max_variation_depth: DEFAULT_MAX_VARIATION_DEPTH,
            on_malformed_game: OnMalformedGame::Abort,
        }
    }
}
