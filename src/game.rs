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

use crate::{
    config::ParserConfig,
    cursor::Cursor,
    errors::Error,
    movetext::{game_result, parse_sequence, Element, Variation},
    outcome::GameResult,
    tag::{parse_tags, Tags},
    token::TokenKind,
};

/// A parsed game: tag pairs, movetext tree and result.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Game {
    pub tags: Tags,
    pub movetext: Variation,
    pub result: GameResult,
}

impl Game {
    /// Iterates over the elements of the main line.
    pub fn mainline(&self) -> impl Iterator<Item = &Element> {
        self.movetext.elements()
    }

    /// Number of half-moves in the main line.
    pub fn ply_count(&self) -> usize {
        self.mainline().count()
    }
}

/// Parses one game: tag section, movetext and the terminating result.
pub(crate) fn parse_game(cursor: &mut Cursor<'_>, config: &ParserConfig) -> Result<Game, Error> {
    let tags = parse_tags(cursor)?;
    let movetext = parse_sequence(cursor, config, 0)?;

    let token = cursor.bump()?;
    let result = match game_result(&token) {
        Some(result) => result,
        None if token.kind == TokenKind::EndOfInput => {
            return Err(Error::Game {
                offset: token.offset,
                reason: "missing result",
            })
        }
        None => {
            return Err(Error::Movetext {
                offset: token.offset,
                expected: "game result",
            })
        }
    };

    Ok(Game {
        tags,
        movetext,
        result,
    })
}
