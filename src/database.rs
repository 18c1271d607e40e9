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

use std::{slice, str::FromStr, vec};

use log::warn;

use crate::{
    config::{OnMalformedGame, ParserConfig},
    errors::Error,
    game::Game,
    reader::Reader,
};

/// All games of a PGN text.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Database {
    pub games: Vec<Game>,
    /// The error that ended parsing early. Only ever set with
    /// [`OnMalformedGame::SkipRemainder`].
    pub error: Option<Error>,
}

impl Database {
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Whether every game of the input was parsed.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn iter(&self) -> slice::Iter<'_, Game> {
        self.games.iter()
    }
}

impl IntoIterator for Database {
    type Item = Game;
    type IntoIter = vec::IntoIter<Game>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.into_iter()
    }
}

impl<'a> IntoIterator for &'a Database {
    type Item = &'a Game;
    type IntoIter = slice::Iter<'a, Game>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

impl FromStr for Database {
    type Err = Error;

    fn from_str(pgn: &str) -> Result<Database, Error> {
        parse_database(pgn)
    }
}

/// Parses all games with the default [`ParserConfig`].
///
/// # Errors
///
/// Returns the first error in any game.
///
/// # Examples
///
/// ```
/// use pgn_tree::{parse_database, GameResult};
///
/// let db = parse_database("1. e4 e5 (1... c5 2. Nf3) 2. Nf3 *")?;
/// assert_eq!(db.len(), 1);
/// assert_eq!(db.games[0].result, GameResult::Unknown);
/// assert_eq!(db.games[0].movetext.variations().count(), 1);
/// # Ok::<_, pgn_tree::Error>(())
/// ```
pub fn parse_database(pgn: &str) -> Result<Database, Error> {
    parse_database_with(pgn, &ParserConfig::default())
}

/// Parses all games.
///
/// # Errors
///
/// With [`OnMalformedGame::Abort`] the first error in any game is returned.
/// With [`OnMalformedGame::SkipRemainder`] this never fails: parsing stops
/// at the first malformed game and the games before it are returned, with
/// the error in [`Database::error`].
pub fn parse_database_with(pgn: &str, config: &ParserConfig) -> Result<Database, Error> {
    let mut games = Vec::new();
    for game in Reader::new(pgn).with_config(*config).games() {
        match game {
            Ok(game) => games.push(game),
            Err(err) => match config.on_malformed_game {
                OnMalformedGame::Abort => return Err(err),
                OnMalformedGame::SkipRemainder => {
                    warn!(
                        "stopping after {} games, skipping remainder: {err}",
                        games.len()
                    );
                    return Ok(Database {
                        games,
                        error: Some(err),
                    });
                }
            },
        }
    }
    Ok(Database { games, error: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_GAMES: &str = "[Event \"1\"]\n1. e4 e5 1-0\n\n\
                               [Event \"2\"]\n1. e4 Z9 0-1\n\n\
                               [Event \"3\"]\n1. d4 *\n";

    #[test]
    fn test_abort() {
        assert!(matches!(
            parse_database(THREE_GAMES),
            Err(Error::San { offset: 44, .. })
        ));
    }

    #[test]
    fn test_skip_remainder() -> Result<(), Error> {
        let config = ParserConfig::default().with_on_malformed_game(OnMalformedGame::SkipRemainder);
        let db = parse_database_with(THREE_GAMES, &config)?;
        assert_eq!(db.len(), 1);
        assert_eq!(db.games[0].tags.get("Event"), Some("1"));
        assert!(!db.is_complete());
        assert_eq!(db.error.as_ref().map(Error::offset), Some(44));
        Ok(())
    }

    #[test]
    fn test_complete() -> Result<(), Error> {
        let db: Database = "1. e4 1-0 1. d4 0-1 *".parse()?;
        assert_eq!(db.len(), 3);
        assert!(db.is_complete());
        assert_eq!(db.iter().map(Game::ply_count).sum::<usize>(), 2);
        Ok(())
    }

    #[test]
    fn test_empty() -> Result<(), Error> {
        assert_eq!(parse_database("")?, Database::default());
        assert_eq!(parse_database("\n\n")?, Database::default());
        Ok(())
    }
}
