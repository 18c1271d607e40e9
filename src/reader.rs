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

use std::iter::FusedIterator;

use log::debug;

use crate::{
    config::ParserConfig,
    cursor::Cursor,
    errors::Error,
    game::{parse_game, Game},
    token::{TokenKind, Tokenizer},
};

/// Reads games one by one from PGN text.
///
/// # Examples
///
/// ```
/// use pgn_tree::{GameResult, Reader};
///
/// let pgn = "[Event \"A\"] 1. e4 1-0\n\n[Event \"B\"] 1. d4 0-1\n";
/// let mut reader = Reader::new(pgn);
///
/// let first = reader.read_game()?.expect("first game");
/// assert_eq!(first.result, GameResult::WhiteWins);
///
/// // Resume later from a saved game boundary.
/// let offset = reader.offset();
/// let second = Reader::at(pgn, offset).read_game()?.expect("second game");
/// assert_eq!(second.tags.get("Event"), Some("B"));
/// # Ok::<_, pgn_tree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    cursor: Cursor<'a>,
    config: ParserConfig,
    games_read: usize,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Reader<'a> {
        Reader::from_tokenizer(Tokenizer::new(input))
    }

    /// Starts reading at a byte offset, usually one previously reported by
    /// [`Reader::offset()`] between two games.
    pub fn at(input: &'a str, offset: usize) -> Reader<'a> {
        Reader::from_tokenizer(Tokenizer::at(input, offset))
    }

    fn from_tokenizer(tokenizer: Tokenizer<'a>) -> Reader<'a> {
        Reader {
            cursor: Cursor::new(tokenizer),
            config: ParserConfig::default(),
            games_read: 0,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Reader<'a> {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The byte offset where reading continues. After a successful
    /// [`Reader::read_game()`] this is a game boundary that
    /// [`Reader::at()`] can resume from.
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// The number of games successfully read so far.
    pub fn games_read(&self) -> usize {
        self.games_read
    }

    /// Reads the next game, or returns `None` at the end of the input.
    ///
    /// # Errors
    ///
    /// Errors with the first problem encountered in the game. The position
    /// of the reader is unspecified afterwards.
    pub fn read_game(&mut self) -> Result<Option<Game>, Error> {
        let start = self.cursor.peek()?;
        if start.kind == TokenKind::EndOfInput {
            return Ok(None);
        }

        let game = parse_game(&mut self.cursor, &self.config)?;
        self.games_read += 1;
        debug!(
            "read game {} at offset {}: {} plies, result {}",
            self.games_read,
            start.offset,
            game.ply_count(),
            game.result
        );
        Ok(Some(game))
    }

    /// Iterates over the remaining games. The iterator ends after the
    /// first error.
    pub fn games(self) -> Games<'a> {
        Games {
            reader: self,
            done: false,
        }
    }

    pub fn input(&self) -> &'a str {
        self.cursor.input()
    }
}

/// Iterator over games, created by [`Reader::games()`].
#[derive(Debug, Clone)]
pub struct Games<'a> {
    reader: Reader<'a>,
    done: bool,
}

impl Games<'_> {
    pub fn offset(&self) -> usize {
        self.reader.offset()
    }
}

impl Iterator for Games<'_> {
    type Item = Result<Game, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.reader.read_game().transpose();
        self.done = !matches!(item, Some(Ok(_)));
        item
    }
}

impl FusedIterator for Games<'_> {}
