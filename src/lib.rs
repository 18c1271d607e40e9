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

//! A parser for chess games in Portable Game Notation, producing a tree of
//! tags, moves, comments, NAGs and nested variations.
//!
//! Moves are classified by the shape of their [SAN](san) token. Nothing
//! is checked against a board.
//!
//! # Examples
//!
//! Parse a database:
//!
//! ```
//! use pgn_tree::{parse_database, GameResult, Node};
//!
//! let pgn = r#"[Event "Casual Game"]
//! [White "Fischer, Robert J."]
//!
//! 1. e4 e5 (1... c5 {Sicilian} 2. Nf3) 2. Nf3 $1 *
//! "#;
//!
//! let db = parse_database(pgn)?;
//! let game = &db.games[0];
//! assert_eq!(game.tags.get("White"), Some("Fischer, Robert J."));
//! assert_eq!(game.result, GameResult::Unknown);
//! assert_eq!(game.ply_count(), 3);
//!
//! let Node::Variation(sicilian) = &game.movetext.nodes[2] else {
//!     panic!("expected variation");
//! };
//! assert_eq!(sicilian.elements().count(), 2);
//! # Ok::<_, pgn_tree::Error>(())
//! ```
//!
//! Keep the games before a malformed one:
//!
//! ```
//! use pgn_tree::{parse_database_with, OnMalformedGame, ParserConfig};
//!
//! let config = ParserConfig::default()
//!     .with_on_malformed_game(OnMalformedGame::SkipRemainder);
//!
//! let db = parse_database_with("1. e4 1-0\n\n1. e4 e9 0-1\n", &config)?;
//! assert_eq!(db.len(), 1);
//! assert_eq!(db.error.map(|err| err.offset()), Some(17));
//! # Ok::<_, pgn_tree::Error>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   for the parsed tree, and
//!   [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html)
//!   for [`ParserConfig`].
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for [`ParserConfig`].

#![doc(html_root_url = "https://docs.rs/pgn-tree/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod comment;
mod config;
mod cursor;
mod database;
mod errors;
mod game;
mod nag;
mod outcome;
mod reader;
mod role;
mod square;
mod tag;

pub mod movetext;
pub mod san;
pub mod token;

pub use castling_side::CastlingSide;
pub use comment::Comment;
pub use config::{OnMalformedGame, ParserConfig, DEFAULT_MAX_VARIATION_DEPTH};
pub use database::{parse_database, parse_database_with, Database};
pub use errors::Error;
pub use game::Game;
pub use movetext::{Element, Node, Variation};
pub use nag::{InvalidNag, Nag};
pub use outcome::{GameResult, InvalidGameResult};
pub use reader::{Games, Reader};
pub use role::Role;
pub use san::{Disambiguation, InvalidSan, San, SanMove};
pub use square::{File, ParseSquareError, Rank, Square};
pub use tag::{TagPair, Tags};
