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

//! The movetext tree: elements, comments, NAGs and nested variations.
//!
//! Every SAN token becomes its own [`Element`]. Move numbers are kept as
//! written but carry no structure: a variation is a flat sequence of
//! [`Node`]s, and parenthesized sub-variations appear in it right after
//! the element they are an alternative to.

use std::slice;

use log::trace;

use crate::{
    comment::{parse_comments, Comment},
    config::ParserConfig,
    cursor::Cursor,
    errors::Error,
    nag::Nag,
    outcome::GameResult,
    san::{classify, SanMove},
    token::{Token, TokenKind},
};

/// One ply of movetext with its annotations.
///
/// ```text
/// {leading} 12. {move} Nbd7 {nag} $1 $18 {trailing}
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Element {
    /// Before the move number, or before the move if there is no number.
    pub leading_comment: Option<Comment>,
    pub move_number: Option<u32>,
    /// Between the move number and the move.
    pub move_comment: Option<Comment>,
    pub san: SanMove,
    /// Between the move and its NAGs. Only set if there are NAGs.
    pub nag_comment: Option<Comment>,
    pub nags: Vec<Nag>,
    pub trailing_comment: Option<Comment>,
    /// Byte offset of the move token.
    pub offset: usize,
}

impl Element {
    /// Creates an element without number or annotations.
    pub fn new(san: SanMove, offset: usize) -> Element {
        Element {
            leading_comment: None,
            move_number: None,
            move_comment: None,
            san,
            nag_comment: None,
            nags: Vec::new(),
            trailing_comment: None,
            offset,
        }
    }

    /// Iterates over all comments of the element in the order they were
    /// written.
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        [
            &self.leading_comment,
            &self.move_comment,
            &self.nag_comment,
            &self.trailing_comment,
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Node {
    Element(Element),
    Variation(Variation),
    /// A comment that precedes no move, like one directly before `(` or
    /// at the end of a line after a variation.
    Comment(Comment),
}

impl Node {
    pub fn element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn variation(&self) -> Option<&Variation> {
        match self {
            Node::Variation(variation) => Some(variation),
            _ => None,
        }
    }
}

/// A sequence of nodes: the main line of a game, or the contents of a
/// parenthesized variation.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Variation {
    pub nodes: Vec<Node>,
}

impl Variation {
    /// The elements of this line, skipping nested variations and
    /// standalone comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(Node::element)
    }

    /// The variations nested directly in this line.
    pub fn variations(&self) -> impl Iterator<Item = &Variation> {
        self.nodes.iter().filter_map(Node::variation)
    }

    pub fn has_elements(&self) -> bool {
        self.nodes.iter().any(|node| matches!(node, Node::Element(_)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a Variation {
    type Item = &'a Node;
    type IntoIter = slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// The game result a token stands for, if any.
pub(crate) fn game_result(token: &Token<'_>) -> Option<GameResult> {
    match token.kind {
        TokenKind::Asterisk => Some(GameResult::Unknown),
        TokenKind::Word => GameResult::from_ascii(token.lexeme.as_bytes()).ok(),
        _ => None,
    }
}

fn adjacent(first: &Token<'_>, second: &Token<'_>) -> bool {
    first.end() == second.offset
}

/// Parses nodes until `)`, a game result or the end of input, none of
/// which is consumed. `depth` is the nesting level of the sequence, with
/// the main line at 0.
pub(crate) fn parse_sequence(
    cursor: &mut Cursor<'_>,
    config: &ParserConfig,
    depth: usize,
) -> Result<Variation, Error> {
    let mut nodes = Vec::new();
    loop {
        let token = cursor.peek()?;
        match token.kind {
            TokenKind::LParen => nodes.push(Node::Variation(parse_variation(cursor, config, depth + 1)?)),
            TokenKind::RParen | TokenKind::EndOfInput => break,
            _ if game_result(&token).is_some() => break,
            TokenKind::LBrace
            | TokenKind::LineComment
            | TokenKind::Number
            | TokenKind::Dot
            | TokenKind::Word => nodes.push(parse_node(cursor)?),
            _ => {
                return Err(Error::Movetext {
                    offset: token.offset,
                    expected: "element, variation or result",
                })
            }
        }
    }
    Ok(Variation { nodes })
}

fn parse_variation(
    cursor: &mut Cursor<'_>,
    config: &ParserConfig,
    depth: usize,
) -> Result<Variation, Error> {
    let open = cursor.peek()?;
    if depth > config.max_variation_depth {
        return Err(Error::RecursionLimitExceeded {
            depth,
            offset: open.offset,
        });
    }
    cursor.bump()?;
    trace!("entering variation at offset {} (depth {depth})", open.offset);

    let variation = parse_sequence(cursor, config, depth)?;

    let close = cursor.peek()?;
    if close.kind != TokenKind::RParen {
        return Err(Error::Movetext {
            offset: close.offset,
            expected: "')' to close variation",
        });
    }
    if !variation.has_elements() {
        return Err(Error::Movetext {
            offset: close.offset,
            expected: "move in variation",
        });
    }
    cursor.bump()?;
    Ok(variation)
}

/// Parses an element, or a run of comments that precedes no move.
fn parse_node(cursor: &mut Cursor<'_>) -> Result<Node, Error> {
    let leading_comment = parse_comments(cursor)?;

    let move_number = match cursor.eat(TokenKind::Number)? {
        Some(number) => Some(parse_move_number(cursor, &number)?),
        None => None,
    };

    let move_comment = match move_number {
        Some(_) => parse_comments(cursor)?,
        None => None,
    };

    let token = cursor.peek()?;
    let san = match token.kind {
        TokenKind::Word if game_result(&token).is_none() => {
            cursor.bump()?;
            classify(&token)?
        }
        TokenKind::Dot if is_null_move(cursor, &token)? => {
            cursor.bump()?;
            cursor.bump()?;
            SanMove::NULL
        }
        _ => {
            return match (move_number, leading_comment) {
                (Some(_), _) => Err(Error::Movetext {
                    offset: token.offset,
                    expected: "move after move number",
                }),
                (None, Some(comment)) => Ok(Node::Comment(comment)),
                (None, None) => Err(Error::Movetext {
                    offset: token.offset,
                    expected: "element, variation or result",
                }),
            };
        }
    };

    let mut element = Element {
        leading_comment,
        move_number,
        move_comment,
        ..Element::new(san, token.offset)
    };

    let after_move = parse_comments(cursor)?;
    parse_nags(cursor, &mut element.nags)?;
    if element.nags.is_empty() {
        element.trailing_comment = after_move;
    } else {
        element.nag_comment = after_move;
        while let Some(comment) = parse_comments(cursor)? {
            Comment::append(&mut element.trailing_comment, comment);
            parse_nags(cursor, &mut element.nags)?;
        }
    }

    Ok(Node::Element(element))
}

/// Parses the dots after a move number. Dots directly adjacent to the
/// first one belong to the number, as in `12...`.
fn parse_move_number(cursor: &mut Cursor<'_>, number: &Token<'_>) -> Result<u32, Error> {
    let mut dot = cursor.eat(TokenKind::Dot)?.ok_or(Error::Movetext {
        offset: cursor.offset(),
        expected: "'.' after move number",
    })?;
    loop {
        let next = cursor.peek()?;
        if next.kind != TokenKind::Dot || !adjacent(&dot, &next) {
            break;
        }
        dot = cursor.bump()?;
    }

    btoi::btou(number.lexeme.as_bytes()).map_err(|_| Error::Movetext {
        offset: number.offset,
        expected: "move number in range",
    })
}

fn is_null_move(cursor: &mut Cursor<'_>, dot: &Token<'_>) -> Result<bool, Error> {
    let next = cursor.peek_nth(1)?;
    Ok(next.kind == TokenKind::Dot && adjacent(dot, &next))
}

fn parse_nags(cursor: &mut Cursor<'_>, nags: &mut Vec<Nag>) -> Result<(), Error> {
    loop {
        let token = cursor.peek()?;
        match token.kind {
            TokenKind::Dollar => {
                cursor.bump()?;
                let digits = cursor.eat(TokenKind::Number)?.ok_or(Error::Movetext {
                    offset: cursor.offset(),
                    expected: "number after '$'",
                })?;
                nags.push(
                    Nag::from_digits(digits.lexeme.as_bytes()).map_err(|_| Error::Movetext {
                        offset: digits.offset,
                        expected: "nag between $0 and $255",
                    })?,
                );
            }
            TokenKind::Glyph => {
                cursor.bump()?;
                nags.push(
                    Nag::from_ascii(token.lexeme.as_bytes()).map_err(|_| Error::Movetext {
                        offset: token.offset,
                        expected: "annotation glyph",
                    })?,
                );
            }
            _ => return Ok(()),
        }
    }
}
