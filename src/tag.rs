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

//! The tag pair section, like `[White "Fischer, Robert J."]`.

use std::{borrow::Cow, slice, vec};

use crate::{cursor::Cursor, errors::Error, token::TokenKind};

/// A tag pair.
///
/// The value is kept exactly as written between the quotes. Use
/// [`TagPair::decoded_value()`] to resolve [backslash
/// escapes](http://www.saremba.de/chessgml/standards/pgn/pgn-complete.htm#c7):
///
/// > A quote inside a string is represented by the backslash immediately
/// > followed by a quote. A backslash inside a string is represented by
/// > two adjacent backslashes.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct TagPair {
    pub name: String,
    pub value: String,
}

impl TagPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> TagPair {
        TagPair {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Decodes escaped quotes and backslashes. Allocates only when the
    /// value actually contains escape sequences.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_tree::TagPair;
    ///
    /// let tag = TagPair::new("Annotator", r#"A \"B\" C\\"#);
    /// assert_eq!(tag.decoded_value(), r#"A "B" C\"#);
    /// ```
    pub fn decoded_value(&self) -> Cow<'_, str> {
        let value = self.value.as_str();
        let bytes = value.as_bytes();
        let mut head = 0;
        let mut pos = 0;
        let mut decoded = String::new();
        while let Some(escape) = memchr::memchr(b'\\', &bytes[pos..]).map(|i| pos + i) {
            match bytes.get(escape + 1) {
                Some(b'\\' | b'"') => {
                    decoded.push_str(&value[head..escape]);
                    head = escape + 1;
                    pos = escape + 2;
                }
                _ => pos = escape + 1,
            }
        }
        if head == 0 {
            Cow::Borrowed(value)
        } else {
            decoded.push_str(&value[head..]);
            Cow::Owned(decoded)
        }
    }
}

/// The tag pairs of a game, in the order they were written.
///
/// Names are not deduplicated.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Tags(pub Vec<TagPair>);

impl Tags {
    /// The raw value of the first tag with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.value.as_str())
    }

    /// All tags with the given name.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TagPair> + 'a {
        self.0.iter().filter(move |tag| tag.name == name)
    }

    pub fn iter(&self) -> slice::Iter<'_, TagPair> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Tags {
    type Item = TagPair;
    type IntoIter = vec::IntoIter<TagPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a TagPair;
    type IntoIter = slice::Iter<'a, TagPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Consumes tag pairs while the next token is `[`.
pub(crate) fn parse_tags(cursor: &mut Cursor<'_>) -> Result<Tags, Error> {
    let mut tags = Vec::new();
    while cursor.eat(TokenKind::LBracket)?.is_some() {
        let name = cursor.eat(TokenKind::Word)?.ok_or(Error::Tag {
            offset: cursor.offset(),
            reason: "expected tag name",
        })?;
        let value = cursor.eat(TokenKind::QuotedString)?.ok_or(Error::Tag {
            offset: cursor.offset(),
            reason: "expected quoted tag value",
        })?;
        if cursor.eat(TokenKind::RBracket)?.is_none() {
            return Err(Error::Tag {
                offset: cursor.offset(),
                reason: "expected ']'",
            });
        }
        tags.push(TagPair::new(name.lexeme, value.unquoted()));
    }
    Ok(Tags(tags))
}
