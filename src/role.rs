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

/// Piece types that are named by a letter in SAN: `Knight`, `Bishop`,
/// `Rook`, `Queen`, `King`.
///
/// Pawn moves carry no piece letter, so there is no `Pawn` role.
///
/// # Examples
///
/// ```
/// use pgn_tree::Role;
///
/// assert_eq!(Role::from_char('N'), Some(Role::Knight));
/// assert_eq!(Role::King.char(), 'K');
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Role {
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl Role {
    /// Gets the piece type from its uppercase English letter. SAN piece
    /// letters are case-sensitive: `b` is a file, not a bishop.
    pub const fn from_char(ch: char) -> Option<Role> {
        match ch {
            'N' => Some(Role::Knight),
            'B' => Some(Role::Bishop),
            'R' => Some(Role::Rook),
            'Q' => Some(Role::Queen),
            'K' => Some(Role::King),
            _ => None,
        }
    }

    /// Gets the piece type a pawn may promote to.
    pub const fn promotion_from_char(ch: char) -> Option<Role> {
        match Role::from_char(ch) {
            Some(Role::King) => None,
            role => role,
        }
    }

    /// Gets the uppercase English letter for the piece type.
    pub const fn char(self) -> char {
        match self {
            Role::Knight => 'N',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Queen => 'Q',
            Role::King => 'K',
        }
    }

    /// `Knight`, `Bishop`, `Rook`, `Queen`, and `King`, in this order.
    pub const ALL: [Role; 5] = [
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
    ];
}
