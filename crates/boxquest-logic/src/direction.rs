//! Cardinal directions and a compact set of them.
//!
//! North is increasing `y`, east is increasing `x`. A [`DirectionSet`] always
//! renders in the canonical order `n, s, e, w`, listing only its members.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Single-letter code used in action sets and boundary strings.
    pub fn code(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'n' => Some(Direction::North),
            's' => Some(Direction::South),
            'e' => Some(Direction::East),
            'w' => Some(Direction::West),
            _ => None,
        }
    }

    /// Coordinate delta `(dx, dy)` for one step.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::South => 0b0010,
            Direction::East => 0b0100,
            Direction::West => 0b1000,
        }
    }
}

/// A subset of the four cardinal directions.
///
/// Serializes as the list of its members, so a decoded set can only hold
/// the four real direction bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Direction>", into = "Vec<Direction>")]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b1111);

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    pub fn contains(&self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::EMPTY;
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

impl From<Vec<Direction>> for DirectionSet {
    fn from(dirs: Vec<Direction>) -> Self {
        dirs.into_iter().collect()
    }
}

impl From<DirectionSet> for Vec<Direction> {
    fn from(set: DirectionSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dir in self.iter() {
            write!(f, "{}", dir.code())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_from_code() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_code(dir.code()), Some(dir));
        }
        assert_eq!(Direction::from_code('x'), None);
    }

    #[test]
    fn test_display_is_canonical_regardless_of_insert_order() {
        let set: DirectionSet = [Direction::West, Direction::North, Direction::East]
            .into_iter()
            .collect();
        assert_eq!(set.to_string(), "new");
        assert_eq!(DirectionSet::ALL.to_string(), "nsew");
        assert_eq!(DirectionSet::EMPTY.to_string(), "");
    }

    #[test]
    fn test_insert_remove() {
        let mut set = DirectionSet::EMPTY;
        set.insert(Direction::South);
        set.insert(Direction::South);
        assert_eq!(set.len(), 1);
        assert!(set.contains(Direction::South));
        set.remove(Direction::South);
        assert!(set.is_empty());
    }

    #[test]
    fn test_serde_uses_member_list() {
        let ne: DirectionSet = [Direction::North, Direction::East].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&ne).unwrap(),
            r#"["North","East"]"#
        );

        let decoded: DirectionSet =
            serde_json::from_str(r#"["West","North","North"]"#).unwrap();
        assert_eq!(decoded.to_string(), "nw");
        assert_eq!(decoded.len(), 2);

        // Raw bit patterns are not accepted.
        assert!(serde_json::from_str::<DirectionSet>("255").is_err());
        assert!(serde_json::from_str::<DirectionSet>(r#"["Up"]"#).is_err());
    }
}
