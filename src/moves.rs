use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Dir;
use crate::solver::Cost;

/// One step of the worker. A push remembers the weight of the box it moved.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub(crate) dir: Dir,
    pub(crate) pushed_weight: Option<u32>,
}

impl Move {
    pub(crate) fn step(dir: Dir) -> Self {
        Move {
            dir,
            pushed_weight: None,
        }
    }

    pub(crate) fn push(dir: Dir, weight: u32) -> Self {
        Move {
            dir,
            pushed_weight: Some(weight),
        }
    }

    pub fn dir(self) -> Dir {
        self.dir
    }

    pub fn is_push(self) -> bool {
        self.pushed_weight.is_some()
    }

    pub fn cost(self) -> Cost {
        1 + self.pushed_weight.map_or(0, Cost::from)
    }
}

/// LURD notation: pushes are uppercase.
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_push() {
            write!(f, "{}", self.dir.to_string().to_uppercase())
        } else {
            write!(f, "{}", self.dir)
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.pushed_weight {
            Some(weight) => write!(f, "{}({})", self, weight),
            None => write!(f, "{}", self),
        }
    }
}

/// A plan as the worker walks it.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    #[cfg(test)]
    pub(crate) fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.0.iter().filter(|m| m.is_push()).count()
    }

    /// Sum of the step costs, equal to the cost the solver reports.
    pub fn cost(&self) -> Cost {
        self.0.iter().map(|m| m.cost()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn add(&mut self, mov: Move) {
        self.0.push(mov);
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    pub fn dirs(&self) -> Vec<Dir> {
        self.0.iter().map(|m| m.dir).collect()
    }

    /// `Up`, `Left`, ... - the way actions are usually listed for weighted puzzles.
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|m| m.dir.name()).collect()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = ::std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            write!(f, "{:?}", mov)?;
        }
        Ok(())
    }
}
