use std::cell::RefCell;
use std::fmt::{self, Display, Formatter};

use fnv::FnvHashMap;

use crate::data::{Dir, MapCell, Pos, DIRECTIONS};
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadlock {
    /// A box on a taboo cell.
    Taboo,
    /// Two neighboring boxes, at least one of them off target, each with a wall
    /// across the axis perpendicular to the pair.
    FrozenPair,
    /// A box off target with walls or boxes on two perpendicular sides.
    /// Might get freed when the other boxes move.
    Corner,
}

impl Deadlock {
    /// No sequence of actions can solve the level from this state.
    pub fn is_permanent(self) -> bool {
        match self {
            Deadlock::Taboo | Deadlock::FrozenPair => true,
            Deadlock::Corner => false,
        }
    }
}

impl Display for Deadlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Deadlock::Taboo => write!(f, "box on a taboo cell"),
            Deadlock::FrozenPair => write!(f, "frozen pair of boxes"),
            Deadlock::Corner => write!(f, "box stuck in a corner"),
        }
    }
}

pub(crate) struct DeadlockDetector {
    grid: Vec2d<MapCell>,
    taboo: Vec2d<bool>,
    /// Box positions -> whether any of them is taboo.
    taboo_cache: RefCell<FnvHashMap<Vec<Pos>, bool>>,
}

impl DeadlockDetector {
    pub(crate) fn new(grid: Vec2d<MapCell>, taboo: Vec2d<bool>) -> Self {
        Self {
            grid,
            taboo,
            taboo_cache: RefCell::new(FnvHashMap::default()),
        }
    }

    pub(crate) fn detect(&self, state: &State) -> Option<Deadlock> {
        if self.is_taboo_deadlock(state) {
            Some(Deadlock::Taboo)
        } else if self.has_frozen_pair(state) {
            Some(Deadlock::FrozenPair)
        } else if self.has_cornered_box(state) {
            Some(Deadlock::Corner)
        } else {
            None
        }
    }

    pub(crate) fn is_taboo_deadlock(&self, state: &State) -> bool {
        let positions = state.box_positions();
        if let Some(&cached) = self.taboo_cache.borrow().get(&positions) {
            return cached;
        }
        let deadlock = positions.iter().any(|&pos| self.taboo[pos]);
        self.taboo_cache.borrow_mut().insert(positions, deadlock);
        deadlock
    }

    fn has_cornered_box(&self, state: &State) -> bool {
        state
            .boxes()
            .iter()
            .any(|b| self.grid[b.pos()] != MapCell::Goal && self.is_blocked(state, b.pos()))
    }

    /// Only directly neighboring pairs, nothing is propagated further.
    ///
    /// Each box blocks the other along the pair's axis
    /// so only walls count across it.
    fn has_frozen_pair(&self, state: &State) -> bool {
        for b in state.boxes() {
            let pos = b.pos();
            // each pair only once
            for &dir in &[Dir::Right, Dir::Down] {
                let other = pos + dir;
                if !state.has_box(other) {
                    continue;
                }
                if self.grid[pos] == MapCell::Goal && self.grid[other] == MapCell::Goal {
                    continue;
                }
                let across = dir.clockwise();
                if self.walled_in(pos, across) && self.walled_in(other, across) {
                    return true;
                }
            }
        }
        false
    }

    /// A wall on either side along the axis of `dir`.
    fn walled_in(&self, pos: Pos, dir: Dir) -> bool {
        self.grid[pos + dir] == MapCell::Wall || self.grid[pos - dir] == MapCell::Wall
    }

    /// Walls or boxes on two perpendicular sides.
    fn is_blocked(&self, state: &State, pos: Pos) -> bool {
        let obstacle = |pos: Pos| self.grid[pos] == MapCell::Wall || state.has_box(pos);
        DIRECTIONS
            .iter()
            .any(|&dir| obstacle(pos + dir) && obstacle(pos + dir.clockwise()))
    }

    #[cfg(test)]
    fn cached_configs(&self) -> usize {
        self.taboo_cache.borrow().len()
    }
}
