use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// The static part of a level: walls and targets.
#[derive(Clone)]
pub(crate) struct GoalMap {
    pub(crate) grid: Vec2d<MapCell>,
    /// Sorted row-major.
    pub(crate) goals: Vec<Pos>,
}

impl GoalMap {
    pub(crate) fn new(grid: Vec2d<MapCell>, mut goals: Vec<Pos>) -> Self {
        goals.sort();
        GoalMap { grid, goals }
    }

    pub(crate) fn is_goal(&self, pos: Pos) -> bool {
        self.grid[pos] == MapCell::Goal
    }

    pub(crate) fn format_with_state<'a>(
        &'a self,
        format: Format,
        state: &'a State,
    ) -> MapFormatter<'a> {
        MapFormatter::new(&self.grid, Some(state), format)
    }

    pub(crate) fn xsb_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        self.format_with_state(Format::Xsb, state)
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", MapFormatter::new(&self.grid, None, Format::Xsb))
    }
}

impl Debug for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
