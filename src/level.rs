use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{Dir, MapCell, Pos};
use crate::map::GoalMap;
use crate::map_formatter::{MapFormatter, TabooFormatter};
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;
use crate::solver::preprocessing::{check_reachability, find_taboo_cells};
use crate::solver::reachability;
use crate::solver::SolverErr;
use crate::state::State;

/// A level exactly as it was loaded, nothing is removed or simplified.
#[derive(Clone)]
pub struct Level {
    pub(crate) map: GoalMap,
    pub(crate) state: State,
}

impl Level {
    pub(crate) fn new(map: GoalMap, state: State) -> Self {
        Level { map, state }
    }

    pub fn initial_state(&self) -> &State {
        &self.state
    }

    pub fn goals(&self) -> &[Pos] {
        &self.map.goals
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.format(Format::Xsb)
    }

    pub fn warehouse(&self) -> MapFormatter<'_> {
        self.format(Format::Warehouse)
    }

    pub fn format(&self, format: Format) -> MapFormatter<'_> {
        self.format_state(format, &self.state)
    }

    /// Any state of this level, e.g. one returned by `replay`.
    pub fn format_state<'a>(&'a self, format: Format, state: &'a State) -> MapFormatter<'a> {
        self.map.format_with_state(format, state)
    }

    pub fn format_solution<'a>(
        &'a self,
        format: Format,
        moves: &'a Moves,
        include_steps: bool,
    ) -> SolutionFormatter<'a> {
        SolutionFormatter::new(&self.map, &self.state, moves, include_steps, format)
    }

    /// Cells where a box can never be pushed out of.
    pub fn taboo(&self) -> Result<TabooFormatter, SolverErr> {
        let processed_grid = check_reachability(&self.map.grid, self.state.player_pos)?;
        let taboo = find_taboo_cells(&processed_grid);
        Ok(TabooFormatter::new(&self.map.grid, taboo))
    }

    /// Applies the actions one by one, `None` if any of them is illegal.
    pub fn replay(&self, actions: &[Dir]) -> Option<State> {
        let grid = &self.map.grid;
        let mut state = self.state.clone();
        for &dir in actions {
            // the border might not be complete so check bounds before touching the grid
            let dest = grid.step(state.player_pos, dir)?;
            if state.has_box(dest) {
                grid.step(dest, dir)?;
            }
            if !state.can_move(grid, dir) {
                return None;
            }
            state = state.moved(dir);
        }
        Some(state)
    }

    /// The final state in warehouse format or `Impossible`.
    pub fn check_action_seq(&self, actions: &[Dir]) -> String {
        match self.replay(actions) {
            Some(state) => self.format_state(Format::Warehouse, &state).to_string(),
            None => "Impossible".to_string(),
        }
    }

    /// Shortest walk of the worker from its initial position without pushing any boxes.
    ///
    /// `Ok(None)` if `dest` is a wall, outside the map or blocked by boxes.
    pub fn walk(&self, dest: Pos) -> Result<Option<Moves>, SolverErr> {
        let processed_grid = check_reachability(&self.map.grid, self.state.player_pos)?;
        if dest.r >= processed_grid.rows()
            || dest.c >= processed_grid.cols()
            || processed_grid[dest] == MapCell::Wall
        {
            return Ok(None);
        }
        Ok(reachability::player_steps(
            &processed_grid,
            &self.state,
            self.state.player_pos,
            dest,
        ))
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
