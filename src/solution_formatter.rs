use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::map::GoalMap;
use crate::moves::Moves;
use crate::state::State;

/// The initial state followed by the state after every push (or every move with `include_steps`).
pub struct SolutionFormatter<'a> {
    map: &'a GoalMap,
    initial_state: &'a State,
    moves: &'a Moves,
    include_steps: bool,
    format: Format,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(
        map: &'a GoalMap,
        initial_state: &'a State,
        moves: &'a Moves,
        include_steps: bool,
        format: Format,
    ) -> Self {
        Self {
            map,
            initial_state,
            moves,
            include_steps,
            format,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            self.map.format_with_state(self.format, self.initial_state)
        )?;
        let mut last_state = self.initial_state.clone();
        for mov in self.moves {
            // stop at the first move that doesn't belong to this level instead of panicking
            if !last_state.can_move(&self.map.grid, mov.dir) {
                return writeln!(f, "Illegal move: {}", mov);
            }
            let new_state = last_state.moved(mov.dir);
            if mov.is_push() || self.include_steps {
                writeln!(f, "{}", self.map.format_with_state(self.format, &new_state))?;
            }
            last_state = new_state;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
