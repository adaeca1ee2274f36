use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{Contents, MapCell};
use crate::state::State;
use crate::vec2d::Vec2d;

pub struct MapFormatter<'a> {
    grid: &'a Vec2d<MapCell>,
    state: Option<&'a State>,
    format: Format,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(grid: &'a Vec2d<MapCell>, state: Option<&'a State>, format: Format) -> Self {
        Self {
            grid,
            state,
            format,
        }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state_grid = self.grid.scratchpad();
        if let Some(state) = self.state {
            for b in state.boxes() {
                state_grid[b.pos()] = Contents::Box;
            }
            state_grid[state.player_pos()] = Contents::Player;
        }

        // every row is printed in full so the output is always rectangular
        for (i, pos) in self.grid.positions().enumerate() {
            let cell = self.grid[pos];
            self.write_cell(cell, state_grid[pos], f)?;
            if (i + 1) % usize::from(self.grid.cols()) == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }

    fn write_cell(&self, cell: MapCell, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        match (cell, contents) {
            (MapCell::Empty, Contents::Empty) => write!(f, " "),
            (MapCell::Empty, Contents::Box) => write!(f, "$"),
            (MapCell::Empty, Contents::Player) => write!(f, "@"),
            (MapCell::Wall, Contents::Empty) => write!(f, "#"),
            (MapCell::Wall, _) => unreachable!("Wall with non-empty contents"),
            (MapCell::Goal, Contents::Empty) => write!(f, "."),
            (MapCell::Goal, Contents::Box) => write!(f, "*"),
            (MapCell::Goal, Contents::Player) => match self.format {
                Format::Xsb => write!(f, "+"),
                Format::Warehouse => write!(f, "!"),
            },
        }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Walls as `#`, taboo cells as `X`, everything else as a space.
pub struct TabooFormatter {
    walls: Vec2d<bool>,
    taboo: Vec2d<bool>,
}

impl TabooFormatter {
    pub(crate) fn new(grid: &Vec2d<MapCell>, taboo: Vec2d<bool>) -> Self {
        let mut walls = grid.scratchpad();
        for pos in grid.positions() {
            walls[pos] = grid[pos] == MapCell::Wall;
        }
        Self { walls, taboo }
    }

    pub fn taboo_count(&self) -> usize {
        self.taboo
            .positions()
            .filter(|&pos| self.taboo[pos])
            .count()
    }
}

impl Display for TabooFormatter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, pos) in self.walls.positions().enumerate() {
            if self.walls[pos] {
                write!(f, "#")?;
            } else if self.taboo[pos] {
                write!(f, "X")?;
            } else {
                write!(f, " ")?;
            }
            if (i + 1) % usize::from(self.walls.cols()) == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Debug for TabooFormatter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
