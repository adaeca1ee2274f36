use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Max rows / columns of a level, also the max number of boxes since box ids are `u8`.
pub(crate) const MAX_SIZE: usize = 255;
pub(crate) const MAX_BOXES: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapCell {
    Empty,
    Wall,
    Goal,
}

impl Default for MapCell {
    fn default() -> Self {
        MapCell::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Player,
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Empty
    }
}

/// A cell of the grid. Ordering is row-major which is what keeps boxes in a canonical order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }

    /// Column, the `x` of the usual `(x, y)` notation.
    pub fn x(self) -> u8 {
        self.c
    }

    /// Row, the `y` of the usual `(x, y)` notation.
    pub fn y(self) -> u8 {
        self.r
    }

    pub fn dist(self, other: Pos) -> u16 {
        let dr = (i16::from(self.r) - i16::from(other.r)).abs();
        let dc = (i16::from(self.c) - i16::from(other.c)).abs();
        (dr + dc) as u16
    }

    /// Only valid for neighboring cells.
    pub(crate) fn dir_to(self, other: Pos) -> Dir {
        if other.r < self.r {
            Dir::Up
        } else if other.c > self.c {
            Dir::Right
        } else if other.r > self.r {
            Dir::Down
        } else {
            Dir::Left
        }
    }
}

impl Debug for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.c, self.r)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.offset();
        Pos::new(
            (i16::from(self.r) + dr) as u8,
            (i16::from(self.c) + dc) as u8,
        )
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

/// Clockwise so that consecutive pairs (wrapping around) are perpendicular.
pub(crate) const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

impl Dir {
    fn offset(self) -> (i16, i16) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }

    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    /// The next direction clockwise, always perpendicular to `self`.
    pub(crate) fn clockwise(self) -> Dir {
        match self {
            Dir::Up => Dir::Right,
            Dir::Right => Dir::Down,
            Dir::Down => Dir::Left,
            Dir::Left => Dir::Up,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dir::Up => "Up",
            Dir::Right => "Right",
            Dir::Down => "Down",
            Dir::Left => "Left",
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Right => write!(f, "r"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
        }
    }
}

impl Debug for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirErr(String);

impl Display for ParseDirErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown direction: {}", self.0)
    }
}

impl std::error::Error for ParseDirErr {}

impl FromStr for Dir {
    type Err = ParseDirErr;

    /// Accepts both names (`Up`, `Left`, ...) and LURD letters in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" => Ok(Dir::Up),
            "right" | "r" => Ok(Dir::Right),
            "down" | "d" => Ok(Dir::Down),
            "left" | "l" => Ok(Dir::Left),
            _ => Err(ParseDirErr(s.to_string())),
        }
    }
}
