use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos, MAX_BOXES, MAX_SIZE};
use crate::level::Level;
use crate::map::GoalMap;
use crate::state::{State, WeightedBox};
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErr {
    /// Invalid character at row, column.
    Pos(usize, usize),
    TooLarge,
    MultiplePlayers,
    NoPlayer,
    InvalidWeight(String),
    WeightCount { boxes: usize, weights: usize },
    TooManyBoxes,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::TooLarge => write!(f, "Map larger than 255 rows/columns"),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::InvalidWeight(ref w) => write!(f, "Invalid box weight: {}", w),
            ParserErr::WeightCount { boxes, weights } => write!(
                f,
                "Got {} weights for {} boxes - need one weight per box or no weights line",
                weights, boxes
            ),
            ParserErr::TooManyBoxes => write!(f, "More than 255 boxes"),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses (a superset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format).
///
/// The first line can optionally list box weights separated by whitespace,
/// in the order the boxes appear (row by row, left to right).
/// Boxes are unweighted without it.
pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n');

    let mut lines = level.lines().peekable();
    let weights = match lines.peek() {
        Some(first) if is_weights_line(first) => {
            let weights = parse_weights(first)?;
            lines.next();
            Some(weights)
        }
        _ => None,
    };

    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut box_positions = Vec::new();
    let mut player_pos = None;

    for (r, line) in lines.enumerate() {
        if r >= MAX_SIZE {
            return Err(ParserErr::TooLarge);
        }
        let mut line_tiles = Vec::new();
        for (c, cur_char) in line.trim_end().chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            let pos = Pos::new(r as u8, c as u8);

            let tile = match cur_char {
                '#' => MapCell::Wall,
                'p' | '@' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    MapCell::Empty
                }
                'P' | '+' | '!' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                'b' | '$' => {
                    box_positions.push(pos);
                    MapCell::Empty
                }
                'B' | '*' => {
                    box_positions.push(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                '.' => {
                    goals.push(pos);
                    MapCell::Goal
                }
                ' ' | '-' | '_' => MapCell::Empty,
                _ => return Err(ParserErr::Pos(r, c)),
            };
            line_tiles.push(tile);
        }
        grid.push(line_tiles);
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    if box_positions.len() > MAX_BOXES {
        return Err(ParserErr::TooManyBoxes);
    }

    let weights = weights.unwrap_or_else(|| vec![0; box_positions.len()]);
    if weights.len() != box_positions.len() {
        return Err(ParserErr::WeightCount {
            boxes: box_positions.len(),
            weights: weights.len(),
        });
    }

    let boxes = box_positions
        .into_iter()
        .zip(weights)
        .enumerate()
        .map(|(id, (pos, weight))| WeightedBox::new(id as u8, pos, weight))
        .collect();

    Ok(Level::new(
        GoalMap::new(Vec2d::new(&grid), goals),
        State::new(player_pos, boxes),
    ))
}

fn is_weights_line(line: &str) -> bool {
    line.chars().any(|c| c.is_ascii_digit())
        && line
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace())
}

fn parse_weights(line: &str) -> Result<Vec<u32>, ParserErr> {
    line.split_whitespace()
        .map(|w| w.parse().map_err(|_| ParserErr::InvalidWeight(w.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Format;

    #[test]
    fn fail_empty() {
        assert_failure("", ParserErr::NoPlayer);
    }

    #[test]
    fn fail_no_player() {
        let level = r"
#####
#   #
#####
";
        assert_failure(level, ParserErr::NoPlayer);
    }

    #[test]
    fn fail_multiple_players() {
        let level = r"
######
#@ $+#
######
";
        assert_failure(level, ParserErr::MultiplePlayers);
    }

    #[test]
    fn fail_pos() {
        let level = r"
#####
#@X.#
#####
";
        assert_failure(level, ParserErr::Pos(1, 2));
    }

    #[test]
    fn fail_weight_count() {
        let level = r"
1 2
#####
#@$.#
#####
";
        assert_failure(
            level,
            ParserErr::WeightCount {
                boxes: 1,
                weights: 2,
            },
        );
    }

    #[test]
    fn fail_weight_overflow() {
        let level = r"
99999999999
#####
#@$.#
#####
";
        assert_failure(level, ParserErr::InvalidWeight("99999999999".to_string()));
    }

    #[test]
    fn fail_too_large() {
        let level = format!("{}@", " ".repeat(MAX_SIZE));
        assert_failure(&level, ParserErr::TooLarge);
    }

    #[test]
    fn simplest() {
        let level = r"
#####
#@$.#
#####
";
        assert_success(level);
        let level: Level = level.parse().unwrap();
        assert_eq!(level.state.boxes()[0].weight(), 0);
    }

    #[test]
    fn alternative_chars() {
        let level: Level = "######\n#p-b.#\n######".parse().unwrap();
        assert_eq!(level.to_string(), "######\n#@ $.#\n######\n");

        let level: Level = "#####\n#P B#\n#####".parse().unwrap();
        assert_eq!(level.to_string(), "#####\n#+ *#\n#####\n");
    }

    #[test]
    fn worker_on_target() {
        let level: Level = "#####\n#$ !#\n#####".parse().unwrap();
        assert_eq!(level.xsb().to_string(), "#####\n#$ +#\n#####\n");
        assert_eq!(level.warehouse().to_string(), "#####\n#$ !#\n#####\n");
        assert_eq!(
            level.format(Format::Warehouse).to_string(),
            level.warehouse().to_string()
        );
    }

    #[test]
    fn weights_in_row_major_order() {
        let level = r"
3 7 11
#######
#. $ .#
#$ @ .#
# $   #
#######
";
        let level: Level = level.parse().unwrap();
        let boxes = level.state.boxes();
        assert_eq!(boxes.len(), 3);
        let summary: Vec<_> = boxes.iter().map(|b| (b.id(), b.weight())).collect();
        assert_eq!(summary, vec![(0, 3), (1, 7), (2, 11)]);
        assert_eq!(boxes[0].pos(), Pos::new(1, 3));
        assert_eq!(boxes[2].pos(), Pos::new(3, 2));
        assert_eq!(level.map.goals.len(), 3);
    }

    #[test]
    fn trailing_whitespace_and_padding() {
        let level = "####  \n#@$.#   \n####\n";
        let level: Level = level.parse().unwrap();
        assert_eq!(level.map.grid.cols(), 5);
        assert_eq!(level.to_string(), "#### \n#@$.#\n#### \n");
    }

    #[test]
    fn original_1() {
        let level = r"
    #####
    #   #
    #$  #
  ###  $##
  #  $ $ #
### # ## #   ######
#   # ## #####  ..#
# $  $          ..#
##### ### #@##  ..#
    #     #########
    #######
";
        let level: Level = level.parse().unwrap();
        assert_eq!(level.state.boxes().len(), 6);
        assert_eq!(level.map.goals.len(), 6);
        assert_eq!(level.state.player_pos(), Pos::new(8, 11));

        let rendered = level.to_string();
        assert_eq!(rendered.lines().count(), 11);
        assert!(rendered.lines().all(|line| line.len() == 19));
    }

    fn assert_failure(input_level: &str, expected_err: ParserErr) {
        assert_eq!(input_level.parse::<Level>().unwrap_err(), expected_err);
    }

    fn assert_success(input_level: &str) {
        let level: Level = input_level.parse().unwrap();
        assert_eq!(level.to_string(), input_level.trim_start_matches('\n'));
    }
}
