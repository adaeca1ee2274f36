// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
// Clippy
#![allow(unknown_lints)] // necessary because rustc doesn't know about clippy
#![warn(clippy::all)]

#[macro_use]
extern crate log;

pub mod config;
pub mod level;
pub mod map_formatter;
pub mod moves;
pub mod solution_formatter;
pub mod solver;

mod data;
mod fs;
mod map;
mod parser;
mod state;
mod vec2d;

use std::error::Error;

use crate::config::Config;
use crate::level::Level;
use crate::solver::{SolverErr, SolverOk};

pub use crate::data::{Dir, ParseDirErr, Pos};
pub use crate::parser::ParserErr;
pub use crate::state::{State, WeightedBox};

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

pub trait Solve {
    fn solve(&self, config: &Config, print_status: bool) -> Result<SolverOk, SolverErr>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Strategy;
    use crate::solver::Outcome;

    #[test]
    fn test_levels() {
        // (level, cost or None if unsolvable)
        let levels = [
            ("custom/00-solved.txt", Some(0)),
            ("custom/01-corridor.txt", Some(5)),
            ("custom/02-two-weights.txt", Some(13)),
            ("custom/no-solution-corner.txt", None),
        ];

        for &strategy in &[Strategy::SumOfMinima, Strategy::Assignment] {
            for &(level_name, expected_cost) in &levels {
                let level_path = format!("levels/{}", level_name);
                let level = level_path.load_level().unwrap();
                let solver_ok = level.solve(&Config::new(strategy), false).unwrap();
                println!("{} using {}:\n{:?}", level_path, strategy, solver_ok);

                match expected_cost {
                    Some(cost) => {
                        let solution = solver_ok.solution().unwrap();
                        assert_eq!(solution.cost, cost, "{} using {}", level_path, strategy);
                        assert_eq!(solution.moves.cost(), cost);
                        // the solution actually solves the level
                        let final_state = level.replay(&solution.moves.dirs()).unwrap();
                        assert!(final_state
                            .box_positions()
                            .iter()
                            .all(|pos| level.goals().contains(pos)));
                    }
                    None => assert_eq!(solver_ok.outcome, Outcome::NoSolution),
                }
            }
        }
    }
}
