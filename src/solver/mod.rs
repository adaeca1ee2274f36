pub(crate) mod a_star;
pub(crate) mod backtracking;
pub(crate) mod deadlock;
#[cfg(feature = "graph")]
mod graph;
pub(crate) mod heuristic;
pub(crate) mod preprocessing;
pub(crate) mod reachability;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::config::{Config, Strategy};
use crate::data::{Dir, MapCell, DIRECTIONS};
use crate::level::Level;
use crate::map::GoalMap;
use crate::moves::Moves;
use crate::state::State;
use crate::Solve;

use self::a_star::{Problem, SearchOutcome};
use self::backtracking::reconstruct_moves;
use self::deadlock::DeadlockDetector;
use self::heuristic::{CostHeuristic, DEADLOCK_COST};
use self::preprocessing::{check_reachability, find_taboo_cells};

pub use self::a_star::Stats;
pub use self::deadlock::Deadlock;

pub type Cost = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    IncompleteBorder,
    UnreachableBoxes,
    UnreachableGoals,
    BoxesGoals,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::IncompleteBorder => write!(f, "Incomplete border"),
            SolverErr::UnreachableBoxes => write!(
                f,
                "Unreachable boxes - some boxes are not on goal but can't be reached"
            ),
            SolverErr::UnreachableGoals => write!(
                f,
                "Unreachable goals - some goals don't have a box but can't be reached"
            ),
            SolverErr::BoxesGoals => write!(f, "Different number of reachable boxes and goals"),
        }
    }
}

impl Error for SolverErr {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub moves: Moves,
    /// Steps cost 1, pushes `1 + weight` of the pushed box.
    pub cost: Cost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// The whole reachable state space was searched.
    NoSolution,
    /// Stopped after expanding `Config::max_nodes` states.
    BudgetExhausted,
}

pub struct SolverOk {
    pub outcome: Outcome,
    pub stats: Stats,
    pub(crate) strategy: Strategy,
}

impl SolverOk {
    fn new(outcome: Outcome, stats: Stats, strategy: Strategy) -> Self {
        Self {
            outcome,
            stats,
            strategy,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self.outcome {
            Outcome::Solved(ref solution) => Some(solution),
            _ => None,
        }
    }

    /// Can differ from the requested one when there are too many boxes.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Solved(ref solution) => writeln!(
                f,
                "{}: {} moves, {} pushes, cost {}",
                self.strategy,
                solution.moves.move_cnt(),
                solution.moves.push_cnt(),
                solution.cost
            )?,
            Outcome::NoSolution => writeln!(f, "No solution")?,
            Outcome::BudgetExhausted => writeln!(f, "Budget exhausted")?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, config: &Config, print_status: bool) -> Result<SolverOk, SolverErr> {
        debug!("Processing level...");
        let solver = Solver::new(self, config)?;
        debug!("Processed level");

        let strategy = solver.heuristic.strategy();
        if solver.is_goal(&solver.initial_state) {
            info!("Level is already solved");
            let solution = Solution {
                moves: Moves::default(),
                cost: 0,
            };
            return Ok(SolverOk::new(Outcome::Solved(solution), Stats::new(), strategy));
        }

        info!("Searching using {}", strategy);
        let result = a_star::search(&solver, config.max_nodes, print_status);
        let outcome = match result.outcome {
            SearchOutcome::Found { actions, cost } => {
                let moves = reconstruct_moves(&solver.initial_state, &actions);
                info!("Found solution with cost {}", cost);
                Outcome::Solved(Solution { moves, cost })
            }
            SearchOutcome::Exhausted => {
                info!("No solution");
                Outcome::NoSolution
            }
            SearchOutcome::BudgetExceeded => {
                info!("No solution within {:?} expanded states", config.max_nodes);
                Outcome::BudgetExhausted
            }
        };
        Ok(SolverOk::new(outcome, result.stats, strategy))
    }
}

/// Only the parts of the level the worker can get to, plus everything derived from them.
#[derive(Debug, Clone)]
pub(crate) struct ProcessedLevel {
    pub(crate) map: GoalMap,
    pub(crate) state: State,
}

pub(crate) fn process_level(level: &Level) -> Result<ProcessedLevel, SolverErr> {
    // Guarantees we have here:
    // - the player exists and therefore map is at least 1x1.
    // - rows and cols is <= 255
    let processed_grid = check_reachability(&level.map.grid, level.state.player_pos)?;
    let reachable = |pos| processed_grid[pos] != MapCell::Wall;

    // boxes already on goals in unreachable parts of the map are irrelevant
    let mut reachable_boxes = Vec::new();
    for b in &level.state.boxes {
        if reachable(b.pos) {
            reachable_boxes.push(*b);
        } else if !level.map.is_goal(b.pos) {
            return Err(SolverErr::UnreachableBoxes);
        }
    }
    let mut reachable_goals = Vec::new();
    for &goal in &level.map.goals {
        if reachable(goal) {
            reachable_goals.push(goal);
        } else if !level.state.has_box(goal) {
            return Err(SolverErr::UnreachableGoals);
        }
    }

    if reachable_boxes.len() != reachable_goals.len() {
        return Err(SolverErr::BoxesGoals);
    }

    Ok(ProcessedLevel {
        map: GoalMap::new(processed_grid, reachable_goals),
        state: State::new(level.state.player_pos, reachable_boxes),
    })
}

/// Moving boxes around a processed level. Owns all the caches used during one search.
pub(crate) struct Solver {
    map: GoalMap,
    initial_state: State,
    deadlocks: DeadlockDetector,
    heuristic: CostHeuristic,
}

impl Solver {
    pub(crate) fn new(level: &Level, config: &Config) -> Result<Self, SolverErr> {
        let ProcessedLevel { map, state } = process_level(level)?;
        let taboo = find_taboo_cells(&map.grid);
        let deadlocks = DeadlockDetector::new(map.grid.clone(), taboo);
        let heuristic =
            CostHeuristic::new(map.goals.clone(), config.strategy, config.revisit_penalty);
        Ok(Solver {
            map,
            initial_state: state,
            deadlocks,
            heuristic,
        })
    }

    pub(crate) fn deadlock(&self, state: &State) -> Option<Deadlock> {
        self.deadlocks.detect(state)
    }
}

impl Problem for Solver {
    type State = State;
    type Action = Dir;

    fn initial_state(&self) -> State {
        self.initial_state.clone()
    }

    fn actions(&self, state: &State) -> Vec<Dir> {
        if *state != self.initial_state && self.deadlocks.is_taboo_deadlock(state) {
            return Vec::new();
        }

        let grid = &self.map.grid;
        let player_pos = state.player_pos;
        let reachable = reachability::reachable(grid, player_pos, state);

        let mut actions = Vec::new();
        for &dir in &DIRECTIONS {
            let new_player_pos = player_pos + dir;
            if grid[new_player_pos] == MapCell::Wall {
                continue;
            }
            if state.has_box(new_player_pos) {
                let push_dest = new_player_pos + dir;
                if reachable[player_pos]
                    && grid[push_dest] != MapCell::Wall
                    && !state.has_box(push_dest)
                {
                    actions.push(dir);
                }
            } else if reachable[new_player_pos] {
                actions.push(dir);
            }
        }
        actions
    }

    fn result(&self, state: &State, action: Dir) -> State {
        state.moved(action)
    }

    fn is_goal(&self, state: &State) -> bool {
        // all boxes on goals, box and goal counts are equal after processing
        state.boxes.iter().all(|b| self.map.is_goal(b.pos))
    }

    fn step_cost(&self, prev: &State, _action: Dir, next: &State) -> Cost {
        match next.pushed_box(prev) {
            Some(b) => 1 + Cost::from(b.weight),
            None => 1,
        }
    }

    fn estimate(&self, state: &State) -> Cost {
        match self.deadlock(state) {
            Some(deadlock) if deadlock.is_permanent() => {
                trace!("Deadlock ({}):\n{}", deadlock, self.map.xsb_with_state(state));
                DEADLOCK_COST
            }
            // other boxes can still move out of the way
            Some(deadlock) => {
                trace!("Blocked ({}):\n{}", deadlock, self.map.xsb_with_state(state));
                self.heuristic.estimate(state)
            }
            None => self.heuristic.estimate(state),
        }
    }

    #[cfg(feature = "graph")]
    fn describe(&self, state: &State) -> String {
        self.map.xsb_with_state(state).to_string()
    }
}
