use std::cell::RefCell;

use fnv::{FnvHashMap, FnvHashSet};

use crate::config::Strategy;
use crate::data::Pos;
use crate::solver::Cost;
use crate::state::{State, WeightedBox};

/// Estimate of deadlocked states. Large enough to sort them after everything else
/// but finite so they're not removed from the search.
pub(crate) const DEADLOCK_COST: Cost = 1_000_000;

/// The assignment is `O(2^n * n)` in the number of goals.
pub(crate) const MAX_ASSIGNMENT_BOXES: usize = 16;

/// Weighted distance of boxes to goals. Moving a box one cell costs `1 + weight`.
pub(crate) struct CostHeuristic {
    goals: Vec<Pos>,
    strategy: Strategy,
    revisit_penalty: Cost,
    assignments: RefCell<FnvHashMap<Vec<WeightedBox>, Cost>>,
    seen_boxes: RefCell<FnvHashSet<Vec<Pos>>>,
}

impl CostHeuristic {
    pub(crate) fn new(goals: Vec<Pos>, strategy: Strategy, revisit_penalty: Cost) -> Self {
        let strategy = if strategy == Strategy::Assignment && goals.len() > MAX_ASSIGNMENT_BOXES {
            warn!(
                "{} goals is too many for the assignment heuristic, using {} instead",
                goals.len(),
                Strategy::SumOfMinima
            );
            Strategy::SumOfMinima
        } else {
            strategy
        };
        Self {
            goals,
            strategy,
            revisit_penalty,
            assignments: RefCell::new(FnvHashMap::default()),
            seen_boxes: RefCell::new(FnvHashSet::default()),
        }
    }

    pub(crate) fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Doesn't check deadlocks, that's up to the caller.
    pub(crate) fn estimate(&self, state: &State) -> Cost {
        let estimate = match self.strategy {
            Strategy::SumOfMinima => self.sum_of_minima(state.boxes()),
            Strategy::Assignment => self.assignment(state.boxes()),
        };
        estimate + self.penalty(state)
    }

    fn sum_of_minima(&self, boxes: &[WeightedBox]) -> Cost {
        boxes
            .iter()
            .map(|b| {
                self.goals
                    .iter()
                    .map(|&goal| box_cost(b, goal))
                    .min()
                    .unwrap_or(0)
            })
            .sum()
    }

    /// Cheapest way to put a different box on every goal, memoized per box configuration.
    fn assignment(&self, boxes: &[WeightedBox]) -> Cost {
        if let Some(&cost) = self.assignments.borrow().get(boxes) {
            return cost;
        }

        let cost = min_assignment(&self.goals, boxes);
        self.assignments.borrow_mut().insert(boxes.to_vec(), cost);
        cost
    }

    fn penalty(&self, state: &State) -> Cost {
        if self.revisit_penalty == 0 {
            return 0;
        }
        if self.seen_boxes.borrow_mut().insert(state.box_positions()) {
            0
        } else {
            self.revisit_penalty
        }
    }
}

fn box_cost(b: &WeightedBox, goal: Pos) -> Cost {
    Cost::from(b.pos().dist(goal)) * (1 + Cost::from(b.weight()))
}

/// DP over subsets of used goals: `best[mask]` is the cheapest way to place
/// the first `popcount(mask)` boxes on the goals in `mask`.
fn min_assignment(goals: &[Pos], boxes: &[WeightedBox]) -> Cost {
    if boxes.is_empty() {
        return 0;
    }
    let subsets = 1usize << goals.len();
    let mut best = vec![Cost::max_value(); subsets];
    best[0] = 0;

    let mut answer = Cost::max_value();
    for mask in 0..subsets {
        if best[mask] == Cost::max_value() {
            continue;
        }
        let placed = mask.count_ones() as usize;
        if placed == boxes.len() {
            answer = answer.min(best[mask]);
            continue;
        }
        let b = &boxes[placed];
        for (i, &goal) in goals.iter().enumerate() {
            let bit = 1 << i;
            if mask & bit != 0 {
                continue;
            }
            let cost = best[mask] + box_cost(b, goal);
            if cost < best[mask | bit] {
                best[mask | bit] = cost;
            }
        }
    }

    // more boxes than goals can't be assigned, fall back to something finite
    if answer == Cost::max_value() {
        0
    } else {
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_boxes(weights: (u32, u32)) -> State {
        State::new(
            Pos::new(2, 4),
            vec![
                WeightedBox::new(0, Pos::new(1, 2), weights.0),
                WeightedBox::new(1, Pos::new(1, 3), weights.1),
            ],
        )
    }

    fn goals() -> Vec<Pos> {
        vec![Pos::new(1, 1), Pos::new(1, 7)]
    }

    #[test]
    fn sum_of_minima() {
        let heuristic = CostHeuristic::new(goals(), Strategy::SumOfMinima, 0);
        // both boxes go for the left goal
        assert_eq!(heuristic.estimate(&two_boxes((0, 0))), 1 + 2);
        assert_eq!(heuristic.estimate(&two_boxes((2, 0))), 3 + 2);
    }

    #[test]
    fn assignment() {
        let heuristic = CostHeuristic::new(goals(), Strategy::Assignment, 0);
        assert_eq!(heuristic.estimate(&two_boxes((0, 0))), 1 + 4);
        assert_eq!(heuristic.estimate(&two_boxes((2, 0))), 3 + 4);
        // the heavy box takes the closer goal
        assert_eq!(heuristic.estimate(&two_boxes((0, 9))), 5 + 20);
        assert_eq!(heuristic.assignments.borrow().len(), 3);

        heuristic.estimate(&two_boxes((0, 0)));
        assert_eq!(heuristic.assignments.borrow().len(), 3);
    }

    #[test]
    fn boxes_on_goals_cost_nothing() {
        let state = State::new(
            Pos::new(2, 2),
            vec![
                WeightedBox::new(0, Pos::new(1, 1), 100),
                WeightedBox::new(1, Pos::new(1, 7), 100),
            ],
        );
        for &strategy in &[Strategy::SumOfMinima, Strategy::Assignment] {
            let heuristic = CostHeuristic::new(goals(), strategy, 0);
            assert_eq!(heuristic.estimate(&state), 0);
        }
    }

    #[test]
    fn revisit_penalty() {
        let heuristic = CostHeuristic::new(goals(), Strategy::SumOfMinima, 100);
        let state = two_boxes((0, 0));
        assert_eq!(heuristic.estimate(&state), 3);
        assert_eq!(heuristic.estimate(&state), 103);

        // only box positions matter
        let mut moved = state.clone();
        moved.player_pos = Pos::new(2, 5);
        assert_eq!(heuristic.estimate(&moved), 103);
    }

    #[test]
    fn too_many_goals_for_assignment() {
        let goals: Vec<_> = (1..=MAX_ASSIGNMENT_BOXES as u8 + 1)
            .map(|c| Pos::new(1, c))
            .collect();
        let heuristic = CostHeuristic::new(goals, Strategy::Assignment, 0);
        assert_eq!(heuristic.strategy(), Strategy::SumOfMinima);
    }
}
