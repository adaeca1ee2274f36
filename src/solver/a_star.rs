use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;

use fnv::FnvHashMap;
use prettytable::{format, Cell, Row, Table};
use separator::Separatable;
use typed_arena::Arena;

#[cfg(feature = "graph")]
use crate::solver::graph::Graph;

use crate::solver::backtracking::backtrack_actions;
use crate::solver::Cost;

/// What the search needs to know about a puzzle.
pub(crate) trait Problem {
    type State: Clone + Eq + Hash + Debug;
    type Action: Copy + Debug;

    fn initial_state(&self) -> Self::State;

    /// Legal actions in a fixed order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn result(&self, state: &Self::State, action: Self::Action) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    fn step_cost(&self, prev: &Self::State, action: Self::Action, next: &Self::State) -> Cost;

    /// Lower is more promising.
    fn estimate(&self, state: &Self::State) -> Cost;

    #[cfg(feature = "graph")]
    fn describe(&self, state: &Self::State) -> String {
        format!("{:?}", state)
    }
}

#[derive(Debug)]
pub(crate) enum SearchOutcome<A> {
    Found { actions: Vec<A>, cost: Cost },
    Exhausted,
    BudgetExceeded,
}

#[derive(Debug)]
pub(crate) struct SearchResult<A> {
    pub(crate) outcome: SearchOutcome<A>,
    pub(crate) stats: Stats,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<u64>,
    visited_states: Vec<u64>,
    duplicate_states: Vec<u64>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> u64 {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    fn add_created<S, A>(&mut self, node: &SearchNode<'_, S, A>) -> bool {
        Self::add(&mut self.created_states, node.depth)
    }

    fn add_unique_visited<S, A>(&mut self, node: &SearchNode<'_, S, A>) -> bool {
        Self::add(&mut self.visited_states, node.depth)
    }

    fn add_reached_duplicate<S, A>(&mut self, node: &SearchNode<'_, S, A>) -> bool {
        Self::add(&mut self.duplicate_states, node.depth)
    }

    /// Returns true when reaching a new depth.
    fn add(counts: &mut Vec<u64>, depth: u32) -> bool {
        let depth = depth as usize;
        let mut ret = false;

        // while because some depths might be skipped
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn depth_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.set_titles(Row::new(vec![
            Cell::new("Depth"),
            Cell::new("Created"),
            Cell::new("Unique"),
            Cell::new("Duplicates"),
            Cell::new("Unknown (not reached)"),
        ]));

        // created_states should be the longest vec
        for (depth, &created) in self.created_states.iter().enumerate() {
            let visited = self.visited_states.get(depth).cloned().unwrap_or(0);
            let duplicates = self.duplicate_states.get(depth).cloned().unwrap_or(0);
            let left = created.saturating_sub(visited + duplicates);
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", depth)),
                Cell::new(&created.separated_string()),
                Cell::new(&visited.separated_string()),
                Cell::new(&duplicates.separated_string()),
                Cell::new(&left.separated_string()),
            ]));
        }
        table
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let visited = self.total_unique_visited();
        let duplicates = self.total_reached_duplicates();
        let left = created.saturating_sub(visited + duplicates);
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique visited total: {}", visited.separated_string())?;
        writeln!(f, "Reached duplicates total: {}", duplicates.separated_string())?;
        writeln!(f, "Created but not reached total: {}", left.separated_string())?;
        writeln!(f)?;
        write!(f, "{}", self.depth_table())
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "total created / unique visited / reached duplicates:")?;
        writeln!(
            f,
            "{:<16}{:<17}{}",
            self.total_created().separated_string(),
            self.total_unique_visited().separated_string(),
            self.total_reached_duplicates().separated_string()
        )
    }
}

#[derive(Debug)]
struct SearchNode<'a, S, A> {
    state: &'a S,
    prev: Option<(&'a S, A)>,
    depth: u32,
    /// Path cost so far.
    cost: Cost,
    /// Path cost + estimate.
    total: Cost,
    /// Order of creation, also the node's index in the graph.
    seq: usize,
}

impl<'a, S, A> SearchNode<'a, S, A> {
    fn new(
        state: &'a S,
        prev: Option<(&'a S, A)>,
        depth: u32,
        cost: Cost,
        estimate: Cost,
        seq: usize,
    ) -> Self {
        Self {
            state,
            prev,
            depth,
            cost,
            total: cost.saturating_add(estimate),
            seq,
        }
    }
}

impl<S, A> Ord for SearchNode<'_, S, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap:
        // lowest total first, then deepest (highest cost), then oldest
        other
            .total
            .cmp(&self.total)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S, A> PartialOrd for SearchNode<'_, S, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, A> PartialEq for SearchNode<'_, S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<S, A> Eq for SearchNode<'_, S, A> {}

/// A* graph search. `max_nodes` limits the number of expanded (unique visited) states.
pub(crate) fn search<P: Problem>(
    problem: &P,
    max_nodes: Option<u64>,
    print_status: bool,
) -> SearchResult<P::Action> {
    debug!("Search called");

    let arena = Arena::new();
    let mut stats = Stats::new();
    let mut to_visit = BinaryHeap::new();
    let mut prevs = FnvHashMap::default();
    let mut seq = 0;

    #[cfg(feature = "graph")]
    let mut graph = Graph::new();

    let start: &P::State = arena.alloc(problem.initial_state());
    let start_node = SearchNode::new(start, None, 0, 0, problem.estimate(start), seq);
    seq += 1;
    stats.add_created(&start_node);
    #[cfg(feature = "graph")]
    graph.add(label(problem, &start_node), None);
    to_visit.push(start_node);

    while let Some(cur_node) = to_visit.pop() {
        if prevs.contains_key(cur_node.state) {
            stats.add_reached_duplicate(&cur_node);
            #[cfg(feature = "graph")]
            graph.mark_duplicate(cur_node.seq);
            continue;
        }

        if let Some(max_nodes) = max_nodes {
            if stats.total_unique_visited() >= max_nodes {
                debug!("Reached the limit of {} expanded states", max_nodes);
                #[cfg(feature = "graph")]
                graph.draw();
                return SearchResult {
                    outcome: SearchOutcome::BudgetExceeded,
                    stats,
                };
            }
        }

        if stats.add_unique_visited(&cur_node) && print_status {
            println!("Visited new depth: {}", cur_node.depth);
            println!("{:?}", stats);
        }
        #[cfg(feature = "graph")]
        graph.mark_unique(cur_node.seq);

        // insert here and not as soon as we discover it
        // otherwise we overwrite the cheapest path with more expensive ones
        prevs.insert(cur_node.state, cur_node.prev);

        if problem.is_goal(cur_node.state) {
            debug!("Solved, backtracking path");
            #[cfg(feature = "graph")]
            graph.draw();
            return SearchResult {
                outcome: SearchOutcome::Found {
                    actions: backtrack_actions(&prevs, cur_node.state),
                    cost: cur_node.cost,
                },
                stats,
            };
        }

        for action in problem.actions(cur_node.state) {
            let next_state: &P::State = arena.alloc(problem.result(cur_node.state, action));
            let cost =
                cur_node.cost + problem.step_cost(cur_node.state, action, next_state);
            let next_node = SearchNode::new(
                next_state,
                Some((cur_node.state, action)),
                cur_node.depth + 1,
                cost,
                problem.estimate(next_state),
                seq,
            );
            seq += 1;
            stats.add_created(&next_node);
            #[cfg(feature = "graph")]
            graph.add(label(problem, &next_node), Some(cur_node.seq));
            to_visit.push(next_node);
        }
    }

    debug!("Frontier exhausted");
    #[cfg(feature = "graph")]
    graph.draw();
    SearchResult {
        outcome: SearchOutcome::Exhausted,
        stats,
    }
}

#[cfg(feature = "graph")]
fn label<P: Problem>(problem: &P, node: &SearchNode<'_, P::State, P::Action>) -> String {
    format!(
        "d: {}, h: {}\ncost: {}\n{}",
        node.depth,
        node.total - node.cost,
        node.total,
        problem.describe(node.state)
    )
}
