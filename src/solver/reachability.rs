use std::collections::VecDeque;

use fnv::FnvHashMap;

use crate::data::{MapCell, Pos, DIRECTIONS};
use crate::moves::{Move, Moves};
use crate::solver::backtracking::backtrack_prevs;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Cells the player can walk to from `player_pos` without pushing anything.
pub(crate) fn reachable(grid: &Vec2d<MapCell>, player_pos: Pos, state: &State) -> Vec2d<bool> {
    let mut visited = grid.scratchpad();
    visited[player_pos] = true;

    let mut to_visit = VecDeque::new();
    to_visit.push_back(player_pos);

    while let Some(cur) = to_visit.pop_front() {
        for &dir in &DIRECTIONS {
            let next = cur + dir;
            if visited[next] || grid[next] == MapCell::Wall || state.has_box(next) {
                continue;
            }
            visited[next] = true;
            to_visit.push_back(next);
        }
    }

    visited
}

/// Shortest walk from `src_pos` to `dest_pos` around the boxes of `state`, `None` if there's none.
pub(crate) fn player_steps(
    grid: &Vec2d<MapCell>,
    state: &State,
    src_pos: Pos,
    dest_pos: Pos,
) -> Option<Moves> {
    let mut prevs = FnvHashMap::default();
    prevs.insert(src_pos, src_pos);

    let mut to_visit = VecDeque::new();
    to_visit.push_back(src_pos);

    while let Some(player_pos) = to_visit.pop_front() {
        if player_pos == dest_pos {
            break;
        }
        for &dir in &DIRECTIONS {
            let new_player_pos = player_pos + dir;
            if grid[new_player_pos] == MapCell::Wall
                || state.has_box(new_player_pos)
                || prevs.contains_key(&new_player_pos)
            {
                continue;
            }
            prevs.insert(new_player_pos, player_pos);
            to_visit.push_back(new_player_pos);
        }
    }

    if !prevs.contains_key(&dest_pos) {
        return None;
    }

    let positions = backtrack_prevs(&prevs, dest_pos);
    let mut moves = Moves::default();
    for pair in positions.windows(2) {
        moves.add(Move::step(pair[0].dir_to(pair[1])));
    }
    Some(moves)
}
