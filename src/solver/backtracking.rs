use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use crate::data::Dir;
use crate::moves::{Move, Moves};
use crate::state::State;

// Terminology:
// move = changing player position by one cell
// push = a move that changes a box position
// step = a move that doesn't change a box position

/// Follows `prevs` back to the start. The start maps to itself.
pub(crate) fn backtrack_prevs<T: Clone + Eq + Hash, H: BuildHasher>(
    prevs: &HashMap<T, T, H>,
    final_state: T,
) -> Vec<T> {
    let mut states = Vec::new();
    let mut cur = &final_state;
    loop {
        states.push(cur.clone());
        let prev = &prevs[cur];
        if prev == cur {
            states.reverse();
            return states;
        }
        cur = prev;
    }
}

/// Actions leading from the initial state (the one without a predecessor) to `final_state`.
pub(crate) fn backtrack_actions<S: Eq + Hash, A: Copy, H: BuildHasher>(
    prevs: &HashMap<&S, Option<(&S, A)>, H>,
    final_state: &S,
) -> Vec<A> {
    let mut actions = Vec::new();
    let mut cur = final_state;
    while let Some((prev, action)) = prevs[cur] {
        actions.push(action);
        cur = prev;
    }
    actions.reverse();
    actions
}

/// Marks which directions push a box and how heavy it is.
pub(crate) fn reconstruct_moves(initial_state: &State, dirs: &[Dir]) -> Moves {
    let mut moves = Moves::default();
    let mut state = initial_state.clone();
    for &dir in dirs {
        let mov = match state.box_at(state.player_pos + dir) {
            Some(index) => Move::push(dir, state.boxes[index].weight),
            None => Move::step(dir),
        };
        moves.add(mov);
        state = state.moved(dir);
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    use fnv::FnvHashMap;

    use crate::data::Pos;
    use crate::level::Level;

    #[test]
    fn backtracking_positions() {
        let mut prevs = FnvHashMap::default();
        prevs.insert(Pos::new(1, 1), Pos::new(1, 1));
        prevs.insert(Pos::new(1, 2), Pos::new(1, 1));
        prevs.insert(Pos::new(2, 2), Pos::new(1, 2));
        prevs.insert(Pos::new(5, 5), Pos::new(1, 1));
        assert_eq!(
            backtrack_prevs(&prevs, Pos::new(2, 2)),
            vec![Pos::new(1, 1), Pos::new(1, 2), Pos::new(2, 2)]
        );
    }

    #[test]
    fn backtracking_actions() {
        let (a, b, c) = (1, 2, 3);
        let mut prevs = FnvHashMap::default();
        prevs.insert(&a, None);
        prevs.insert(&b, Some((&a, Dir::Left)));
        prevs.insert(&c, Some((&b, Dir::Up)));
        assert_eq!(backtrack_actions(&prevs, &c), vec![Dir::Left, Dir::Up]);
        assert!(backtrack_actions(&prevs, &a).is_empty());
    }

    #[test]
    fn marking_pushes() {
        let level: Level = r"
4
#######
#@ $ .#
#######
"
        .parse()
        .unwrap();
        let moves = reconstruct_moves(
            &level.state,
            &[Dir::Right, Dir::Right, Dir::Right, Dir::Left, Dir::Right],
        );
        assert_eq!(moves.to_string(), "rRRlr");
        assert_eq!(moves.push_cnt(), 2);
        assert_eq!(moves.cost(), 3 + 5 + 5);
    }
}
