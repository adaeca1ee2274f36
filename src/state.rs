use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::data::{Dir, MapCell, Pos};
use crate::vec2d::Vec2d;

/// A box with its weight. The id is assigned at load time (in input order)
/// and never changes, it's only a label - two boxes with the same position and weight
/// are interchangeable so it's ignored by comparisons and hashing.
#[derive(Debug, Clone, Copy)]
pub struct WeightedBox {
    pub(crate) id: u8,
    pub(crate) pos: Pos,
    pub(crate) weight: u32,
}

impl WeightedBox {
    pub(crate) fn new(id: u8, pos: Pos, weight: u32) -> Self {
        WeightedBox { id, pos, weight }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }
}

impl PartialEq for WeightedBox {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.weight == other.weight
    }
}

impl Eq for WeightedBox {}

impl Hash for WeightedBox {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
        self.weight.hash(state);
    }
}

impl PartialOrd for WeightedBox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightedBox {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.pos, self.weight).cmp(&(other.pos, other.weight))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub(crate) player_pos: Pos,
    /// Always sorted by position, no two boxes on the same cell.
    pub(crate) boxes: Vec<WeightedBox>,
}

impl State {
    pub(crate) fn new(player_pos: Pos, mut boxes: Vec<WeightedBox>) -> State {
        // sort to detect equal states when we reorder boxes
        boxes.sort();
        State { player_pos, boxes }
    }

    pub fn player_pos(&self) -> Pos {
        self.player_pos
    }

    pub fn boxes(&self) -> &[WeightedBox] {
        &self.boxes
    }

    /// Sorted.
    pub fn box_positions(&self) -> Vec<Pos> {
        self.boxes.iter().map(|b| b.pos).collect()
    }

    /// Index into `boxes`.
    pub(crate) fn box_at(&self, pos: Pos) -> Option<usize> {
        self.boxes.binary_search_by_key(&pos, |b| b.pos).ok()
    }

    pub(crate) fn has_box(&self, pos: Pos) -> bool {
        self.box_at(pos).is_some()
    }

    /// Whether the player can step or push in `dir`:
    /// the destination is not a wall and if it holds a box, the cell behind is free.
    pub(crate) fn can_move(&self, grid: &Vec2d<MapCell>, dir: Dir) -> bool {
        let new_player_pos = self.player_pos + dir;
        if grid[new_player_pos] == MapCell::Wall {
            return false;
        }
        if !self.has_box(new_player_pos) {
            return true;
        }
        let push_dest = new_player_pos + dir;
        grid[push_dest] != MapCell::Wall && !self.has_box(push_dest)
    }

    /// Applies a move without checking it - use `can_move` first.
    pub(crate) fn moved(&self, dir: Dir) -> State {
        let new_player_pos = self.player_pos + dir;
        let mut new_boxes = self.boxes.clone();
        if let Some(index) = self.box_at(new_player_pos) {
            new_boxes[index].pos = new_player_pos + dir;
        }
        State::new(new_player_pos, new_boxes)
    }

    /// The box that is in `self` but not in `prev` - the one that was pushed if any.
    pub(crate) fn pushed_box(&self, prev: &State) -> Option<&WeightedBox> {
        self.boxes.iter().find(|b| !prev.has_box(b.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Vec2d<MapCell> {
        let wall = vec![MapCell::Wall; 6];
        let mut row = vec![MapCell::Empty; 6];
        row[0] = MapCell::Wall;
        row[5] = MapCell::Wall;
        Vec2d::new(&[wall.clone(), row, wall])
    }

    #[test]
    fn boxes_are_sorted() {
        let boxes = vec![
            WeightedBox::new(0, Pos::new(2, 1), 3),
            WeightedBox::new(1, Pos::new(1, 4), 7),
            WeightedBox::new(2, Pos::new(1, 2), 0),
        ];
        let state = State::new(Pos::new(1, 1), boxes.clone());
        assert_eq!(
            state.box_positions(),
            vec![Pos::new(1, 2), Pos::new(1, 4), Pos::new(2, 1)]
        );
        assert_eq!(state.boxes()[1].id(), 1);
        assert_eq!(state.boxes()[1].weight(), 7);

        let mut reversed = boxes;
        reversed.reverse();
        assert_eq!(State::new(Pos::new(1, 1), reversed), state);
    }

    #[test]
    fn ids_are_ignored_by_equality() {
        let a = State::new(
            Pos::new(1, 1),
            vec![
                WeightedBox::new(0, Pos::new(1, 2), 1),
                WeightedBox::new(1, Pos::new(1, 3), 1),
            ],
        );
        let b = State::new(
            Pos::new(1, 1),
            vec![
                WeightedBox::new(1, Pos::new(1, 2), 1),
                WeightedBox::new(0, Pos::new(1, 3), 1),
            ],
        );
        assert_eq!(a, b);

        let heavier = State::new(
            Pos::new(1, 1),
            vec![
                WeightedBox::new(0, Pos::new(1, 2), 2),
                WeightedBox::new(1, Pos::new(1, 3), 1),
            ],
        );
        assert_ne!(a, heavier);
    }

    #[test]
    fn moving_and_pushing() {
        let grid = corridor();
        let state = State::new(
            Pos::new(1, 1),
            vec![WeightedBox::new(0, Pos::new(1, 3), 4)],
        );

        assert!(!state.can_move(&grid, Dir::Up));
        assert!(!state.can_move(&grid, Dir::Left));
        assert!(state.can_move(&grid, Dir::Right));

        let stepped = state.moved(Dir::Right);
        assert_eq!(stepped.player_pos(), Pos::new(1, 2));
        assert_eq!(stepped.boxes, state.boxes);
        assert!(stepped.pushed_box(&state).is_none());

        let pushed = stepped.moved(Dir::Right);
        assert_eq!(pushed.player_pos(), Pos::new(1, 3));
        assert_eq!(pushed.box_positions(), vec![Pos::new(1, 4)]);
        let moved_box = pushed.pushed_box(&stepped).unwrap();
        assert_eq!(moved_box.id(), 0);
        assert_eq!(moved_box.weight(), 4);

        // box against the wall
        assert!(!pushed.can_move(&grid, Dir::Right));
    }

    #[test]
    fn pushing_into_another_box() {
        let grid = corridor();
        let state = State::new(
            Pos::new(1, 1),
            vec![
                WeightedBox::new(0, Pos::new(1, 2), 0),
                WeightedBox::new(1, Pos::new(1, 3), 0),
            ],
        );
        assert!(!state.can_move(&grid, Dir::Right));
    }
}
