use crate::data::{Dir, MapCell, Pos, DIRECTIONS};
use crate::solver::SolverErr;
use crate::vec2d::Vec2d;

/// Flood fills from the player ignoring boxes and turns everything that wasn't reached into walls.
pub(crate) fn check_reachability(
    grid: &Vec2d<MapCell>,
    player_pos: Pos,
) -> Result<Vec2d<MapCell>, SolverErr> {
    // make sure the level is surrounded by wall
    let mut visited = grid.scratchpad();

    let mut to_visit = vec![player_pos];
    visited[player_pos] = true;
    while let Some(cur) = to_visit.pop() {
        let (r, c) = (i32::from(cur.r), i32::from(cur.c));
        let neighbors = [(r - 1, c), (r, c + 1), (r + 1, c), (r, c - 1)];
        for &(nr, nc) in &neighbors {
            // this is the only place in the solver where we need to check bounds (using signed types)
            // everything after that will be surrounded by walls
            if nr < 0 || nc < 0 || nr >= i32::from(grid.rows()) || nc >= i32::from(grid.cols()) {
                // we got out of bounds without hitting a wall
                return Err(SolverErr::IncompleteBorder);
            }

            let new_pos = Pos::new(nr as u8, nc as u8);
            if !visited[new_pos] && grid[new_pos] != MapCell::Wall {
                visited[new_pos] = true;
                to_visit.push(new_pos);
            }
        }
    }

    // make sure all non-reachable cells are walls
    // to avoid errors with some code that iterates through all non-walls
    let mut processed_grid = grid.clone();
    for pos in processed_grid.positions() {
        if !visited[pos] {
            processed_grid[pos] = MapCell::Wall;
        }
    }

    Ok(processed_grid)
}

/// Cells (never goals) where a box can't be pushed out of.
///
/// Expects a grid from `check_reachability` so every non-wall cell is surrounded.
pub(crate) fn find_taboo_cells(grid: &Vec2d<MapCell>) -> Vec2d<bool> {
    let mut taboo = grid.scratchpad();

    let corners: Vec<_> = grid
        .positions()
        .filter(|&pos| grid[pos] == MapCell::Empty && is_corner(grid, pos))
        .collect();
    for &corner in &corners {
        taboo[corner] = true;
    }

    // corners are sorted row-major so the second one is always to the right or below
    for (i, &start) in corners.iter().enumerate() {
        for &end in &corners[i + 1..] {
            if start.r == end.r {
                mark_wall_segment(grid, &mut taboo, start, end, Dir::Right);
            } else if start.c == end.c {
                mark_wall_segment(grid, &mut taboo, start, end, Dir::Down);
            }
        }
    }

    debug!(
        "Found {} taboo cells, {} of them corners",
        taboo.positions().filter(|&pos| taboo[pos]).count(),
        corners.len()
    );

    taboo
}

/// Walls on two perpendicular sides.
fn is_corner(grid: &Vec2d<MapCell>, pos: Pos) -> bool {
    DIRECTIONS
        .iter()
        .any(|&dir| grid[pos + dir] == MapCell::Wall && grid[pos + dir.clockwise()] == MapCell::Wall)
}

/// Marks the cells between two corners if a box could only slide between them along a wall.
fn mark_wall_segment(
    grid: &Vec2d<MapCell>,
    taboo: &mut Vec2d<bool>,
    start: Pos,
    end: Pos,
    dir: Dir,
) {
    if grid[start - dir] != MapCell::Wall || grid[end + dir] != MapCell::Wall {
        return;
    }

    let side = dir.clockwise();
    let mut gaps = 0;
    let mut cells = Vec::new();
    let mut cur = start + dir;
    while cur != end {
        // a goal or a wall in between breaks the segment
        if grid[cur] != MapCell::Empty {
            return;
        }
        if grid[cur + side] != MapCell::Wall && grid[cur - side] != MapCell::Wall {
            gaps += 1;
            if gaps > 1 {
                return;
            }
        }
        cells.push(cur);
        cur = cur + dir;
    }

    for cell in cells {
        taboo[cell] = true;
    }
}
