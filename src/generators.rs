use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;
use tracing::debug;

use crate::cells::{Direction, Position};
use crate::grid::Grid;
use crate::units::{Height, Width};

/// Apply the recursive backtracker maze generation algorithm to a solid grid.
///
/// Walls and passages share the one grid: even coordinates are rooms, the odd cells
/// between two rooms are connectors. Starting at the origin room, the walk carves
/// towards a random unvisited room two cells away (carving the connector in between)
/// and backtracks along its stack whenever the current room has no unvisited rooms left.
/// Every room reachable from the origin gets visited exactly once, so the carved
/// passages form a tree: there are no cycles and one route between any two rooms.
///
/// With an even width or height the last column/row holds no rooms and stays wall.
pub fn recursive_backtracker<R>(width: Width, height: Height, rng: &mut R) -> Grid
    where R: Rng + ?Sized
{
    let mut grid = Grid::new(width, height);
    if grid.size() == 0 {
        return grid;
    }

    grid.carve(Position::ORIGIN);
    let mut stack = vec![Position::ORIGIN];

    while let Some(&current) = stack.last() {
        let unvisited_rooms = Direction::ALL
            .iter()
            .filter_map(|dir| grid.offset_within(current, *dir, 2))
            .filter(|room| !grid.is_passage(*room))
            .collect::<SmallVec<[Position; 4]>>();

        match unvisited_rooms.choose(rng) {
            Some(&next_room) => {
                grid.carve(current.midpoint(next_room));
                grid.carve(next_room);
                stack.push(next_room);
            }
            None => {
                stack.pop();
            }
        }
    }

    debug!(width = width.0,
           height = height.0,
           passages = grid.passage_count(),
           "carved maze");
    grid
}

/// Make sure the goal cell can be walked to.
///
/// Forces the goal to be a passage. If none of its neighbours are passages (only possible
/// when both grid dimensions are even, putting the goal diagonally off the last room)
/// the neighbour to its left, or above when there is no left, is carved as well. That
/// neighbour is a connector touching a room, so the goal hangs off the maze as a dead
/// end and the layout stays a tree.
///
/// Returns true if any cell had to be carved.
pub fn connect_goal(grid: &mut Grid, goal: Position) -> bool {
    let forced = grid.carve(goal);
    if goal == Position::ORIGIN || !grid.passage_neighbours(goal).is_empty() {
        return forced;
    }

    let link = grid.neighbour_at_direction(goal, Direction::Left)
        .or_else(|| grid.neighbour_at_direction(goal, Direction::Up));
    if let Some(link_coord) = link {
        debug!(goal = %goal, link = %link_coord, "carving link to isolated goal");
        grid.carve(link_coord);
    }
    true
}

/// Generate a maze whose goal is the bottom-right cell.
///
/// Returns the grid together with the goal position. Empty dimensions give an empty
/// grid and the origin as goal.
pub fn maze_with_goal<R>(width: Width, height: Height, rng: &mut R) -> (Grid, Position)
    where R: Rng + ?Sized
{
    let mut grid = recursive_backtracker(width, height, rng);
    let goal = grid.far_corner().unwrap_or(Position::ORIGIN);
    connect_goal(&mut grid, goal);
    (grid, goal)
}
