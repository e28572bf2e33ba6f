use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::cells::Position;
use crate::grid::Grid;

/// Walking distances from one start cell to every passage cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Position,
    distances: FnvHashMap<Position, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start`, one step per frontier.
    ///
    /// Returns None if `start` is not a passage on the grid.
    pub fn new(grid: &Grid, start_coordinate: Position) -> Option<Distances> {

        if !grid.is_passage(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances =
            FnvHashMap::with_capacity_and_hasher(grid.passage_count(), Default::default());
        distances.insert(start_coordinate, 0);

        // Every step costs one, so the first time a cell is reached is its shortest distance
        // and the map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in grid.passage_neighbours(*cell_coord) {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Position {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Position) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// The cells at the maximum distance, in row-major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Position; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Position; 8]>>();
        furthest.sort_by_key(|coord| (coord.y, coord.x));
        furthest
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a
/// neighbour one closer to the start.
///
/// Returns the path start first, or None if `end_point` is not reachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Position)
                     -> Option<Vec<Position>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        let closer = grid.passage_neighbours(current_coord)
            .into_iter()
            .find(|neighbour| {
                distances_from_start.distance_from_start_to(*neighbour) ==
                Some(current_distance - 1)
            });

        match closer {
            Some(closer_coord) => {
                current_coord = closer_coord;
                current_distance -= 1;
                path.push(current_coord);
            }
            // The distances were computed for some other grid.
            None => return None,
        }
    }

    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Height, Width};

    // S . #
    // # . #
    // # . .
    fn snake() -> Grid {
        let mut g = Grid::new(Width(3), Height(3));
        for &(x, y) in &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)] {
            g.carve(Position::new(x, y));
        }
        g
    }

    #[test]
    fn distances_construction_requires_passage_start() {
        let g = snake();
        assert!(Distances::new(&g, Position::new(0, 1)).is_none());
        assert!(Distances::new(&g, Position::new(u32::MAX, u32::MAX)).is_none());
    }

    #[test]
    fn start() {
        let g = snake();
        let distances = Distances::new(&g, Position::new(1, 1)).unwrap();
        assert_eq!(distances.start(), Position::new(1, 1));
        assert_eq!(distances.distance_from_start_to(Position::new(1, 1)), Some(0));
    }

    #[test]
    fn distances_along_corridor() {
        let g = snake();
        let distances = Distances::new(&g, Position::ORIGIN).unwrap();
        assert_eq!(distances.len(), 5);
        assert_eq!(distances.max(), 4);
        assert_eq!(distances.distance_from_start_to(Position::new(1, 2)), Some(3));
        assert_eq!(distances.distance_from_start_to(Position::new(0, 2)), None);
        assert_eq!(&*distances.furthest_points_on_grid(), &[Position::new(2, 2)]);
    }

    #[test]
    fn unreachable_cells_have_no_distance() {
        // S . # # X
        // # . # # #
        // # . . # #
        let mut g = Grid::new(Width(5), Height(3));
        for &(x, y) in &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2), (4, 0)] {
            g.carve(Position::new(x, y));
        }
        let island = Position::new(4, 0);
        assert!(g.passage_neighbours(island).is_empty());

        let distances = Distances::new(&g, Position::ORIGIN).unwrap();
        assert_eq!(distances.len(), 5);
        assert_eq!(distances.distance_from_start_to(island), None);
        assert_eq!(shortest_path(&g, &distances, island), None);
        assert_eq!(shortest_path(&g, &distances, Position::new(3, 0)), None);
    }

    #[test]
    fn path_through_corridor() {
        let g = snake();
        let distances = Distances::new(&g, Position::ORIGIN).unwrap();
        let path = shortest_path(&g, &distances, Position::new(2, 2)).unwrap();
        assert_eq!(path,
                   vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1),
                        Position::new(1, 2), Position::new(2, 2)]);
        assert_eq!(shortest_path(&g, &distances, Position::ORIGIN), Some(vec![Position::ORIGIN]));
    }

    #[test]
    fn path_with_foreign_distances() {
        let g = snake();
        let distances = Distances::new(&g, Position::ORIGIN).unwrap();
        let mut other = Grid::new(Width(3), Height(3));
        other.carve(Position::new(2, 2));
        assert_eq!(shortest_path(&other, &distances, Position::new(2, 2)), None);
    }

    #[test]
    fn open_room_furthest_points() {
        let mut g = Grid::new(Width(2), Height(2));
        for coord in g.iter().collect::<Vec<_>>() {
            g.carve(coord);
        }
        let distances = Distances::new(&g, Position::ORIGIN).unwrap();
        assert_eq!(distances.max(), 2);
        assert_eq!(&*distances.furthest_points_on_grid(), &[Position::new(1, 1)]);
    }
}
