use crate::cells::Position;
use fnv::FnvHashSet;

/// Overlay for the text rendering of a `Grid`.
///
/// Only consulted for passage cells; `None` leaves the cell blank.
pub trait GridDisplay {
    fn render_cell_body(&self, coord: Position) -> Option<char>;
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Position>,
}
impl PathDisplay {
    pub fn new(path: &[Position]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Position) -> Option<char> {
        if self.on_path_coordinates.contains(&coord) {
            Some('.')
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: Position,
    end: Position,
}
impl StartEndPointsDisplay {
    pub fn new(start: Position, end: Position) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Position) -> Option<char> {
        if coord == self.start {
            Some('S')
        } else if coord == self.end {
            Some('E')
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_marks_only_path_cells() {
        let display = PathDisplay::new(&[Position::new(0, 0), Position::new(1, 0)]);
        assert_eq!(display.render_cell_body(Position::new(1, 0)), Some('.'));
        assert_eq!(display.render_cell_body(Position::new(2, 0)), None);
    }

    #[test]
    fn start_wins_when_start_is_end() {
        let display = StartEndPointsDisplay::new(Position::ORIGIN, Position::ORIGIN);
        assert_eq!(display.render_cell_body(Position::ORIGIN), Some('S'));
    }
}
