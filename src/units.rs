#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

/// Side length of one square grid cell on screen.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellPixels(pub u32);

/// Window size in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct PixelWidth(pub u32);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct PixelHeight(pub u32);

/// A screen coordinate, e.g. where a pointer click landed.
/// Signed as window systems report positions outside of the window while dragging.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> PixelPoint {
        PixelPoint { x, y }
    }
}
