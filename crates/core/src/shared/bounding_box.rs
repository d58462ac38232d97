use serde::Serialize;

/// Axis-aligned rectangle `(x, y, width, height)`.
///
/// Used both in grid space (one unit per cell) and in pixel space. `right`
/// and `bottom` are exclusive edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }

    /// Multiplies every coordinate by `factor` (grid cells to pixels).
    pub fn scaled(&self, factor: i32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Shrinks width/height so the box does not extend past `cols`/`rows`.
    ///
    /// Only the right and bottom edges are clipped; the origin is left alone.
    /// Dimensions never go below zero.
    pub fn clipped_to(&self, cols: i32, rows: i32) -> Self {
        let mut clipped = *self;
        if clipped.right() > cols {
            clipped.width = (cols - clipped.x).max(0);
        }
        if clipped.bottom() > rows {
            clipped.height = (rows - clipped.y).max(0);
        }
        clipped
    }

    /// Tight box around a set of `(x, y)` cells.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for (x, y) in iter {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }
}
