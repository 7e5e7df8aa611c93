/// One side of a pixel, and the directed boundary edge it owns.
///
/// Bit `1 << side` stored at a connectivity vertex marks the edge leaving that
/// vertex. Walking the edges of one side keeps the region on the same hand,
/// so closed contours come out with a consistent orientation.
///
/// | side   | neighbor | stored at vertex | edge step |
/// |--------|----------|------------------|-----------|
/// | Bottom | (0, +1)  | (x, y + 1)       | (+1, 0)   |
/// | Right  | (+1, 0)  | (x + 1, y + 1)   | (0, -1)   |
/// | Top    | (0, -1)  | (x + 1, y)       | (-1, 0)   |
/// | Left   | (-1, 0)  | (x, y)           | (0, +1)   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bottom = 0,
    Right = 1,
    Top = 2,
    Left = 3,
}

impl Side {
    /// Rotation order used by growth, shrink and frame lookup.
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Right, Side::Top, Side::Left];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(i: usize) -> Side {
        Self::ALL[i & 3]
    }

    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub const fn neighbor_offset(self) -> (isize, isize) {
        match self {
            Side::Bottom => (0, 1),
            Side::Right => (1, 0),
            Side::Top => (0, -1),
            Side::Left => (-1, 0),
        }
    }

    /// Offset from the pixel to the vertex that stores this side's bit.
    pub const fn vertex_offset(self) -> (usize, usize) {
        match self {
            Side::Bottom => (0, 1),
            Side::Right => (1, 1),
            Side::Top => (1, 0),
            Side::Left => (0, 0),
        }
    }

    /// Vertex step taken when walking this side's edge.
    pub const fn step(self) -> (i32, i32) {
        match self {
            Side::Bottom => (1, 0),
            Side::Right => (0, -1),
            Side::Top => (-1, 0),
            Side::Left => (0, 1),
        }
    }

    /// In-raster neighbor of `(x, y)` across this side.
    #[inline]
    pub fn neighbor(self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.neighbor_offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < width && ny < height).then_some((nx, ny))
    }
}

#[cfg(test)]
mod tests {
    use super::Side;

    #[test]
    fn bits_are_distinct_and_follow_rotation() {
        let bits: Vec<u8> = Side::ALL.iter().map(|s| s.bit()).collect();
        assert_eq!(bits, vec![1, 2, 4, 8]);
        for (i, side) in Side::ALL.iter().enumerate() {
            assert_eq!(side.index(), i);
            assert_eq!(Side::from_index(i + 4), *side);
        }
    }

    #[test]
    fn neighbors_clip_at_raster_border() {
        assert_eq!(Side::Left.neighbor(0, 3, 4, 4), None);
        assert_eq!(Side::Top.neighbor(2, 0, 4, 4), None);
        assert_eq!(Side::Right.neighbor(3, 1, 4, 4), None);
        assert_eq!(Side::Bottom.neighbor(1, 3, 4, 4), None);
        assert_eq!(Side::Bottom.neighbor(1, 2, 4, 4), Some((1, 3)));
        assert_eq!(Side::Left.neighbor(1, 2, 4, 4), Some((0, 2)));
    }

    #[test]
    fn edges_of_one_pixel_form_a_closed_loop() {
        // Start at the Left vertex and follow Left, Bottom, Right, Top.
        let mut v = (0i32, 0i32);
        for side in [Side::Left, Side::Bottom, Side::Right, Side::Top] {
            let (ox, oy) = side.vertex_offset();
            assert_eq!(v, (ox as i32, oy as i32), "{side:?} starts where the last edge ended");
            let (sx, sy) = side.step();
            v = (v.0 + sx, v.1 + sy);
        }
        assert_eq!(v, (0, 0));
    }
}
