use rt_core::Point2i;
use rt_track::BoundaryLines;

/// Index of the line with the most points. Ties go to the first one.
pub fn longest_line(boundary: &BoundaryLines) -> Option<usize> {
    longest_lines(boundary, 1).first().copied()
}

/// Indices of the `n` longest lines, longest first. Equal lengths keep line
/// order.
pub fn longest_lines(boundary: &BoundaryLines, n: usize) -> Vec<usize> {
    let mut order: Vec<(usize, usize)> = boundary
        .lines()
        .enumerate()
        .map(|(i, line)| (i, line.len()))
        .collect();
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.into_iter().take(n).map(|(i, _)| i).collect()
}

/// Mean vertex, truncated toward zero.
pub fn center_of_mass(points: &[Point2i]) -> Option<Point2i> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as i64;
    let (sx, sy) = points.iter().fold((0i64, 0i64), |(sx, sy), p| {
        (sx + i64::from(p.x), sy + i64::from(p.y))
    });
    Some(Point2i::new((sx / n) as i32, (sy / n) as i32))
}

/// Per-axis median. Even counts take the upper median.
pub fn median_center(points: &[Point2i]) -> Option<Point2i> {
    if points.is_empty() {
        return None;
    }

    let mid = points.len() / 2;
    let mut xs: Vec<i32> = points.iter().map(|p| p.x).collect();
    let mut ys: Vec<i32> = points.iter().map(|p| p.y).collect();
    let (_, &mut mx, _) = xs.select_nth_unstable(mid);
    let (_, &mut my, _) = ys.select_nth_unstable(mid);
    Some(Point2i::new(mx, my))
}

/// Axis-aligned box with inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: Point2i,
    pub max: Point2i,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.max.x.abs_diff(self.min.x)
    }

    pub fn height(&self) -> u32 {
        self.max.y.abs_diff(self.min.y)
    }

    pub fn contains(&self, p: Point2i) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }
}

pub fn bounding_box(points: &[Point2i]) -> Option<BoundingBox> {
    let first = *points.first()?;
    let bb = points.iter().fold(
        BoundingBox {
            min: first,
            max: first,
        },
        |bb, p| BoundingBox {
            min: Point2i::new(bb.min.x.min(p.x), bb.min.y.min(p.y)),
            max: Point2i::new(bb.max.x.max(p.x), bb.max.y.max(p.y)),
        },
    );
    Some(bb)
}
