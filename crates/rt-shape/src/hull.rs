use rt_core::{Point2f, Point2i, Vec2f};

/// Convex hull by monotone chain.
///
/// Vertices are counter-clockwise in a y-up frame (positive signed area),
/// starting from the smallest `(x, y)`. Collinear points and the closing
/// duplicate are dropped. Fewer than three distinct input points come back
/// deduplicated.
pub fn convex_hull(points: &[Point2i]) -> Vec<Point2i> {
    let mut pts = points.to_vec();
    pts.sort_unstable();
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Point2i> = Vec::with_capacity(pts.len() + 1);
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    let lower = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    hull.pop();
    hull
}

fn cross(o: Point2i, a: Point2i, b: Point2i) -> i64 {
    let (ax, ay) = (i64::from(a.x - o.x), i64::from(a.y - o.y));
    let (bx, by) = (i64::from(b.x - o.x), i64::from(b.y - o.y));
    ax * by - ay * bx
}

/// Minimum-width enclosing rectangle of a convex polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// Corners in hull orientation, starting at the minimum of both axes.
    pub corners: [Point2f; 4],
    /// Unit vector along the box's long side, parallel to a hull edge.
    pub axis: Vec2f,
    /// Extent along `axis`.
    pub length: f32,
    /// Extent across `axis`; the smallest over all hull edges.
    pub width: f32,
}

impl OrientedBox {
    pub fn center(&self) -> Point2f {
        let diag = self.corners[2] - self.corners[0];
        self.corners[0] + diag * 0.5
    }

    /// Direction of `axis` in radians, in `(-pi, pi]`.
    pub fn angle(&self) -> f32 {
        self.axis.y.atan2(self.axis.x)
    }
}

/// Rotating-calipers search over the edges of `hull` (as returned by
/// [`convex_hull`]): the box is aligned with the edge that minimizes the
/// hull's perpendicular extent.
///
/// Returns `None` for fewer than three vertices.
pub fn min_width_box(hull: &[Point2i]) -> Option<OrientedBox> {
    if hull.len() < 3 {
        return None;
    }

    let pts: Vec<Point2f> = hull.iter().map(|p| p.to_f32()).collect();
    let origin = pts[0];
    let mut best: Option<OrientedBox> = None;

    for (i, &a) in pts.iter().enumerate() {
        let b = pts[(i + 1) % pts.len()];
        let axis = (b - a).normalize();
        if axis == Vec2f::default() {
            continue;
        }
        let normal = axis.perp();

        let (mut u0, mut u1) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut v0, mut v1) = (f32::INFINITY, f32::NEG_INFINITY);
        for &p in &pts {
            let d = p - origin;
            let (u, v) = (d.dot(axis), d.dot(normal));
            u0 = u0.min(u);
            u1 = u1.max(u);
            v0 = v0.min(v);
            v1 = v1.max(v);
        }

        let width = v1 - v0;
        if best.is_some_and(|b| b.width <= width) {
            continue;
        }

        let at = |u: f32, v: f32| origin + axis * u + normal * v;
        best = Some(OrientedBox {
            corners: [at(u0, v0), at(u1, v0), at(u1, v1), at(u0, v1)],
            axis,
            length: u1 - u0,
            width,
        });
    }

    best
}
