use rt_core::Point2i;

/// Vertex sequence partitioned into lines.
///
/// `starts` always holds the offset of every closed line plus the offset of
/// the line currently being built, so line `i` spans
/// `points[starts[i]..starts[i + 1]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryLines {
    points: Vec<Point2i>,
    starts: Vec<usize>,
}

impl Default for BoundaryLines {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryLines {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            starts: vec![0],
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.starts.clear();
        self.starts.push(0);
    }

    /// Appends a vertex to the open line.
    #[inline]
    pub fn push(&mut self, p: Point2i) {
        self.points.push(p);
    }

    /// Ends the open line. An empty open line is not recorded.
    pub fn close_line(&mut self) {
        if !self.current_line_is_empty() {
            self.starts.push(self.points.len());
        }
    }

    pub fn current_line_is_empty(&self) -> bool {
        self.open_start() == self.points.len()
    }

    /// Last vertex of the open line.
    pub fn last_point(&self) -> Option<Point2i> {
        if self.current_line_is_empty() {
            None
        } else {
            self.points.last().copied()
        }
    }

    pub fn num_lines(&self) -> usize {
        self.starts.len() - 1
    }

    /// Total vertex count, including an unclosed tail.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn line_start(&self, i: usize) -> Option<usize> {
        (i < self.num_lines()).then(|| self.starts[i])
    }

    /// Exclusive end offset of line `i`.
    pub fn line_end(&self, i: usize) -> Option<usize> {
        (i < self.num_lines()).then(|| self.starts[i + 1])
    }

    pub fn line(&self, i: usize) -> Option<&[Point2i]> {
        let start = self.line_start(i)?;
        let end = self.line_end(i)?;
        Some(&self.points[start..end])
    }

    pub fn lines(&self) -> impl ExactSizeIterator<Item = &[Point2i]> + '_ {
        self.starts
            .windows(2)
            .map(|w| &self.points[w[0]..w[1]])
    }

    pub fn points(&self) -> &[Point2i] {
        &self.points
    }

    fn open_start(&self) -> usize {
        self.starts.last().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use rt_core::Point2i;

    use super::BoundaryLines;

    fn p(x: i32, y: i32) -> Point2i {
        Point2i::new(x, y)
    }

    #[test]
    fn lines_are_delimited_by_close() {
        let mut b = BoundaryLines::new();
        assert!(b.current_line_is_empty());
        assert_eq!(b.last_point(), None);

        b.push(p(0, 0));
        b.push(p(1, 0));
        assert_eq!(b.last_point(), Some(p(1, 0)));
        b.close_line();

        assert!(b.current_line_is_empty());
        assert_eq!(b.last_point(), None);

        b.push(p(5, 5));
        b.close_line();

        assert_eq!(b.num_lines(), 2);
        assert_eq!(b.num_points(), 3);
        assert_eq!(b.line(0), Some(&[p(0, 0), p(1, 0)][..]));
        assert_eq!(b.line(1), Some(&[p(5, 5)][..]));
        assert_eq!(b.line(2), None);
        assert_eq!(b.line_start(1), Some(2));
        assert_eq!(b.line_end(1), Some(3));
        assert_eq!(b.lines().map(<[Point2i]>::len).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn empty_lines_are_skipped_and_clear_resets() {
        let mut b = BoundaryLines::new();
        b.close_line();
        assert_eq!(b.num_lines(), 0);

        b.push(p(2, 3));
        b.close_line();
        b.close_line();
        assert_eq!(b.num_lines(), 1);

        b.push(p(9, 9));
        assert_eq!(b.num_lines(), 1, "open tail is not a line yet");

        b.clear();
        assert_eq!(b, BoundaryLines::new());
    }
}
