use crate::boundary::BoundaryLines;

/// Rebuilds `out` with every line of `raw` that has at least `min_points`
/// points, each resampled to exactly `target` points.
///
/// Sample `i` of a line with `n` points is raw point `floor(i * n / target)`,
/// so lines shorter than `target` repeat points. Returns the number of lines
/// written.
pub fn resample(
    raw: &BoundaryLines,
    target: usize,
    min_points: usize,
    out: &mut BoundaryLines,
) -> usize {
    out.clear();
    if target == 0 {
        return 0;
    }

    let mut lines = 0;
    for line in raw.lines() {
        let n = line.len();
        if n == 0 || n < min_points {
            continue;
        }

        for i in 0..target {
            let idx = (i as u64 * n as u64 / target as u64) as usize;
            out.push(line[idx]);
        }
        out.close_line();
        lines += 1;
    }

    lines
}

#[cfg(test)]
mod tests {
    use rt_core::Point2i;

    use super::resample;
    use crate::boundary::BoundaryLines;

    fn straight_line(out: &mut BoundaryLines, y: i32, n: i32) {
        for x in 0..n {
            out.push(Point2i::new(x, y));
        }
        out.close_line();
    }

    #[test]
    fn short_lines_are_dropped_and_long_ones_hit_target() {
        let mut raw = BoundaryLines::new();
        straight_line(&mut raw, 0, 40);
        straight_line(&mut raw, 1, 9);
        straight_line(&mut raw, 2, 10);

        let mut out = BoundaryLines::new();
        let n = resample(&raw, 16, 10, &mut out);

        assert_eq!(n, 2);
        assert_eq!(out.num_lines(), 2);
        for line in out.lines() {
            assert_eq!(line.len(), 16);
        }
        let first = out.line(0).expect("first line");
        assert_eq!(first[0], Point2i::new(0, 0));
        assert_eq!(first[1], Point2i::new(2, 0));
        assert_eq!(first[15], Point2i::new(37, 0));
        assert_eq!(out.line(1).expect("second line")[0].y, 2);
    }

    #[test]
    fn upsampling_repeats_points_in_order() {
        let mut raw = BoundaryLines::new();
        straight_line(&mut raw, 5, 3);

        let mut out = BoundaryLines::new();
        resample(&raw, 7, 1, &mut out);

        let xs: Vec<i32> = out.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn output_is_rebuilt_each_call() {
        let mut raw = BoundaryLines::new();
        straight_line(&mut raw, 0, 12);

        let mut out = BoundaryLines::new();
        resample(&raw, 4, 10, &mut out);
        resample(&raw, 4, 10, &mut out);
        assert_eq!(out.num_lines(), 1);
        assert_eq!(out.num_points(), 4);

        assert_eq!(resample(&raw, 4, 13, &mut out), 0);
        assert_eq!(out.num_points(), 0);
    }
}
