//! Occupancy propagation: seeding, growth and shrink.

use crate::edge::Side;
use crate::grid::{ConnectivityGrid, OccupancyGrid};
use crate::predicate::RegionPredicate;
use crate::stack::CandidateStack;

/// Scans every `stride_x`-th column of every `stride_y`-th row for free,
/// accepted pixels. Each seed is occupied and pushed onto `growth`.
///
/// Returns the number of seeds found.
pub fn find_seeds<P: RegionPredicate + ?Sized>(
    occupancy: &mut OccupancyGrid,
    growth: &mut CandidateStack,
    predicate: &P,
    stride_x: usize,
    stride_y: usize,
) -> usize {
    let (width, height) = (occupancy.width(), occupancy.height());
    let mut seeds = 0;

    for y in (0..height).step_by(stride_y.max(1)) {
        for x in (0..width).step_by(stride_x.max(1)) {
            if occupancy.is_free(x, y) && predicate.accepts(x, y, &*occupancy) {
                occupancy.occupy(x, y);
                growth.push(x, y);
                seeds += 1;
            }
        }
    }

    seeds
}

/// Floods outward from the pixels on `growth` until it is empty.
///
/// Every side facing the raster border or a rejected pixel is recorded in
/// `connectivity`, and its pixel is pushed onto `frontier` once. Returns the
/// number of pixels newly occupied.
pub fn grow<P: RegionPredicate + ?Sized>(
    occupancy: &mut OccupancyGrid,
    connectivity: &mut ConnectivityGrid,
    growth: &mut CandidateStack,
    frontier: &mut CandidateStack,
    predicate: &P,
) -> usize {
    let (width, height) = (occupancy.width(), occupancy.height());
    let mut grown = 0;

    while let Some((x, y)) = growth.pop() {
        let mut on_frontier = false;

        for side in Side::ALL {
            let blocked = match side.neighbor(x, y, width, height) {
                None => true,
                Some((nx, ny)) if occupancy.is_free(nx, ny) => {
                    if predicate.accepts(nx, ny, &*occupancy) {
                        occupancy.occupy(nx, ny);
                        growth.push(nx, ny);
                        grown += 1;
                        false
                    } else {
                        true
                    }
                }
                Some(_) => false,
            };

            if blocked {
                connectivity.mark(x, y, side);
                on_frontier = true;
            }
        }

        if on_frontier {
            frontier.push(x, y);
        }
    }

    grown
}

/// Retests the frontier recorded by the last growth pass.
///
/// All frontier pixels are released first. Those the predicate still accepts
/// are queued on `growth`; rejected ones release their occupied neighbors,
/// which are retested the same way. Surviving pixels are re-occupied so the
/// next growth pass resumes from them.
///
/// `frontier` is empty on return. Returns the net number of pixels removed
/// from the region.
pub fn shrink<P: RegionPredicate + ?Sized>(
    occupancy: &mut OccupancyGrid,
    growth: &mut CandidateStack,
    frontier: &mut CandidateStack,
    predicate: &P,
) -> usize {
    let (width, height) = (occupancy.width(), occupancy.height());
    let before = occupancy.count();

    for (x, y) in frontier.iter() {
        occupancy.release(x, y);
    }

    while let Some((x, y)) = frontier.pop() {
        if predicate.accepts(x, y, &*occupancy) {
            growth.push(x, y);
            continue;
        }

        for side in Side::ALL {
            if let Some((nx, ny)) = side.neighbor(x, y, width, height)
                && occupancy.release(nx, ny)
            {
                frontier.push(nx, ny);
            }
        }
    }

    for (x, y) in growth.iter() {
        occupancy.occupy(x, y);
    }

    before.saturating_sub(occupancy.count())
}

#[cfg(test)]
mod tests {
    use super::{find_seeds, grow, shrink};
    use crate::grid::{ConnectivityGrid, OccupancyGrid};
    use crate::predicate::FnPredicate;
    use crate::stack::CandidateStack;

    struct Fixture {
        occupancy: OccupancyGrid,
        connectivity: ConnectivityGrid,
        growth: CandidateStack,
        frontier: CandidateStack,
    }

    impl Fixture {
        fn new(w: usize, h: usize) -> Self {
            Self {
                occupancy: OccupancyGrid::new(w, h, 1),
                connectivity: ConnectivityGrid::new(w, h),
                growth: CandidateStack::new(w * h),
                frontier: CandidateStack::new(w * h),
            }
        }
    }

    fn in_rect(x0: usize, y0: usize, x1: usize, y1: usize) -> impl Fn(usize, usize) -> bool {
        move |x, y| x >= x0 && x < x1 && y >= y0 && y < y1
    }

    #[test]
    fn strided_seed_scan_respects_both_axes() {
        let mut f = Fixture::new(7, 5);
        let all = FnPredicate(|_: usize, _: usize| true);

        let seeds = find_seeds(&mut f.occupancy, &mut f.growth, &all, 3, 2);
        assert_eq!(seeds, 9);
        assert_eq!(f.occupancy.count(), 9);
        let seen: Vec<_> = f.growth.iter().collect();
        assert_eq!(seen[..3], [(0, 0), (3, 0), (6, 0)]);
        assert_eq!(seen[8], (6, 4));

        let again = find_seeds(&mut f.occupancy, &mut f.growth, &all, 3, 2);
        assert_eq!(again, 0, "occupied pixels are never reseeded");
    }

    #[test]
    fn growth_fills_accepted_rectangle_and_records_frontier() {
        let mut f = Fixture::new(8, 6);
        let rect = FnPredicate(in_rect(2, 1, 6, 4));

        f.occupancy.occupy(3, 2);
        f.growth.push(3, 2);
        let grown = grow(
            &mut f.occupancy,
            &mut f.connectivity,
            &mut f.growth,
            &mut f.frontier,
            &rect,
        );

        assert_eq!(grown, 11);
        assert_eq!(f.occupancy.count(), 12);
        assert!(f.growth.is_empty());
        // Every pixel of a 4x3 block touches its rim.
        assert_eq!(f.frontier.len(), 10);
        assert_eq!(f.connectivity.count_edges(), 2 * (4 + 3));
    }

    #[test]
    fn raster_border_blocks_growth() {
        let mut f = Fixture::new(3, 2);
        let all = FnPredicate(|_: usize, _: usize| true);

        find_seeds(&mut f.occupancy, &mut f.growth, &all, 100, 100);
        grow(
            &mut f.occupancy,
            &mut f.connectivity,
            &mut f.growth,
            &mut f.frontier,
            &all,
        );

        assert_eq!(f.occupancy.count(), 6);
        assert_eq!(f.connectivity.count_edges(), 10);
        assert_eq!(f.frontier.len(), 6);
    }

    #[test]
    fn shrink_erodes_exactly_the_rejected_rim() {
        let mut f = Fixture::new(10, 10);
        let outer = FnPredicate(in_rect(1, 1, 9, 9));
        let inner = FnPredicate(in_rect(3, 3, 7, 7));

        find_seeds(&mut f.occupancy, &mut f.growth, &outer, 1, 1);
        grow(
            &mut f.occupancy,
            &mut f.connectivity,
            &mut f.growth,
            &mut f.frontier,
            &outer,
        );
        assert_eq!(f.occupancy.count(), 64);
        f.connectivity.clear();

        let eroded = shrink(&mut f.occupancy, &mut f.growth, &mut f.frontier, &inner);

        assert_eq!(eroded, 64 - 16);
        assert_eq!(f.occupancy.count(), 16);
        assert!(f.frontier.is_empty());
        for y in 0..10 {
            for x in 0..10 {
                let expected = (3..7).contains(&x) && (3..7).contains(&y);
                assert_eq!(!f.occupancy.is_free(x, y), expected, "pixel ({x}, {y})");
            }
        }
        // The new rim is queued for regrowth.
        assert_eq!(f.growth.len(), 12);
    }

    #[test]
    fn shrink_keeps_a_static_region() {
        let mut f = Fixture::new(6, 6);
        let rect = FnPredicate(in_rect(1, 1, 5, 5));

        find_seeds(&mut f.occupancy, &mut f.growth, &rect, 1, 1);
        grow(
            &mut f.occupancy,
            &mut f.connectivity,
            &mut f.growth,
            &mut f.frontier,
            &rect,
        );
        let frontier = f.frontier.len();

        let eroded = shrink(&mut f.occupancy, &mut f.growth, &mut f.frontier, &rect);
        assert_eq!(eroded, 0);
        assert_eq!(f.occupancy.count(), 16);
        assert_eq!(f.growth.len(), frontier);
    }
}
