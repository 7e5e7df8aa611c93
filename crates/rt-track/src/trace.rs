//! Boundary tracing over the connectivity lattice.
//!
//! The walk is a 4-state automaton keyed by the side of the last edge taken.
//! At each vertex it tries the edge turning one way, then straight on, then
//! the other way, and consumes the first edge that is present. A reverse edge
//! cannot exist (the pixels on both sides of a boundary edge can't both be
//! occupied), so every walk closes on its start vertex.

use rt_core::Point2i;

use crate::boundary::BoundaryLines;
use crate::edge::Side;
use crate::grid::ConnectivityGrid;
use crate::interp::interpolate;
use crate::stack::CandidateStack;

const TRANSITIONS: [[Side; 3]; 4] = [
    [Side::Left, Side::Bottom, Side::Right],
    [Side::Bottom, Side::Right, Side::Top],
    [Side::Right, Side::Top, Side::Left],
    [Side::Top, Side::Left, Side::Bottom],
];

/// First side of pixel `(x, y)` whose edge is still present, in rotation
/// order.
pub fn frame_side(connectivity: &ConnectivityGrid, x: usize, y: usize) -> Option<Side> {
    Side::ALL
        .into_iter()
        .find(|&side| connectivity.has_edge(x, y, side))
}

/// Rebuilds `out` with one line per closed boundary walk.
///
/// Frontier pixels are visited in stack order; each one starts walks until
/// none of its edges remain, so the connectivity lattice is clear on return.
/// Walk vertices are kept every `decimation` steps, with the gaps backfilled
/// by digital segments, and the closing vertex is always kept.
///
/// Returns the number of lines traced.
pub fn trace_boundary(
    connectivity: &mut ConnectivityGrid,
    frontier: &CandidateStack,
    decimation: usize,
    out: &mut BoundaryLines,
) -> usize {
    out.clear();
    let decimation = decimation.max(1);
    let mut lines = 0;

    for (x, y) in frontier.iter() {
        while let Some(side) = frame_side(connectivity, x, y) {
            trace_line(connectivity, x, y, side, decimation, out);
            lines += 1;
        }
    }

    lines
}

fn trace_line(
    connectivity: &mut ConnectivityGrid,
    x: usize,
    y: usize,
    side: Side,
    decimation: usize,
    out: &mut BoundaryLines,
) {
    let (ox, oy) = side.vertex_offset();
    let start = Point2i::new((x + ox) as i32, (y + oy) as i32);
    let first = out.num_points();

    let mut v = start;
    let mut heading = side;
    let mut walked = 0usize;
    let mut kept_at = 0usize;
    record(out, v);

    while let Some(turn) = TRANSITIONS[heading.index()]
        .into_iter()
        .find(|s| connectivity.take(v.x as usize, v.y as usize, s.bit()))
    {
        let (sx, sy) = turn.step();
        v = v.offset(sx, sy);
        heading = turn;
        walked += 1;

        if walked % decimation == 0 {
            record(out, v);
            kept_at = walked;
        }
    }

    if kept_at != walked {
        record(out, v);
    }

    tracing::trace!(
        "boundary line from ({}, {}): {} edges, {} points",
        start.x,
        start.y,
        walked,
        out.num_points() - first
    );
    out.close_line();
}

fn record(out: &mut BoundaryLines, v: Point2i) {
    match out.last_point() {
        Some(last) if last != v => {
            for p in interpolate(last, v).skip(1) {
                out.push(p);
            }
        }
        _ => out.push(v),
    }
}
