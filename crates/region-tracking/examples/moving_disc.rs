//! Example: track a disc moving in front of a flat wall in synthetic depth
//! frames.
//!
//! The depth predicate first calibrates its background on empty frames, then
//! the tracker follows the disc frame by frame. For every frame the region
//! size, the longest contour's hull and its minimum-width box are reported.
//!
//! Run from the workspace root:
//!   cargo run -p region-tracking --example moving_disc -- --help
//!   RUST_LOG=debug cargo run -p region-tracking --example moving_disc

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use region_tracking::{
    DepthPredicate, DepthPredicateConfig, Image, RegionTracker, TrackerConfig, center_of_mass,
    convex_hull, longest_line, min_width_box,
};
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Track a synthetic disc moving across a depth image")]
struct Args {
    #[arg(long, default_value_t = 320)]
    width: usize,

    #[arg(long, default_value_t = 240)]
    height: usize,

    /// Number of tracked frames
    #[arg(long, default_value_t = 40)]
    frames: usize,

    /// Disc radius in pixels
    #[arg(long, default_value_t = 30.0)]
    radius: f32,

    /// Horizontal disc motion per frame in pixels
    #[arg(long, default_value_t = 3.0)]
    speed: f32,

    /// Seed scan spacing in both axes
    #[arg(long, default_value_t = 8)]
    seed_stride: usize,

    /// Optional output JSON path
    #[arg(long)]
    out: Option<String>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FrameDto {
    frame: usize,
    region_size: usize,
    lines: usize,
    center: Option<[i32; 2]>,
    hull_len: usize,
    min_width: Option<f32>,
    elapsed_us: u128,
}

const WALL_MM: u16 = 1200;
const DISC_MM: u16 = 800;

fn render(width: usize, height: usize, cx: f32, cy: f32, r: f32) -> Image<u16> {
    let mut img = Image::new_fill(width, height, WALL_MM);
    let r2 = r * r;
    for (i, v) in img.data_mut().iter_mut().enumerate() {
        let dx = (i % width) as f32 + 0.5 - cx;
        let dy = (i / width) as f32 + 0.5 - cy;
        if dx * dx + dy * dy <= r2 {
            *v = DISC_MM;
        }
    }
    img
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let (w, h) = (args.width, args.height);

    let mut predicate = DepthPredicate::new(w, h, DepthPredicateConfig::default());
    let empty = Image::new_fill(w, h, WALL_MM);
    while !predicate
        .calibrate(&empty.as_view())
        .context("calibration frame size")?
    {}

    let cfg = TrackerConfig {
        seed_stride_x: args.seed_stride,
        seed_stride_y: args.seed_stride,
        ..TrackerConfig::default()
    };
    let mut tracker = RegionTracker::new(w, h, cfg, predicate).context("creating tracker")?;

    let mut out = Vec::with_capacity(args.frames);
    let total = Instant::now();
    for frame in 0..args.frames {
        let cx = args.radius + 1.0 + frame as f32 * args.speed;
        let img = render(w, h, cx, h as f32 / 2.0, args.radius);
        tracker
            .predicate_mut()
            .set_frame(&img.as_view())
            .context("frame size")?;

        let t0 = Instant::now();
        let report = tracker.track();
        let elapsed_us = t0.elapsed().as_micros();

        let raw = tracker.raw_boundary();
        let longest = longest_line(raw).and_then(|i| raw.line(i)).unwrap_or(&[]);
        let hull = convex_hull(longest);
        let dto = FrameDto {
            frame,
            region_size: report.region_size,
            lines: report.raw_lines,
            center: center_of_mass(longest).map(|p| [p.x, p.y]),
            hull_len: hull.len(),
            min_width: min_width_box(&hull).map(|b| b.width),
            elapsed_us,
        };
        println!(
            "frame {:>3}: {:>6} px, {} lines, center {:?}, min width {:?} ({} us)",
            dto.frame, dto.region_size, dto.lines, dto.center, dto.min_width, dto.elapsed_us
        );
        out.push(dto);
    }
    println!("total: {:.1} ms", total.elapsed().as_secs_f64() * 1e3);

    if let Some(path) = args.out {
        let json = serde_json::to_string_pretty(&out).context("serializing frames")?;
        std::fs::write(&path, json).with_context(|| format!("writing {path}"))?;
        println!("wrote {path}");
    }

    Ok(())
}
