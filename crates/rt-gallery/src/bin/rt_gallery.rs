use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{Rgb, RgbImage};
use region_tracking::{
    BoundaryLines, Image, MaskPredicate, OccupancyQuery, Point2f, Point2i, RegionTracker,
    StepReport, TrackerConfig, bounding_box, center_of_mass, convex_hull, longest_line,
    median_center, min_width_box,
};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "rt_gallery")]
#[command(about = "Run the region tracker on mask sequences and render overlays")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generated scene: a disc sliding past a static bar.
    #[command(name = "synthetic")]
    Synthetic(SyntheticArgs),
    /// A directory of PNG masks, tracked in file name order.
    #[command(name = "masks")]
    Masks(MasksArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, default_value = "out/gallery")]
    out: PathBuf,
    /// Tracker configuration JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed_stride: Option<usize>,
    #[arg(long)]
    decimation: Option<usize>,
    #[arg(long)]
    resample: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct SyntheticArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 160)]
    width: usize,
    #[arg(long, default_value_t = 120)]
    height: usize,
    #[arg(long, default_value_t = 24)]
    frames: usize,
    #[arg(long, default_value_t = 18.0)]
    radius: f32,
    #[arg(long, default_value_t = 4.0)]
    speed: f32,
}

#[derive(Args, Debug, Clone)]
struct MasksArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, required = true)]
    input: PathBuf,
    /// Pixels brighter than this belong to the mask.
    #[arg(long, default_value_t = 127)]
    threshold: u8,
}

#[derive(Debug, Clone, Serialize)]
struct BoxDto {
    min: [i32; 2],
    max: [i32; 2],
}

#[derive(Debug, Clone, Serialize)]
struct OrientedBoxDto {
    corners: Vec<[f32; 2]>,
    center: [f32; 2],
    angle: f32,
    length: f32,
    width: f32,
}

#[derive(Debug, Clone, Serialize)]
struct ShapeDto {
    line: usize,
    points: usize,
    bbox: Option<BoxDto>,
    center_of_mass: Option<[i32; 2]>,
    median_center: Option<[i32; 2]>,
    hull: Vec<[i32; 2]>,
    min_width_box: Option<OrientedBoxDto>,
}

#[derive(Debug, Clone, Serialize)]
struct FrameDto {
    frame: usize,
    source: String,
    report: StepReport,
    raw: Vec<Vec<[i32; 2]>>,
    resampled: Vec<Vec<[i32; 2]>>,
    shape: Option<ShapeDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaRun {
    case: &'static str,
    width: usize,
    height: usize,
    frames: usize,
    config: TrackerConfig,
    summary: Vec<StepReport>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Synthetic(args) => run_synthetic(args),
        Command::Masks(args) => run_masks(args),
    }
}

fn run_synthetic(args: SyntheticArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("raster must not be empty: {}x{}", args.width, args.height);
    }
    let config = load_config(&args.common)?;
    let case_dir = prepare_out(&args.common, "synthetic")?;

    let (w, h) = (args.width, args.height);
    let cy = h as f32 * 0.5;
    let masks = (0..args.frames).map(|i| -> Result<(String, Image<u8>)> {
        let cx = args.radius + 2.0 + i as f32 * args.speed;
        let mask = synthetic_mask(w, h, (cx, cy), args.radius);
        Ok((format!("frame {i}"), mask))
    });

    let summary = track_sequence(&case_dir, w, h, config.clone(), masks)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaRun {
            case: "synthetic",
            width: w,
            height: h,
            frames: summary.len(),
            config,
            summary,
        },
    )
}

fn run_masks(args: MasksArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let case_dir = prepare_out(&args.common, "masks")?;

    let files = list_pngs(&args.input)?;
    let Some(first) = files.first() else {
        bail!("no png files in {}", args.input.display());
    };
    let probe = load_mask(first, args.threshold)?;
    let (w, h) = probe.dims();
    tracing::info!("{} masks of {}x{}", files.len(), w, h);

    let masks = files.iter().map(|path| -> Result<(String, Image<u8>)> {
        let mask = load_mask(path, args.threshold)?;
        Ok((path.display().to_string(), mask))
    });

    let summary = track_sequence(&case_dir, w, h, config.clone(), masks)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaRun {
            case: "masks",
            width: w,
            height: h,
            frames: summary.len(),
            config,
            summary,
        },
    )
}

fn track_sequence(
    case_dir: &Path,
    width: usize,
    height: usize,
    config: TrackerConfig,
    masks: impl Iterator<Item = Result<(String, Image<u8>)>>,
) -> Result<Vec<StepReport>> {
    let predicate = MaskPredicate::new(Image::new_fill(width, height, 0));
    let mut tracker =
        RegionTracker::new(width, height, config, predicate).context("creating tracker")?;

    let mut summary = Vec::new();
    for (frame, item) in masks.enumerate() {
        let (source, mask) = item?;
        tracker
            .predicate_mut()
            .set_mask(mask)
            .with_context(|| format!("mask {source}"))?;
        let report = tracker.track();
        tracing::info!(
            "{}: region {} px, {} lines ({} seeds, +{} / -{})",
            source,
            report.region_size,
            report.raw_lines,
            report.seeds,
            report.grown,
            report.eroded
        );

        let shape = shape_dto(tracker.raw_boundary());
        render_overlay(&tracker, shape.as_ref())
            .save(case_dir.join(format!("frame_{frame:03}.png")))
            .with_context(|| format!("saving overlay for frame {frame}"))?;
        write_json(
            case_dir.join(format!("frame_{frame:03}.json")),
            &FrameDto {
                frame,
                source,
                report,
                raw: lines_dto(tracker.raw_boundary()),
                resampled: lines_dto(tracker.resampled_boundary()),
                shape,
            },
        )?;
        summary.push(report);
    }

    Ok(summary)
}

fn load_config(common: &CommonArgs) -> Result<TrackerConfig> {
    let mut config = match &common.config {
        Some(path) => read_json::<TrackerConfig>(path)?,
        None => TrackerConfig::default(),
    };
    if let Some(s) = common.seed_stride {
        config.seed_stride_x = s;
        config.seed_stride_y = s;
    }
    if let Some(d) = common.decimation {
        config.decimation = d;
    }
    if let Some(r) = common.resample {
        config.resample_target = r;
    }
    config.validate().context("invalid tracker config")?;
    Ok(config)
}

fn prepare_out(common: &CommonArgs, case_name: &str) -> Result<PathBuf> {
    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;
    Ok(case_dir)
}

fn list_pngs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("input is not a directory: {}", dir.display());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry.context("reading directory entry")?.path();
        if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("png")) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_mask(path: &Path, threshold: u8) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening mask image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma
        .into_raw()
        .into_iter()
        .map(|v| if v > threshold { 255 } else { 0 })
        .collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing mask from {}", path.display()))
}

fn synthetic_mask(width: usize, height: usize, center: (f32, f32), radius: f32) -> Image<u8> {
    let mut img = Image::new_fill(width, height, 0u8);
    let r2 = radius * radius;
    let bar_x = width * 3 / 4..width * 3 / 4 + (width / 16).max(1);
    let bar_y = height / 8..height - height / 8;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 + 0.5 - center.0;
            let dy = y as f32 + 0.5 - center.1;
            let on = dx * dx + dy * dy <= r2 || (bar_x.contains(&x) && bar_y.contains(&y));
            if on && let Some(v) = img.get_mut(x, y) {
                *v = 255;
            }
        }
    }
    img
}

fn shape_dto(boundary: &BoundaryLines) -> Option<ShapeDto> {
    let line = longest_line(boundary)?;
    let points = boundary.line(line)?;
    let hull = convex_hull(points);

    Some(ShapeDto {
        line,
        points: points.len(),
        bbox: bounding_box(points).map(|b| BoxDto {
            min: xy(b.min),
            max: xy(b.max),
        }),
        center_of_mass: center_of_mass(points).map(xy),
        median_center: median_center(points).map(xy),
        min_width_box: min_width_box(&hull).map(|b| OrientedBoxDto {
            corners: b.corners.iter().copied().map(xyf).collect(),
            center: xyf(b.center()),
            angle: b.angle(),
            length: b.length,
            width: b.width,
        }),
        hull: hull.into_iter().map(xy).collect(),
    })
}

fn lines_dto(boundary: &BoundaryLines) -> Vec<Vec<[i32; 2]>> {
    boundary
        .lines()
        .map(|line| line.iter().copied().map(xy).collect())
        .collect()
}

fn xy(p: Point2i) -> [i32; 2] {
    [p.x, p.y]
}

fn xyf(p: Point2f) -> [f32; 2] {
    [p.x, p.y]
}

fn render_overlay(tracker: &RegionTracker<MaskPredicate>, shape: Option<&ShapeDto>) -> RgbImage {
    let mask = tracker.predicate().mask();
    let mut rgb = RgbImage::from_fn(tracker.width() as u32, tracker.height() as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let on = mask.get(x, y).is_some_and(|&v| v != 0);
        match (on, tracker.is_occupied(x, y)) {
            (_, true) => Rgb([40, 120, 40]),
            (true, false) => Rgb([110, 110, 110]),
            (false, false) => Rgb([0, 0, 0]),
        }
    });

    for p in tracker.raw_boundary().points() {
        put(&mut rgb, p.x, p.y, Rgb([255, 64, 64]));
    }
    for p in tracker.resampled_boundary().points() {
        put(&mut rgb, p.x, p.y, Rgb([255, 220, 64]));
    }
    if let Some(b) = shape.and_then(|s| s.min_width_box.as_ref()) {
        for c in &b.corners {
            draw_dot(&mut rgb, c[0], c[1], Rgb([64, 160, 255]));
        }
        draw_dot(&mut rgb, b.center[0], b.center[1], Rgb([64, 160, 255]));
    }

    rgb
}

fn put(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (ux, uy) = (x as u32, y as u32);
    if ux < img.width() && uy < img.height() {
        img.put_pixel(ux, uy, color);
    }
}

fn draw_dot(img: &mut RgbImage, x: f32, y: f32, color: Rgb<u8>) {
    let xi = x.round() as i32;
    let yi = y.round() as i32;

    for dy in -1..=1 {
        for dx in -1..=1 {
            put(img, xi + dx, yi + dy, color);
        }
    }
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}
