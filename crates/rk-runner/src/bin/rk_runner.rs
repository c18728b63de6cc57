use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::GrayImage;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rk_core::Image;
use rk_filter::{gaussian5x5_u8, threshold_u8};
use rk_morph::dilate3x3_u8;
use rk_verify::with_tolerance;

#[derive(Parser, Debug)]
#[command(name = "rk_runner")]
#[command(about = "Run the reference kernels on grayscale images and compare outputs")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "dilate")]
    Dilate(KernelArgs),
    #[command(name = "gaussian")]
    Gaussian(KernelArgs),
    #[command(name = "threshold")]
    Threshold(ThresholdArgs),
    #[command(name = "verify")]
    Verify(VerifyArgs),
    #[command(name = "synthetic")]
    Synthetic(SyntheticArgs),
}

#[derive(Args, Debug, Clone)]
struct KernelArgs {
    /// Input image; anything the `image` crate decodes, converted to luma8.
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct ThresholdArgs {
    #[command(flatten)]
    common: KernelArgs,
    /// Pixels strictly greater than this become 255, everything else 0.
    #[arg(long, default_value_t = 127)]
    level: u8,
}

#[derive(Args, Debug, Clone)]
struct VerifyArgs {
    /// Output of the implementation under test.
    #[arg(long, required = true)]
    actual: PathBuf,
    /// Output of the reference kernel.
    #[arg(long, required = true)]
    reference: PathBuf,
    /// Maximum tolerated per-pixel absolute difference.
    #[arg(long, default_value_t = 0.0)]
    tolerance: f32,
    /// Maximum tolerated fraction of out-of-tolerance pixels. The default
    /// of 0 demands a bit-exact match.
    #[arg(long, default_value_t = 0.0)]
    max_mismatch_rate: f32,
}

#[derive(Args, Debug, Clone)]
struct SyntheticArgs {
    #[arg(long, default_value_t = 640)]
    width: usize,
    #[arg(long, default_value_t = 480)]
    height: usize,
    #[arg(long, default_value = "out/synthetic.png")]
    out: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
struct MetaDilate {
    operation: &'static str,
    structuring_element: &'static str,
    se_size: usize,
    border: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct MetaGaussian {
    operation: &'static str,
    kernel: &'static str,
    kernel_sum: u32,
    border: &'static str,
    rounding: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct MetaThreshold {
    operation: &'static str,
    level: u8,
    rule: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct VerifyReport {
    passed: bool,
    total: usize,
    mismatches: usize,
    mismatch_rate: f32,
    max_error: f32,
    first_mismatch: Option<usize>,
    tolerance: f32,
    max_mismatch_rate: f32,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Dilate(args) => run_dilate(args),
        Command::Gaussian(args) => run_gaussian(args),
        Command::Threshold(args) => run_threshold(args),
        Command::Verify(args) => run_verify(args),
        Command::Synthetic(args) => run_synthetic(args),
    }
}

fn run_dilate(args: KernelArgs) -> Result<()> {
    let img = load_input_u8(&args.input)?;
    info!(
        width = img.width(),
        height = img.height(),
        "running dilate3x3"
    );

    let mut output = vec![0u8; img.width() * img.height()];
    dilate3x3_u8(img.data(), &mut output, img.width(), img.height())
        .context("running dilate3x3 reference kernel")?;

    let case_dir = prepare_out_dir(&args.out, "dilate")?;
    save_luma_raw(case_dir.join("output.png"), img.width(), img.height(), output)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaDilate {
            operation: "dilate",
            structuring_element: "square",
            se_size: 3,
            border: "replicate",
        },
    )?;

    info!(out = %case_dir.display(), "dilate done");
    Ok(())
}

fn run_gaussian(args: KernelArgs) -> Result<()> {
    let img = load_input_u8(&args.input)?;
    info!(
        width = img.width(),
        height = img.height(),
        "running gaussian5x5"
    );

    let mut output = vec![0u8; img.width() * img.height()];
    gaussian5x5_u8(img.data(), &mut output, img.width(), img.height())
        .context("running gaussian5x5 reference kernel")?;

    let case_dir = prepare_out_dir(&args.out, "gaussian")?;
    save_luma_raw(case_dir.join("output.png"), img.width(), img.height(), output)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaGaussian {
            operation: "gaussian",
            kernel: "binomial [1 4 6 4 1] x [1 4 6 4 1]",
            kernel_sum: 256,
            border: "replicate",
            rounding: "half up",
        },
    )?;

    info!(out = %case_dir.display(), "gaussian done");
    Ok(())
}

fn run_threshold(args: ThresholdArgs) -> Result<()> {
    let img = load_input_u8(&args.common.input)?;
    info!(
        width = img.width(),
        height = img.height(),
        level = args.level,
        "running threshold"
    );

    let mut output = vec![0u8; img.width() * img.height()];
    threshold_u8(
        img.data(),
        &mut output,
        img.width(),
        img.height(),
        args.level,
    )
    .context("running threshold reference kernel")?;

    let case_dir = prepare_out_dir(&args.common.out, "threshold")?;
    save_luma_raw(case_dir.join("output.png"), img.width(), img.height(), output)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaThreshold {
            operation: "threshold",
            level: args.level,
            rule: "value > level maps to 255, else 0",
        },
    )?;

    info!(out = %case_dir.display(), "threshold done");
    Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<()> {
    let actual = load_input_u8(&args.actual)?;
    let reference = load_input_u8(&args.reference)?;

    if actual.width() != reference.width() || actual.height() != reference.height() {
        bail!(
            "image dimensions differ: actual ({}, {}), reference ({}, {}).",
            actual.width(),
            actual.height(),
            reference.width(),
            reference.height()
        );
    }

    let cmp = with_tolerance(
        actual.data(),
        reference.data(),
        reference.width(),
        reference.height(),
        args.tolerance,
        args.max_mismatch_rate,
    )
    .context("comparing images")?;

    let report = VerifyReport {
        passed: cmp.passed,
        total: cmp.total,
        mismatches: cmp.mismatches,
        mismatch_rate: cmp.mismatch_rate(),
        max_error: cmp.max_error,
        first_mismatch: cmp.first_mismatch,
        tolerance: args.tolerance,
        max_mismatch_rate: args.max_mismatch_rate,
    };
    println!("{}", serde_json::to_string_pretty(&report).context("serializing report")?);

    if !cmp.passed {
        bail!(
            "verification failed: {}/{} pixels out of tolerance, max error {}.",
            cmp.mismatches,
            cmp.total,
            cmp.max_error
        );
    }

    info!("verification passed");
    Ok(())
}

fn run_synthetic(args: SyntheticArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("synthetic image dimensions must be positive.");
    }

    // Diagonal gradient: dark top-left, bright bottom-right.
    let mut data = Vec::with_capacity(args.width * args.height);
    for y in 0..args.height {
        for x in 0..args.width {
            let v = (x * 255 / args.width + y * 255 / args.height) / 2;
            data.push(v as u8);
        }
    }

    if let Some(parent) = args.out.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    save_luma_raw(args.out.clone(), args.width, args.height, data)?;

    info!(out = %args.out.display(), "synthetic gradient written");
    Ok(())
}

fn prepare_out_dir(out: &Path, case_name: &str) -> Result<PathBuf> {
    let case_dir = out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;
    Ok(case_dir)
}

fn load_input_u8(path: &Path) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing image from {}", path.display()))
}

fn save_luma_raw(path: PathBuf, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(width as u32, height as u32, data)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}
