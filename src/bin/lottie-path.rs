use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use lottie_path::{AnimatablePathValue, DisplayScale, FrameRate, PathValueOpts};

#[derive(Parser, Debug)]
#[command(name = "lottie-path", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the compiled path, key times and easings as JSON.
    Inspect(InspectArgs),
    /// Print `progress x y` lines for evenly spaced progress values.
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct PropertyArgs {
    /// Input point property JSON (an object with a `k` member).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Composition frame rate.
    #[arg(long, default_value_t = 30.0)]
    frame_rate: f64,

    /// Display-density scale applied to spatial coordinates.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Treat coordinates as non-spatial (no display scaling).
    #[arg(long)]
    non_spatial: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    property: PropertyArgs,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[command(flatten)]
    property: PropertyArgs,

    /// Number of intervals; `steps + 1` samples are printed.
    #[arg(long, default_value_t = 10)]
    steps: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn read_property_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open property '{}'", path.display()))?;
    let r = BufReader::new(f);
    let v = serde_json::from_reader(r).with_context(|| "parse property JSON")?;
    Ok(v)
}

fn load_value(args: &PropertyArgs) -> anyhow::Result<AnimatablePathValue> {
    let opts = PathValueOpts {
        frame_rate: FrameRate::new(args.frame_rate)?,
        scale: DisplayScale::new(args.scale)?,
        spatial: !args.non_spatial,
        ..PathValueOpts::default()
    };
    let property = read_property_json(&args.in_path)?;
    let value = AnimatablePathValue::from_property(&property, &opts)
        .with_context(|| format!("compile '{}'", args.in_path.display()))?;
    Ok(value)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let value = load_value(&args.property)?;
    let out = match value.descriptor() {
        Some(d) => serde_json::to_string_pretty(d)?,
        None => {
            let p = value.initial_point();
            serde_json::to_string_pretty(&serde_json::json!({ "static": [p.x, p.y] }))?
        }
    };
    println!("{out}");
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    if args.steps == 0 {
        anyhow::bail!("--steps must be > 0");
    }
    let value = load_value(&args.property)?;
    let animation = value
        .build_animation()
        .with_context(|| format!("'{}' is not animated", args.property.in_path.display()))?;

    for i in 0..=args.steps {
        let progress = f64::from(i) / f64::from(args.steps);
        let p = animation.value_at(progress);
        println!("{progress:.4} {:.4} {:.4}", p.x, p.y);
    }
    Ok(())
}
