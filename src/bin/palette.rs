use anyhow::{Context, Result};
use clap::Parser;
use image_to_palette_wasm::render::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use image_to_palette_wasm::{ClusterConfig, extract_palette_bytes};
use std::fs;
use std::path::PathBuf;

/// Extract the dominant colors of images and save them as swatch strips.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of dominant colors
    #[arg(short = 'k', long, default_value_t = 5)]
    n_colors: usize,

    /// Palette image width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Palette image height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// K-Means seed
    #[arg(long, default_value_t = ClusterConfig::default().seed)]
    seed: u64,

    /// Independent K-Means runs; the tightest clustering wins
    #[arg(long, default_value_t = ClusterConfig::default().runs)]
    runs: u32,

    /// Maximum K-Means iterations per run
    #[arg(long, default_value_t = ClusterConfig::default().max_iter)]
    max_iter: usize,

    /// Output directory for palette images
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Output filename prefix (ignored when --out-dir supplied)
    #[arg(short = 'p', long, default_value = "palette_")]
    prefix: String,

    /// Print swatches as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Only print the palette, do not write palette images
    #[arg(long)]
    no_save: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = ClusterConfig {
        seed: args.seed,
        runs: args.runs,
        max_iter: args.max_iter,
        ..ClusterConfig::default()
    };

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let output = extract_palette_bytes(&bytes, args.n_colors, args.width, args.height, &config)
            .with_context(|| format!("palette extraction failed for {}", input.display()))?;

        if args.json {
            let value = serde_json::json!({
                "input": input.display().to_string(),
                "palette": output.swatches,
            });
            println!("{value}");
        } else {
            println!("{}:", input.display());
            for swatch in &output.swatches {
                println!("  {swatch}  #{}", swatch.hex());
            }
        }

        if args.no_save {
            continue;
        }

        let stem = input
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        let out_path = match &args.out_dir {
            Some(dir) => dir.join(format!("{stem}.png")),
            None => PathBuf::from(format!("{}{stem}.png", args.prefix)),
        };

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, &output.png)
            .with_context(|| format!("writing {}", out_path.display()))?;
        if !args.json {
            println!("Saved → {}", out_path.display());
        }
    }

    Ok(())
}
