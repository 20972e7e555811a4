use anyhow::{Context, Result};
use clap::Parser;
use haarseg::simulation::{SignalSpec, StepSegment, generate_noisy_step_signal};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "generate_signal")]
#[command(about = "Generate synthetic noisy step signals for segmentation testing")]
struct Args {
    /// TOML signal description (segments, noise_sigma, seed)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output CSV file
    #[arg(short, long, default_value = "data/synthetic/signal.csv")]
    output: PathBuf,

    /// Segments as "length:level" pairs (e.g., "100:0,50:2.5,100:0")
    #[arg(long)]
    segments: Option<String>,

    /// Noise standard deviation (CLI override)
    #[arg(short = 'n', long)]
    noise_sigma: Option<f64>,

    /// Seed for reproducibility (CLI override)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the true breakpoints as JSON next to the signal
    #[arg(long)]
    manifest: bool,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    file: String,
    samples: usize,
    noise_sigma: f64,
    seed: Option<u64>,
    breakpoints: Vec<usize>,
}

fn parse_segments(s: &str) -> Result<Vec<StepSegment>> {
    s.split(',')
        .map(|part| {
            let (length, level) = part
                .trim()
                .split_once(':')
                .with_context(|| format!("Expected length:level, got {:?}", part))?;
            let length: usize = length
                .trim()
                .parse()
                .with_context(|| format!("Invalid segment length {:?}", length))?;
            let level: f64 = level
                .trim()
                .parse()
                .with_context(|| format!("Invalid segment level {:?}", level))?;
            Ok(StepSegment::new(length, level))
        })
        .collect()
}

fn load_toml_config(path: &Path) -> Result<SignalSpec> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_spec(args: &Args) -> Result<SignalSpec> {
    let mut spec = match args.config {
        Some(ref path) => load_toml_config(path)?,
        None => SignalSpec::default(),
    };

    if let Some(ref segments) = args.segments {
        spec.segments = parse_segments(segments)?;
    }
    if let Some(sigma) = args.noise_sigma {
        spec.noise_sigma = sigma;
    }
    if let Some(seed) = args.seed {
        spec.seed = Some(seed);
    }

    if spec.is_empty() {
        anyhow::bail!("No samples to generate: give --segments or a config with segments");
    }
    if !(spec.noise_sigma.is_finite() && spec.noise_sigma >= 0.0) {
        anyhow::bail!("Noise sigma must be non-negative, got {}", spec.noise_sigma);
    }
    Ok(spec)
}

fn write_signal(path: &Path, signal: &[f64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("Failed to create signal file")?;
    for value in signal {
        writer
            .write_record([value.to_string()])
            .context("Failed to write signal file")?;
    }
    writer.flush().context("Failed to write signal file")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let spec = build_spec(&args)?;
    let (signal, breakpoints) = generate_noisy_step_signal(&spec);

    let dir = args.output.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir).context("Failed to create output directory")?;
    }
    write_signal(&args.output, &signal)?;

    if args.manifest {
        let manifest = Manifest {
            file: args.output.display().to_string(),
            samples: signal.len(),
            noise_sigma: spec.noise_sigma,
            seed: spec.seed,
            breakpoints: breakpoints.clone(),
        };
        let manifest_path = args.output.with_extension("json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} samples in {}",
        signal.len(),
        args.output.display()
    );
    println!(
        "{}",
        breakpoints
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(",")
    );
    Ok(())
}
