use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use halftone::config::{BlurChoice, DitherMethod, LuminanceWeights, PipelineConfig, TransferVariant};
use halftone::netpbm;
use halftone::pipeline::{reconstruct, Pipeline};
use halftone_core::{
    blur, convert, difference, mean, power_sum, reduce, variance, BilevelImage, Ditherer,
    GrayscaleImage, TrueColorImage,
};

#[derive(Parser)]
#[command(name = "halftone")]
#[command(about = "Netpbm halftoning toolkit: color transfer, grayscale, dithering and blur")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an sRGB transfer function to a PPM image
    Convert {
        input: PathBuf,
        output: PathBuf,

        /// Target encoding
        #[arg(short, long, value_enum)]
        transfer: TransferVariant,
    },
    /// Reduce a PPM image to a PGM image
    Gray {
        input: PathBuf,
        output: PathBuf,

        /// Luminance weights
        #[arg(short, long, value_enum, default_value = "srgb")]
        luminance: LuminanceWeights,
    },
    /// Quantize a PGM image to a PBM image
    Dither {
        input: PathBuf,
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "floyd-steinberg")]
        method: DitherMethod,

        /// Fixed threshold as a fraction of max gray
        #[arg(long, default_value_t = 0.5)]
        threshold: f64,

        /// Seed for the random threshold
        #[arg(long)]
        seed: Option<u64>,

        /// PGM texture for blue-noise dithering
        #[arg(long)]
        blue_noise: Option<PathBuf>,
    },
    /// Box blur a PGM image, or a PBM image expanded to gray
    Blur {
        input: PathBuf,
        output: PathBuf,

        #[arg(short, long, default_value_t = 5)]
        radius: usize,

        #[arg(short, long, value_enum, default_value = "summed-area")]
        method: BlurChoice,
    },
    /// Write the per-pixel absolute difference of two PGM images
    Diff {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
    },
    /// Print mean, variance and a power sum of a PGM image
    Stats {
        input: PathBuf,

        /// Exponent for the power sum
        #[arg(short, long, default_value_t = 2.0)]
        power: f64,
    },
    /// Run the batch pipeline from a YAML file
    Run {
        /// Pipeline file
        #[arg(short, long, default_value = "halftone.yaml")]
        config: PathBuf,

        /// Input PPM, overrides the file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory, overrides the file
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Random seed, overrides the file
        #[arg(long)]
        seed: Option<u64>,

        /// Blur radius, overrides the file
        #[arg(long)]
        radius: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halftone=info,halftone_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            transfer,
        } => run_convert_command(&input, &output, transfer),
        Commands::Gray {
            input,
            output,
            luminance,
        } => run_gray_command(&input, &output, luminance),
        Commands::Dither {
            input,
            output,
            method,
            threshold,
            seed,
            blue_noise,
        } => run_dither_command(&input, &output, method, threshold, seed, blue_noise),
        Commands::Blur {
            input,
            output,
            radius,
            method,
        } => run_blur_command(&input, &output, radius, method),
        Commands::Diff {
            first,
            second,
            output,
        } => run_diff_command(&first, &second, &output),
        Commands::Stats { input, power } => run_stats_command(&input, power),
        Commands::Run {
            config,
            input,
            output_dir,
            seed,
            radius,
        } => run_pipeline_command(&config, input, output_dir, seed, radius),
    }
}

fn run_convert_command(input: &Path, output: &Path, variant: TransferVariant) -> anyhow::Result<()> {
    let image: TrueColorImage = netpbm::load(input)?;
    let converted = match variant.transfer() {
        Some(transfer) => convert(&image, transfer)?,
        None => image,
    };
    netpbm::save(&converted, output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_gray_command(input: &Path, output: &Path, luminance: LuminanceWeights) -> anyhow::Result<()> {
    let image: TrueColorImage = netpbm::load(input)?;
    let gray = reduce(&image, luminance.into())?;
    netpbm::save(&gray, output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_dither_command(
    input: &Path,
    output: &Path,
    method: DitherMethod,
    threshold: f64,
    seed: Option<u64>,
    blue_noise: Option<PathBuf>,
) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("threshold {threshold} outside 0..=1");
    }
    let image: GrayscaleImage = netpbm::load(input)?;
    let map = blue_noise
        .as_deref()
        .map(netpbm::load_threshold_map)
        .transpose()?;

    let mut ditherer = Ditherer::new(method.strategy(threshold, map.as_ref())?);
    if let Some(seed) = seed {
        ditherer = ditherer.seed(seed);
    }
    let bits = ditherer.quantize(&image)?;
    netpbm::save(&bits, output)?;
    println!(
        "Wrote {} ({} of {} pixels ink)",
        output.display(),
        bits.ink_count(),
        bits.width() * bits.height()
    );
    Ok(())
}

fn run_blur_command(
    input: &Path,
    output: &Path,
    radius: usize,
    method: BlurChoice,
) -> anyhow::Result<()> {
    let is_bilevel = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pbm"));
    let blurred = if is_bilevel {
        let bits: BilevelImage = netpbm::load(input)?;
        reconstruct(&bits, radius, method.into())?
    } else {
        let image: GrayscaleImage = netpbm::load(input)?;
        blur(&image, radius, method.into())?
    };
    netpbm::save(&blurred, output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_diff_command(first: &Path, second: &Path, output: &Path) -> anyhow::Result<()> {
    let a: GrayscaleImage = netpbm::load(first)?;
    let b: GrayscaleImage = netpbm::load(second)?;
    let diff = difference(&a, &b)?;
    netpbm::save(&diff, output)?;
    println!(
        "Wrote {} (mean difference {:.3})",
        output.display(),
        mean(&diff)
    );
    Ok(())
}

fn run_stats_command(input: &Path, power: f64) -> anyhow::Result<()> {
    let image: GrayscaleImage = netpbm::load(input)?;
    println!("{}", input.display());
    println!("  size:      {}x{}", image.width(), image.height());
    println!("  max gray:  {}", image.max_gray());
    println!("  over max:  {}", image.count_out_of_range());
    println!("  mean:      {:.4}", mean(&image));
    println!("  variance:  {:.4}", variance(&image));
    println!("  sum^{power}:   {:.4}", power_sum(&image, power));
    Ok(())
}

fn run_pipeline_command(
    config_path: &Path,
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    seed: Option<u64>,
    radius: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = PipelineConfig::load(config_path)?;
    if input.is_some() {
        config.input = input;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(radius) = radius {
        config.blur.radius = radius;
    }

    let pipeline = Pipeline::new(config)?;
    let report = pipeline.run_file()?;
    println!(
        "Wrote {} files to {}",
        report.len(),
        pipeline.config().output_dir.display()
    );
    Ok(())
}
