//! worm-counter CLI — count worms on one fluorescence microscopy image.

use std::path::PathBuf;

use clap::Parser;

use worm_counter::{ColorProfile, Error, Result, annotate, count_worms};

#[derive(Parser)]
#[command(name = "worm-counter")]
#[command(about = "Count C. elegans worms on a fluorescence microscopy image")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    #[arg(short = 'i', long)]
    image: PathBuf,

    /// Path to write the annotated output image. No image is written when
    /// omitted; the count is the only output.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Color mode, GFP or mCherry. Default is GFP.
    #[arg(short = 'c', long)]
    colormode: Option<String>,

    /// Path to a file containing the lower and upper color bounds, one
    /// comma-separated blue,green,red triple per line. Takes precedence over
    /// --colormode.
    #[arg(short = 'b', long)]
    bounds_file: Option<PathBuf>,
}

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(flexi_logger::Logger::start)
        .ok();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Configuration errors abort before any image processing.
    if !cli.image.is_file() {
        return Err(Error::InputNotFound(cli.image));
    }
    let profile = ColorProfile::resolve(cli.colormode.as_deref(), cli.bounds_file.as_deref())?;

    let image = image::open(&cli.image)?.to_rgb8();
    let result = count_worms(&image, &profile);
    println!("#worms : {}", result.total);

    if let Some(path) = cli.output {
        let annotated = annotate(&image, &result.classifications, result.total);
        annotated.save(path)?;
    }

    Ok(())
}
