use cf_meme::caption::{self, Caption};
use cf_meme::process::Pipeline;
use cf_meme::{config, logging, output};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cf-meme")]
#[command(about = "Find an image for a caption and put the caption on it")]
#[command(long_about = "\
Find an image for a caption and put the caption on it

Each caption is searched for on the web. The first result that downloads
as a JPEG, PNG or GIF gets the caption drawn near the bottom in white with
a black outline, and is saved as <id>.<format>, where <id> is the first 8
hex digits of the caption's MD5. Captions that already have a file are
skipped, so a caption file can be rerun safely.

Examples:

  cf-meme \"one does not simply\"
  cf-meme -f quotes.txt
  cf-meme -f quotes.txt --output-dir memes --font Impact.ttf

Run 'cf-meme --gen-config' to print a documented cf-meme.toml.")]
#[command(version)]
struct Cli {
    /// Caption to turn into a meme
    #[arg(required_unless_present_any = ["caption_file", "gen_config"])]
    caption: Option<String>,

    /// File with one caption per line
    #[arg(short = 'f', long = "file", value_name = "CAPTION_FILE", conflicts_with = "caption")]
    caption_file: Option<PathBuf>,

    /// Config file [default: cf-meme.toml, if present]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory memes are written to (overrides config)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// TrueType font to draw captions with (overrides config)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print a stock cf-meme.toml with all options documented
    #[arg(long)]
    gen_config: bool,

    /// Log search and download details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    logging::init(cli.verbose);

    let mut site_config = match &cli.config {
        Some(path) => config::load_config(path, true)?,
        None => config::load_config(&PathBuf::from(config::DEFAULT_CONFIG_FILE), false)?,
    };
    if let Some(dir) = cli.output_dir {
        site_config.output_dir = dir;
    }
    if let Some(font) = cli.font {
        site_config.text.font = font;
    }

    let captions = match (&cli.caption_file, cli.caption) {
        (Some(path), _) => caption::read_captions(path)?,
        (None, Some(text)) => vec![Caption::new(text)],
        (None, None) => Vec::new(),
    };

    let pipeline = Pipeline::from_config(&site_config)?;

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_event(&event);
        }
    });
    let summary = pipeline.run(&captions, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;

    if captions.len() > 1 {
        output::print_summary(&summary);
    }

    Ok(())
}
