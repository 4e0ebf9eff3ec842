use anyhow::{Context, Result};
use clap::Parser;
use scattergram::csv_reader;
use scattergram::parser;
use scattergram::{render_with, DisplayMode, RenderOptions};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scattergram")]
#[command(about = "Draw a scatter plot from CSV data", long_about = None)]
struct Args {
    /// Column mapping (e.g., 'aes(x: time, y: temp, hue: sensor)')
    mapping: String,

    /// Read CSV from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the plot PNG to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixels per logical unit of the 10x6 figure
    #[arg(long, default_value_t = 100)]
    dpi: u32,

    /// Never open the plot in a viewer
    #[arg(long)]
    no_display: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Read CSV from the given file, or from stdin
    let data = match &args.input {
        Some(path) => csv_reader::read_csv_from_path(path)?,
        None => csv_reader::read_csv_from_stdin().context("Failed to read CSV from stdin")?,
    };

    // Parse the mapping string
    let mapping = match parser::parse_mapping(&args.mapping) {
        Ok((_, mapping)) => mapping,
        Err(e) => {
            eprintln!("Parse error: {:?}", e);
            std::process::exit(1);
        }
    };

    let options = RenderOptions {
        dpi: args.dpi,
        display: if args.no_display {
            DisplayMode::Headless
        } else {
            DisplayMode::Auto
        },
    };

    // Render the plot
    let (figure, _) = render_with(
        &data,
        &mapping.x,
        &mapping.y,
        mapping.hue.as_deref(),
        &options,
    )
    .context("Failed to render plot")?;

    // Write PNG to the given file, or to stdout
    match &args.output {
        Some(path) => figure.save(path)?,
        None => {
            let png_bytes = figure.to_png()?;
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&png_bytes)
                .context("Failed to write PNG to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
