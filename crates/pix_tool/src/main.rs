use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use pix_font::{FontLibrary, Position, Rectangle, TextMeasure};
use pix_menu::{LayoutOutcome, MenuFile, MenuHost, MenuLayoutEngine};

mod font;
mod report;

#[derive(Parser, Debug)]
#[command(version, about = "Measures text and lays out menu bars with bitmap fonts")]
pub struct Cli {
    #[arg(help = "Log level, e.g. warn or pix_font=debug", long, default_value = "warn")]
    log_level: String,

    #[arg(help = "Metrics JSON of the font", long)]
    metrics: PathBuf,

    #[arg(help = "Font as typeface_size_style", long, default_value = "chicago_12_biuosdce")]
    font: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Print the extent of a string")]
    Measure { text: String },

    #[command(about = "Find the char of a text field at a position")]
    Hit {
        text: String,
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(help = "Where the text starts", long, default_value_t = 0)]
        origin_x: i32,
        #[arg(long, default_value_t = 0)]
        origin_y: i32,
        #[arg(help = "Width of the text field", long, default_value_t = 512)]
        field_width: i32,
    },

    #[command(about = "Lay out the menu bar of a TOML menu file")]
    LayoutMenu {
        menu: PathBuf,
        #[arg(long, default_value_t = 512)]
        width: i32,
        #[arg(long, default_value_t = 342)]
        height: i32,
        #[arg(help = "Index of the dropdown to open", long)]
        expand: Option<usize>,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let _logger = Logger::try_with_str(&args.log_level)?.log_to_stderr().start()?;

    let library = FontLibrary::new();
    let spec = font::parse_spec(&args.font)?;
    font::load_font(&library, &spec, &args.metrics)?;

    match args.command {
        Commands::Measure { text } => {
            let Some(font) = library.renderer_font(&spec) else {
                bail!("font {spec} isn't loaded");
            };
            let Some(result) = font.measure(&text) else {
                bail!("font {spec} isn't ready");
            };
            println!("{}", report::measured(&result));
        }
        Commands::Hit {
            text,
            x,
            y,
            origin_x,
            origin_y,
            field_width,
        } => {
            let font = library.renderer_font(&spec).with_context(|| format!("font {spec} isn't loaded"))?;
            let line_height = font.asset.line_height()?;
            let lines = text.lines().count().max(1) as i32;
            let field = Rectangle::from(0, 0, field_width, origin_y + lines * line_height);
            match font.char_at(&text, Position::new(origin_x, origin_y), field, x, y)? {
                Some(found) => println!("{}", report::hit(&found)),
                None => bail!("font {spec} isn't ready"),
            }
        }
        Commands::LayoutMenu { menu, width, height, expand } => {
            let file = MenuFile::load(&menu).with_context(|| format!("loading {}", menu.display()))?;
            let mut bar = file.build("menubar")?;
            if let Some(index) = expand {
                bar.expand(index)?;
            }

            let mut host = MenuHost::new(MenuLayoutEngine::new(file.constants));
            host.install(bar);
            let viewport = Rectangle::from(0, 0, width, height);
            if host.layout(viewport, &library.measure_with(&spec)) == LayoutOutcome::Incomplete {
                bail!("menu labels couldn't be measured with {spec}");
            }
            if let Some(bar) = host.bar() {
                print!("{}", report::menu_bar(bar));
            }
        }
    }
    Ok(())
}
