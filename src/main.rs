use std::error::Error;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};

use iconfolio::{
    Exporter, Favorites, HiddenConfig, IconCatalog, IconRecord, RecolorSession, SearchFilter,
    save_svg,
};

#[derive(Parser)]
#[command(name = "iconfolio", about = "SVG icon catalog, recoloring, and export toolkit")]
struct Cli {
    /// Root directory of the icon source tree.
    #[arg(long, default_value = "icons")]
    icons_dir: PathBuf,

    /// Path to the hidden-list artifact.
    #[arg(long, default_value = "hidden-icons.json")]
    hidden_list: PathBuf,

    /// Path to the favorites artifact.
    #[arg(long, default_value = "favorites.json")]
    favorites: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List catalog records, optionally filtered.
    List {
        /// Substring query over names, categories, and keywords.
        #[arg(long)]
        query: Option<String>,

        /// Restrict to the given categories.
        #[arg(long)]
        category: Vec<String>,

        /// Restrict to starred icons.
        #[arg(long)]
        favorites_only: bool,
    },

    /// Show the recolorable color tokens of one icon.
    Colors {
        /// The record's source path, e.g. icons/azure/home.svg.
        file_path: String,
    },

    /// Apply color substitutions and write the result.
    Recolor {
        file_path: String,

        /// A substitution, e.g. --set '#FF0000=#00FF00'. Repeatable.
        #[arg(long = "set", value_name = "FROM=TO")]
        set: Vec<String>,

        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Copy an icon to the system clipboard.
    Copy {
        file_path: String,

        /// Copy as an image (falls back tier by tier) instead of markup text.
        #[arg(long)]
        image: bool,
    },

    /// Save an icon to a .svg file.
    Save {
        file_path: String,

        /// Directory to save into.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Print the suggested hidden-list that would hide an icon.
    Hide { file_path: String },

    /// Print the suggested hidden-list that would unhide an icon.
    Unhide { file_path: String },
}

fn main() {
    if let Ok(()) = log::set_logger(&LOGGER) {
        log::set_max_level(log::LevelFilter::Warn);
    }

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}.");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let hidden = HiddenConfig::load(&cli.hidden_list)?;

    match cli.command {
        Command::List { query, category, favorites_only } => {
            let catalog = IconCatalog::scan_dir(&cli.icons_dir, &hidden)?;
            let favorites = Favorites::load(&cli.favorites)?;
            let search = SearchFilter {
                query: query.unwrap_or_default(),
                categories: category,
                favorites_only,
                ..SearchFilter::default()
            };
            let hits = iconfolio::search::filter(catalog.list(), &search, &favorites);
            for record in &hits {
                println!("{:<32} {:<16} {}", record.name, record.category, record.file_path);
            }
            println!("{} icon(s)", hits.len());
        }

        Command::Colors { file_path } => {
            let catalog = IconCatalog::scan_dir(&cli.icons_dir, &hidden)?;
            let session = RecolorSession::open(find_record(&catalog, &file_path)?);
            if !session.has_editable_colors() {
                println!("No recolorable colors in {}", session.name());
            } else {
                for color in session.colors() {
                    println!("{color}");
                }
            }
        }

        Command::Recolor { file_path, set, output } => {
            let catalog = IconCatalog::scan_dir(&cli.icons_dir, &hidden)?;
            let mut session = RecolorSession::open(find_record(&catalog, &file_path)?);
            for pair in &set {
                let (from, to) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("expected FROM=TO, got {pair:?}"))?;
                if !session.set_color(from, to) {
                    return Err(format!("{from:?} is not a color of this icon").into());
                }
            }
            let svg = session.current_svg();
            match output {
                Some(path) => std::fs::write(&path, svg)?,
                None => println!("{svg}"),
            }
        }

        Command::Copy { file_path, image } => {
            let catalog = IconCatalog::scan_dir(&cli.icons_dir, &hidden)?;
            let record = find_record(&catalog, &file_path)?;
            let mut exporter = Exporter::system();
            let receipt = if image {
                exporter.copy_as_image(&record.svg, &record.name)?
            } else {
                exporter.copy_as_text(&record.svg, &record.name)?
            };
            println!("{}", receipt.notice().message);
        }

        Command::Save { file_path, dir } => {
            let catalog = IconCatalog::scan_dir(&cli.icons_dir, &hidden)?;
            let record = find_record(&catalog, &file_path)?;
            let receipt = save_svg(&record.svg, &dir, &record.name)?;
            println!("{}", receipt.notice().message);
        }

        Command::Hide { file_path } => {
            let suggested = hidden.with_hidden(&file_path, unix_timestamp());
            println!("To hide {file_path} permanently, update the hidden-list artifact to:");
            println!("{}", suggested.to_json_pretty()?);
        }

        Command::Unhide { file_path } => {
            let suggested = hidden.without_hidden(&file_path, unix_timestamp());
            println!("To unhide {file_path}, update the hidden-list artifact to:");
            println!("{}", suggested.to_json_pretty()?);
        }
    }

    Ok(())
}

fn find_record<'a>(catalog: &'a IconCatalog, file_path: &str) -> Result<&'a IconRecord, String> {
    catalog
        .get(file_path)
        .ok_or_else(|| format!("no record with path {file_path:?} (see `iconfolio list`)"))
}

/// Seconds since the Unix epoch, as the opaque hidden-list timestamp.
fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default()
}

static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
