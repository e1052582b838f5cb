use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use fundbook::cli::run_script;
use fundbook::config::{load_categories, FundbookPaths, IdMode, Settings};
use fundbook::models::CategorySet;
use fundbook::services::Book;

#[derive(Parser)]
#[command(
    name = "fundbook",
    author = "Kaylee Beyene",
    version,
    about = "A small cash-and-card ledger driven by command scripts",
    long_about = "fundbook keeps accounts with a cash and a card balance, records \
                  purchases against them and reverses them. Commands are read \
                  from a script file or stdin, one per line."
)]
struct Cli {
    /// Base directory for config.json and categories.json
    #[arg(long, global = true, env = "FUNDBOOK_HOME")]
    config_dir: Option<PathBuf>,

    /// Item category file (JSON or YAML), overriding the settings
    #[arg(long, global = true)]
    categories: Option<PathBuf>,

    /// Issue zero-padded counter ids instead of random ones
    #[arg(long, global = true)]
    sequential_ids: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run ledger commands from a script (stdin when no file is given)
    Run {
        /// Script file, one command per line
        script: Option<PathBuf>,
        /// Stop at the first failing command and exit non-zero
        #[arg(long)]
        strict: bool,
    },

    /// Print the editable fields of each entity as JSON
    Fields,

    /// Show current configuration and paths
    Config {
        /// Write the default settings file if there is none yet
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.config_dir {
        Some(dir) => FundbookPaths::with_base_dir(dir),
        None => FundbookPaths::new()?,
    };
    let stored = Settings::load_or_create(&paths)?;
    let mut settings = stored.clone();
    if cli.sequential_ids {
        settings.id_mode = IdMode::Sequential;
    }
    if let Some(path) = cli.categories {
        settings.categories_file = Some(path);
    }

    fundbook::init_tracing(&settings.log_filter);

    match cli.command {
        Some(Commands::Run { script, strict }) => {
            let book = load_book(&paths, &settings)?;

            let summary = match script {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("Failed to open script {}", path.display()))?;
                    run_script(&book, BufReader::new(file), strict)?
                }
                None => run_script(&book, io::stdin().lock(), strict)?,
            };

            if let Some(line) = summary.stopped_at {
                bail!("script stopped at line {}", line);
            }
        }
        Some(Commands::Fields) => {
            let book = Book::from_settings(&settings, CategorySet::default());
            println!(
                "{}",
                serde_json::to_string_pretty(&book.attribute_directory())?
            );
        }
        Some(Commands::Config { init }) => {
            if init {
                if paths.settings_file().exists() {
                    println!(
                        "Settings file already exists: {}",
                        paths.settings_file().display()
                    );
                } else {
                    stored.save(&paths)?;
                    println!(
                        "Wrote default settings to {}",
                        paths.settings_file().display()
                    );
                }
                println!();
            }

            println!("fundbook Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!(
                "Categories file: {}",
                settings.categories_path(&paths).display()
            );
            println!();
            println!("Settings:");
            println!("  Schema:     {}", settings.schema_version);
            println!("  ID mode:    {:?}", settings.id_mode);
            println!("  Log filter: {}", settings.log_filter);
        }
        None => {
            println!("fundbook - cash and card ledger");
            println!();
            println!("Run 'fundbook --help' for usage information.");
            println!("Run 'fundbook run <SCRIPT>' to execute a command script.");
        }
    }

    Ok(())
}

fn load_book(paths: &FundbookPaths, settings: &Settings) -> Result<Book> {
    let path = settings.categories_path(paths);
    let categories = load_categories(&path).context("Failed to load item categories")?;
    Ok(Book::from_settings(settings, categories))
}
