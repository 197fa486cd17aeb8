use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use sumodb::scraper::WebScraper;
use sumodb::types::Rikishi;

#[derive(Parser)]
#[command(name = "sumodb")]
#[command(about = "A sumodb.sumogames.de rikishi profile scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one or more rikishi profiles by their SumoDB id
    Fetch {
        #[arg(
            required = true,
            help = "SumoDB rikishi id(s), e.g. 12370",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        ids: Vec<u32>,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Parse a saved Rikishi.aspx page instead of fetching it
    Parse {
        #[arg(help = "Path to the saved HTML page")]
        file: PathBuf,

        #[arg(
            long,
            help = "SumoDB id to stamp on the record",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        id: u32,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

fn print_rikishi(rikishi: &[Rikishi], format: &OutputFormat) {
    match format {
        OutputFormat::Json => serialize_json(&rikishi),
        OutputFormat::Text => {
            for r in rikishi {
                println!("{}\n", r);
            }
        }
    }
}

fn render_rikishi(rikishi: &Rikishi, format: &OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(rikishi),
        OutputFormat::Text => Ok(rikishi.to_string()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    match cli.command {
        Commands::Fetch { ids, format } => {
            let scraper = WebScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });

            let mut fetched = Vec::with_capacity(ids.len());
            let mut failed = false;

            for (id, result) in scraper.fetch_rikishi_batch(&ids).await {
                match result {
                    Ok(rikishi) => fetched.push(rikishi),
                    Err(e) => {
                        log::error!("There was an issue scraping rikishi({}): {}", id, e);
                        failed = true;
                    }
                }
            }

            print_rikishi(&fetched, &format);

            if failed {
                process::exit(1);
            }
        }

        Commands::Parse { file, id, format } => {
            let html = fs::read_to_string(&file).unwrap_or_else(|e| {
                log::error!("Error reading {}: {}", file.display(), e);
                process::exit(1);
            });

            let rikishi = sumodb::parse_rikishi_page(&html, id).unwrap_or_else(|e| {
                log::error!("Error parsing {}: {}", file.display(), e);
                process::exit(1);
            });

            match render_rikishi(&rikishi, &format) {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    log::error!("Error serializing to JSON: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
