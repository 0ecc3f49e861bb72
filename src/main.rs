use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use wbm_scout::notify::{DiscordNotifier, LogNotifier, Notifier};
use wbm_scout::sources::{HtmlPageSource, ListingSource, PageLocation, TextFileSource};
use wbm_scout::{logging, AppliedLedger, BotConfig, FlatParser, LineFormat, Pipeline};

const WBM_URL: &str = "https://www.wbm.de/wohnungen-berlin/angebote/";
const DEFAULT_CONFIG: &str = "configs/wbm_config.json";
const DEFAULT_LEDGER: &str = "logging/successful_applications.json";

#[derive(Parser)]
#[command(name = "wbm-scout")]
#[command(about = "Watch WBM rental offers and report matching flats", long_about = None)]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Offers page (URL or .html file) or a `---` separated text dump
    #[arg(short, long, default_value = WBM_URL)]
    input: String,

    /// CSS selector of one listing on an offers page
    #[arg(long)]
    selector: Option<String>,

    #[arg(short, long, value_enum, default_value_t = LineFormat::PatternScan)]
    format: LineFormat,

    /// Keep blank lines in listing blocks
    #[arg(long)]
    test: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse listings and print them as JSON
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Filter listings against the config and notify new matches
    Run {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        #[arg(long, default_value = DEFAULT_LEDGER)]
        ledger: PathBuf,
    },
    /// Write a config file from WBM_* environment variables and seed the
    /// ledger from WBM_INITIAL_LOG_DATA
    InitConfig {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        out: PathBuf,

        #[arg(long, default_value = DEFAULT_LEDGER)]
        ledger: PathBuf,
    },
}

fn build_source(args: &InputArgs) -> anyhow::Result<Box<dyn ListingSource>> {
    let location = PageLocation::parse(&args.input);
    if let PageLocation::File(path) = &location {
        let is_html = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
        if !is_html {
            return Ok(Box::new(TextFileSource::new(path.clone())));
        }
    }

    let source = match &args.selector {
        Some(selector) => HtmlPageSource::with_selector(location, selector)?,
        None => HtmlPageSource::new(location)?,
    };
    Ok(Box::new(source))
}

fn build_parser(args: &InputArgs) -> FlatParser {
    FlatParser::new(args.format).preserve_blank_lines(args.test)
}

fn build_notifier(config: &BotConfig) -> anyhow::Result<Arc<dyn Notifier>> {
    if !config.discord_notifications {
        return Ok(Arc::new(LogNotifier));
    }

    match std::env::var("DISCORD_WEBHOOK_URL") {
        Ok(url) if !url.trim().is_empty() => Ok(Arc::new(DiscordNotifier::new(url)?)),
        _ => {
            warn!("Discord webhook URL not found. Discord notifications disabled 🚧");
            Ok(Arc::new(LogNotifier))
        }
    }
}

async fn parse_command(input: InputArgs) -> anyhow::Result<()> {
    let source = build_source(&input)?;
    let parser = build_parser(&input);

    let mut flats = Vec::new();
    for block in source.fetch_blocks().await? {
        if input.test {
            info!("Raw lines: {:?}", block.split('\n').collect::<Vec<_>>());
        }
        match parser.parse(&block) {
            Ok(flat) => flats.push(flat),
            Err(err) => warn!("Skipping listing: {}", err),
        }
    }

    println!("{}", serde_json::to_string_pretty(&flats)?);
    info!("✅ Parsed {} listings", flats.len());
    Ok(())
}

async fn run_command(input: InputArgs, config: PathBuf, ledger: PathBuf) -> anyhow::Result<()> {
    let config = BotConfig::load(&config)
        .with_context(|| format!("Failed to load config {}", config.display()))?;
    info!("📧 Using emails: {}", config.emails.join(", "));

    let source = build_source(&input)?;
    let ledger = AppliedLedger::open(ledger).await?;
    info!("📒 {} listings already handled", ledger.len());

    let notifier = build_notifier(&config)?;
    info!("🔔 Notifications via {}", notifier.channel_name());

    let mut pipeline = Pipeline::new(&config, build_parser(&input), ledger, notifier);
    let report = pipeline.run(source.as_ref()).await?;

    for outcome in &report.matched {
        println!(
            "{} | {} | {}",
            outcome.email,
            outcome.flat.title(),
            outcome.flat.content_hash()
        );
    }
    Ok(())
}

async fn init_config_command(out: PathBuf, ledger: PathBuf) -> anyhow::Result<()> {
    info!("Generating WBM config from environment variables...");

    let config = BotConfig::from_env()?;
    config.save(&out)?;

    info!("✅ Config file created successfully: {}", out.display());
    info!("📧 Using emails: {}", config.emails.join(", "));
    info!("💰 Max rent: {}€", config.flat_rent_below);
    info!("📏 Min size: {}m²", config.flat_size_above);
    info!("🏠 Min rooms: {}", config.flat_rooms_above);
    if !config.exclude.is_empty() {
        info!("🚫 Excluding: {}", config.exclude.join(", "));
    }

    info!("Initializing application ledger...");
    let initial = std::env::var("WBM_INITIAL_LOG_DATA").unwrap_or_else(|_| "{}".to_string());
    let ledger = AppliedLedger::seed(ledger, &initial).await?;
    info!(
        "✅ Ledger initialized with {} entries: {}",
        ledger.len(),
        ledger.path().display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    info!("🏠 WBM Scout v{}", wbm_scout::notify::BOT_VERSION);

    match cli.command {
        Commands::Parse { input } => parse_command(input).await,
        Commands::Run {
            input,
            config,
            ledger,
        } => run_command(input, config, ledger).await,
        Commands::InitConfig { out, ledger } => init_config_command(out, ledger).await,
    }
}
