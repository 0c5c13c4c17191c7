use branch_atlas::branch;
use branch_atlas::config::{self, BranchSource, Config, API_KEY_ENV, DEFAULT_DELAY_MS};
use branch_atlas::location::cache::DEFAULT_CACHE_FILE;
use branch_atlas::location::{EnrichmentCache, GoogleMaps, DEFAULT_RADIUS_M};
use branch_atlas::{report, Pipeline, PipelineOptions, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Branch Atlas: enrich a store-finder branch list with province, region,
/// road class, and nearby points of interest.
///
/// Examples:
///   branch-atlas
///   branch-atlas --input branches.json --out-dir out/
///   branch-atlas --offline
#[derive(Parser)]
#[command(name = "branch-atlas", version, about, long_about = None)]
struct Cli {
    /// Google Maps API key.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Read branches from a saved feed file instead of the store API.
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Store-finder endpoint.
    #[arg(long, default_value = branch::DEFAULT_SOURCE_URL)]
    source_url: String,

    /// Location cache file.
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    cache: PathBuf,

    /// Directory for the CSV reports.
    #[arg(long, short = 'o', default_value = ".")]
    out_dir: PathBuf,

    /// Nearby-search radius in metres.
    #[arg(long, default_value_t = DEFAULT_RADIUS_M)]
    radius: u32,

    /// Pause after each uncached lookup, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Offline mode: only use the cache, never call Google.
    #[arg(long)]
    offline: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let source = match self.input {
            Some(path) => BranchSource::File(path),
            None => BranchSource::Url(self.source_url),
        };
        Config {
            api_key: self.api_key,
            source,
            cache_path: self.cache,
            out_dir: self.out_dir,
            radius_m: self.radius,
            delay: Duration::from_millis(self.delay_ms),
            offline: self.offline,
        }
    }
}

fn init_logger() {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(log::LevelFilter::Info),
    };
    builder.init();
}

fn main() {
    // .env first so RUST_LOG from it reaches the logger
    let dotenv = config::load_dotenv();
    init_logger();
    match dotenv {
        Ok(Some(path)) => log::debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => log::warn!("Could not read .env: {}", e),
    }

    let config = Cli::parse().into_config();

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    // ── Validate before touching any branch ─────────────────────

    config.validate()?;

    let cache = EnrichmentCache::load_from(&config.cache_path)?;
    if !cache.is_empty() {
        log::info!("Loaded {} cached Google entries from {}", cache.len(), cache.path().display());
    }

    // ── Fetch branches ──────────────────────────────────────────

    let branches = match &config.source {
        BranchSource::Url(url) => {
            log::info!("Fetching branch data from {}", url);
            branch::fetch_branches(url)?
        }
        BranchSource::File(path) => branch::load_branches(path)?,
    };
    log::info!("Total branches: {}", branches.len());

    // ── Enrich ──────────────────────────────────────────────────

    let maps = GoogleMaps::new(config.api_key().unwrap_or_default());
    let options = PipelineOptions {
        radius_m: config.radius_m,
        delay: config.delay,
        offline: config.offline,
    };
    let mut pipeline = Pipeline::new(maps, cache, options);
    let enriched = pipeline.run(&branches)?;

    // ── Reports ─────────────────────────────────────────────────

    let written = report::write_all(&config.out_dir, &enriched)?;
    for path in &written {
        log::info!("Saved {}", path.display());
    }

    println!("{}", report::render_summary(&enriched));
    Ok(())
}
