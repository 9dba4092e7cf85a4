// Command-line front end.
// Prints the rendered activity list for a user to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use github_activity::config::{DEFAULT_CACHE_TIMEOUT_SECS, DEFAULT_LIMIT, DEFAULT_USER};
use github_activity::{
    ActivityCache, ActivityRequest, ActivityService, Config, FileCache, MemoryCache,
};

#[derive(Parser, Debug)]
#[command(
    name = "github-activity",
    version,
    about = "Render a GitHub user's public activity as HTML"
)]
struct Args {
    /// GitHub login whose public events are rendered
    #[arg(short, long, default_value = DEFAULT_USER)]
    user: String,

    /// Maximum number of events to render
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Cache lifetime in seconds (0 disables caching)
    #[arg(short, long, default_value_t = DEFAULT_CACHE_TIMEOUT_SECS)]
    cache: u64,

    /// Keep fetched feeds on disk between runs
    #[arg(long)]
    file_cache: bool,

    /// Directory for the on-disk cache
    #[arg(long, env = "GITHUB_ACTIVITY_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Show unrecognized event types and enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(args: &Args) {
    let default_filter = if args.verbose {
        "trace"
    } else if args.debug {
        "debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn select_cache(args: &Args) -> Box<dyn ActivityCache> {
    if !args.file_cache {
        return Box::new(MemoryCache::new());
    }

    let store = match &args.cache_dir {
        Some(dir) => Some(FileCache::new(dir)),
        None => FileCache::in_default_location(),
    };

    match store {
        Some(store) => {
            tracing::debug!(root = %store.root().display(), "using file cache");
            Box::new(store)
        }
        None => {
            tracing::warn!("no cache directory available, caching in memory");
            Box::new(MemoryCache::new())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    let mut config = Config::from_env();
    config.diagnostics |= args.debug;

    let service = match ActivityService::from_config(&config, select_cache(&args)) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let request = ActivityRequest {
        user: args.user,
        limit: args.limit,
        cache_timeout_secs: args.cache,
    };
    println!("{}", service.render_activity(&request).await);

    ExitCode::SUCCESS
}
