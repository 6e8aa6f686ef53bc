use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use relutil::config::TemplateConfig;
use relutil::package::pipeline::PackageOptions;
use relutil::timesync::client::TimeSyncClient;
use relutil::timesync::sampler::DEFAULT_REQUESTS;
use relutil::version::generate::DEFAULT_GENERATE_COUNT;

#[derive(Parser)]
#[command(name = "relutil")]
#[command(version, about = "Small release automation utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate versions from templates, then sort and filter them
    Versions {
        /// Target version the generated versions are compared against
        target: String,
        /// Path to the JSON config mapping service names to templates
        config: PathBuf,
        /// Seed for the version generator
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Number of versions generated per template
        #[arg(long, default_value_t = DEFAULT_GENERATE_COUNT)]
        count: usize,
    },
    /// Probe a time-sync endpoint and report the clock offset
    Timesync {
        /// Endpoint returning `{"timestamp": ..., "timezone_id": ...}`
        #[arg(long)]
        url: Option<String>,
        /// Number of probes in the series
        #[arg(long, default_value_t = DEFAULT_REQUESTS)]
        requests: usize,
    },
    /// Clone a repository, prune it, stamp a version file, and zip it
    Package {
        /// Repository clone URL
        repo_url: String,
        /// Path of the source tree to keep, relative to the checkout root
        source_path: PathBuf,
        /// Version written into version.json
        version: String,
        /// Directory the checkout and archive are created in
        #[arg(long, default_value = ".")]
        work_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Versions {
            target,
            config,
            seed,
            count,
        } => {
            let config = TemplateConfig::load(&config)?;
            let mut rng = StdRng::seed_from_u64(seed);
            relutil::version::pipeline::run(&config, &target, count, &mut rng, &mut stdout)?;
        }
        Command::Timesync { url, requests } => {
            let client = url
                .as_deref()
                .map(TimeSyncClient::new)
                .unwrap_or_default();
            runtime()?.block_on(relutil::timesync::sampler::run_series(
                &client,
                requests,
                &mut stdout,
            ))?;
        }
        Command::Package {
            repo_url,
            source_path,
            version,
            work_dir,
        } => {
            let opts = PackageOptions {
                repo_url,
                source_path,
                version,
                work_dir,
            };
            let archive = runtime()?.block_on(relutil::package::pipeline::run(&opts))?;
            writeln!(stdout, "{}", archive.display())?;
        }
    }

    Ok(())
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
