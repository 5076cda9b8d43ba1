//! Vacancy aggregator CLI
//!
//! Fetches vacancies into label-named files, then filters and ranks them.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use vacancy_aggregator::{
    error::{AppError, Result},
    models::{Config, Provider, TopNMode},
    pipeline::{self, FetchJob, Filter, ProcessOptions, ProviderOutcome},
    services::{AreaLookup, IdentityAllocator, Normalizer, connector_for},
    storage::LocalStorage,
    utils::http,
};

/// Vacancy aggregator - HeadHunter + SuperJob
#[derive(Parser, Debug)]
#[command(name = "vacancies", version, about = "Aggregate and rank job vacancies")]
struct Cli {
    /// Directory holding config.toml and the data files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ProviderArg {
    Hh,
    Sj,
    All,
}

impl ProviderArg {
    fn providers(self) -> Vec<Provider> {
        match self {
            ProviderArg::Hh => vec![Provider::HeadHunter],
            ProviderArg::Sj => vec![Provider::SuperJob],
            ProviderArg::All => Provider::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch vacancies and store the raw responses
    Fetch {
        /// Search query
        #[arg(short, long)]
        keyword: String,

        /// Pages per provider (100 vacancies each)
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        #[arg(long, value_enum, default_value_t = ProviderArg::All)]
        provider: ProviderArg,

        /// Name for the stored files (default: the keyword)
        #[arg(short, long)]
        label: Option<String>,

        /// HeadHunter area id
        #[arg(long)]
        area: Option<String>,

        /// SuperJob region id
        #[arg(long)]
        region: Option<String>,
    },

    /// Reload stored vacancies, filter, sort and select
    Process {
        #[arg(short, long)]
        label: String,

        /// Text to look for in requirements or description
        #[arg(long)]
        keyword_filter: Option<String>,

        /// Salary filter: "40000-60000" or "80000"
        #[arg(long)]
        salary: Option<String>,

        /// Region/city substring
        #[arg(long)]
        region: Option<String>,

        /// Only vacancies without experience or from 1 year
        #[arg(long)]
        low_experience: bool,

        /// Keep the N highest salaries
        #[arg(long)]
        top: Option<usize>,

        /// Use the historical top-N slicing (N-1 results)
        #[arg(long)]
        legacy_top: bool,

        /// Remove a vacancy id from the result (repeatable)
        #[arg(long)]
        delete: Vec<u64>,

        /// Write result_{label}.json
        #[arg(long)]
        save: bool,

        /// Print the resulting vacancies
        #[arg(long)]
        show: bool,
    },

    /// Look up a HeadHunter area id by name
    Areas {
        #[arg(long)]
        region: String,

        #[arg(long)]
        town: Option<String>,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    let storage = LocalStorage::new(&cli.storage_dir);

    match cli.command {
        Command::Fetch {
            keyword,
            pages,
            provider,
            label,
            area,
            region,
        } => {
            let client = http::create_client(&config.http)?;
            let label = label.unwrap_or_else(|| keyword.clone());

            let connectors: Vec<_> = provider
                .providers()
                .into_iter()
                .map(|p| connector_for(p, &config, client.clone()))
                .collect();
            let jobs: Vec<FetchJob<'_>> = connectors
                .iter()
                .map(|c| FetchJob {
                    connector: c.as_ref(),
                    region: match c.provider() {
                        Provider::HeadHunter => area.clone(),
                        Provider::SuperJob => region.clone(),
                    },
                })
                .collect();

            let report = pipeline::run_fetch(&storage, &jobs, &keyword, pages, &label).await?;
            for (provider, outcome) in &report.outcomes {
                match outcome {
                    ProviderOutcome::Stored { count, .. } => {
                        log::info!("{}: {} vacancies found", provider, count)
                    }
                    ProviderOutcome::Failed(e) => log::warn!("{}: skipped ({})", provider, e),
                    ProviderOutcome::NotRequested => {}
                }
            }
            if report.total() == 0 {
                log::warn!("No vacancies match the given criteria");
            }
        }

        Command::Process {
            label,
            keyword_filter,
            salary,
            region,
            low_experience,
            top,
            legacy_top,
            delete,
            save,
            show,
        } => {
            let mut filters = Vec::new();
            if let Some(text) = keyword_filter {
                filters.push(Filter::Keyword(text));
            }
            if let Some(spec) = salary {
                filters.push(Filter::Salary(spec.parse()?));
            }
            if let Some(text) = region {
                filters.push(Filter::Region(text));
            }
            if low_experience {
                filters.push(Filter::LowExperience);
            }

            let top_mode = if legacy_top {
                TopNMode::Legacy
            } else {
                config.selection.top_n_mode
            };
            let options = ProcessOptions {
                filters,
                top,
                top_mode,
                delete,
                save,
            };

            let normalizer = Normalizer::new(Arc::new(IdentityAllocator::new()));
            let report = pipeline::run_process(&storage, &normalizer, &label, &options).await?;

            for id in &report.not_found {
                log::warn!("No vacancy found with id {}", id);
            }
            if show {
                let separator = "+".repeat(38);
                for vacancy in &report.vacancies {
                    println!("{vacancy}\n{separator}");
                }
            }
        }

        Command::Areas { region, town } => {
            let client = http::create_client(&config.http)?;
            let lookup = AreaLookup::new(client, config.headhunter.areas_url.clone());
            match lookup.find(&region, town.as_deref()).await? {
                Some(found) => {
                    log::info!("Region {}: id {}", found.region_name, found.region_id);
                    if let Some((id, name)) = found.town {
                        log::info!("Town {}: id {}", name, id);
                    }
                }
                None => {
                    return Err(AppError::validation(format!("No area matches '{region}'")));
                }
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
