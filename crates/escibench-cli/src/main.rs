//! escibench CLI
//!
//! Benchmark hosted search backends against ESCI graded relevance
//! judgments: run the queries, collect ranked results, score them.

// CLI tool - relax pedantic lints for ergonomics
#![allow(clippy::pedantic)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use escibench_cli::dataset::{
    build_ground_truth, validate_products, GroundTruthFilter, ProductValidationOptions,
};
use escibench_cli::{create_backend, run_queries, save_results, BenchmarkConfig, Pipeline};

#[derive(Parser)]
#[command(name = "escibench")]
#[command(author = "Wiscale France <contact@wiscale.fr>")]
#[command(version)]
#[command(about = "Benchmark hosted search backends against ESCI relevance judgments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run benchmark queries against the configured backends
    Search {
        /// Configuration file path
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Only query this backend (default: all configured)
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// Score collected results and append to the report store
    Evaluate {
        /// Configuration file path
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Cutoff override
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Validate configuration file
    Validate {
        /// Configuration file path
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },

    /// Generate example configuration
    Init {
        /// Output file path
        #[arg(short, long, default_value = "benchmark.yaml")]
        output: PathBuf,
    },

    /// Dataset tooling
    #[command(subcommand)]
    Dataset(DatasetCommands),
}

#[derive(Subcommand)]
enum DatasetCommands {
    /// Validate product image URLs and write the valid product set
    Products {
        /// Product catalog (JSON Lines)
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Category to keep (first entry of the category path)
        #[arg(long)]
        category: String,

        /// Output file for valid products (JSON Lines)
        #[arg(long, default_value = "data/valid_products.jsonl")]
        products_out: PathBuf,

        /// Output file for valid ASINs (JSON array)
        #[arg(long, default_value = "data/valid_asins.json")]
        asins_out: PathBuf,

        /// Concurrent image checks
        #[arg(long, default_value = "16")]
        concurrency: usize,

        /// Per-image timeout in seconds
        #[arg(long, default_value = "10")]
        timeout_secs: u64,
    },

    /// Build the ground-truth judgment file from the examples CSV
    Queries {
        /// ESCI examples export (CSV)
        #[arg(long, value_name = "FILE")]
        examples: PathBuf,

        /// Valid ASINs file from `dataset products`
        #[arg(long, default_value = "data/valid_asins.json")]
        valid_asins: PathBuf,

        /// Output ground-truth file
        #[arg(long, default_value = "data/queries.json")]
        output: PathBuf,

        /// Product locale to keep
        #[arg(long, default_value = "us")]
        locale: String,

        /// Grade labels to keep
        #[arg(long, value_delimiter = ',', default_value = "E,S,C,I")]
        labels: Vec<String>,

        /// Dataset split to keep
        #[arg(long, default_value = "train")]
        split: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Search { config, backend } => {
            run_search(&config, backend.as_deref()).await?;
        }
        Commands::Evaluate { config, k } => {
            run_evaluate(&config, k)?;
        }
        Commands::Validate { config } => {
            validate_config(&config)?;
        }
        Commands::Init { output } => {
            generate_config(&output)?;
        }
        Commands::Dataset(command) => {
            run_dataset(command).await?;
        }
    }

    Ok(())
}

async fn run_search(config_path: &PathBuf, only: Option<&str>) -> anyhow::Result<()> {
    info!("Loading configuration from {:?}", config_path);
    let config = BenchmarkConfig::from_file(config_path)?;
    config.validate()?;

    let judgments = escibench_core::load_judgments(&config.queries_file)?;
    info!("Loaded {} benchmark queries", judgments.len());

    let mut ran = 0usize;
    for backend_config in &config.backends {
        let name = backend_config.name();
        if only.is_some_and(|o| o != name) {
            continue;
        }

        let mut backend = create_backend(backend_config);
        backend.connect().await?;

        let (results, stats) = run_queries(backend.as_ref(), &judgments, &config.options).await;
        let out = config.results_file(name);
        save_results(&out, &results)?;

        println!(
            "✅ {}: {} queries ({} failed) -> {:?} [{:.1} q/sec]",
            name,
            stats.queries,
            stats.failed,
            out,
            stats.throughput()
        );
        ran += 1;
    }

    if ran == 0 {
        anyhow::bail!(
            "no configured backend matched {:?}",
            only.unwrap_or("<all>")
        );
    }
    Ok(())
}

fn run_evaluate(config_path: &PathBuf, k: Option<usize>) -> anyhow::Result<()> {
    info!("Loading configuration from {:?}", config_path);
    let mut config = BenchmarkConfig::from_file(config_path)?;
    if let Some(k) = k {
        config.evaluation.k = k;
    }
    config.validate()?;

    let summary = Pipeline::new(config.clone()).run()?;

    println!("\n✅ Evaluation Complete!");
    println!("   Evaluated: {}", summary.evaluated);
    println!("   Skipped:   {}", summary.failed);
    println!("   Duration:  {:.2}s", summary.duration_secs);
    println!("   Report:    {:?}", config.report_file);

    Ok(())
}

fn validate_config(config_path: &PathBuf) -> anyhow::Result<()> {
    let config = BenchmarkConfig::from_file(config_path)?;
    config.validate()?;

    println!("✅ Configuration is valid!");
    println!(
        "   Backends:  {}",
        config
            .backends
            .iter()
            .map(|b| b.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("   Queries:   {:?}", config.queries_file);
    println!("   Cutoff:    k={}", config.evaluation.k);
    println!("   Report:    {:?}", config.report_file);

    Ok(())
}

fn generate_config(output: &PathBuf) -> anyhow::Result<()> {
    std::fs::write(output, CONFIG_TEMPLATE)?;
    println!("✅ Generated configuration: {:?}", output);
    println!("   Edit the file and run: escibench search --config {:?}", output);
    Ok(())
}

async fn run_dataset(command: DatasetCommands) -> anyhow::Result<()> {
    match command {
        DatasetCommands::Products {
            catalog,
            category,
            products_out,
            asins_out,
            concurrency,
            timeout_secs,
        } => {
            if let Some(parent) = products_out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let options = ProductValidationOptions {
                category,
                concurrency,
                timeout: Duration::from_secs(timeout_secs),
                progress: true,
            };
            let stats = validate_products(&catalog, &products_out, &asins_out, &options).await?;
            println!(
                "✅ {} valid products of {} in category ({} scanned)",
                stats.valid, stats.in_category, stats.scanned
            );
        }
        DatasetCommands::Queries {
            examples,
            valid_asins,
            output,
            locale,
            labels,
            split,
        } => {
            let filter = GroundTruthFilter {
                locale,
                labels,
                split,
                small_version_only: true,
            };
            let queries = build_ground_truth(&examples, &valid_asins, &output, &filter)?;
            println!("✅ {} queries written to {:?}", queries, output);
        }
    }
    Ok(())
}

const CONFIG_TEMPLATE: &str = r#"# escibench configuration
backends:
  - type: algolia
    app_id: YOUR_APP_ID
    api_key: YOUR_API_KEY
    index_name: products

  - type: doofinder
    token: YOUR_TOKEN
    region: eu1
    hash_id: YOUR_HASH_ID

  - type: shopify
    shop_url: your-store.myshopify.com
    access_token: YOUR_ACCESS_TOKEN
    api_version: "2024-10"

# Ground truth built by `escibench dataset queries`
queries_file: data/queries.json

results_dir: results
report_file: results/benchmark_metrics.json

evaluation:
  k: 5
  gains:
    E: 3  # Exact match
    S: 2  # Substitute
    C: 1  # Complement
    I: 0  # Irrelevant

options:
  count: 25
  concurrency: 4
  max_retries: 3
"#;
