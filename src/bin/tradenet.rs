use std::{path::PathBuf, process};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde_json::json;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tradenet::{
    builder::GraphBuilder,
    config::Config,
    metrics::{Metric, MetricOutput, MetricsEngine},
    ranking::Ranking,
};

/// Computes structural metrics over a weighted transaction edge list.
#[derive(Parser, Debug)]
#[command(name = "tradenet", version)]
struct Cli {
    /// CSV edge list with a header row.
    input: PathBuf,

    /// Metric to compute, may be repeated. Every metric runs when omitted.
    #[arg(short, long = "metric", value_parser = parse_metric)]
    metrics: Vec<Metric>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON document per metric instead of text.
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_metric(s: &str) -> Result<Metric, String> {
    s.parse().map_err(|_| {
        let known: Vec<&str> = Metric::ALL.iter().map(|m| m.as_str()).collect();
        format!("unknown metric `{s}`, expected one of: {}", known.join(", "))
    })
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let (graph, summary) = GraphBuilder::from_path(&cli.input, &config.input)
        .with_context(|| format!("failed to load edge list from {}", cli.input.display()))?;

    if !cli.json {
        println!(
            "{} rows ({} dropped), {} nodes, {} edges\n",
            summary.rows, summary.dropped, summary.nodes, summary.edges
        );
    }

    let metrics = if cli.metrics.is_empty() {
        Metric::ALL.to_vec()
    } else {
        cli.metrics.clone()
    };

    let mut engine = MetricsEngine::new(&graph, config.metrics);

    // A failing metric is reported and the next one still runs.
    for metric in metrics {
        let output = engine.run(metric);

        if cli.json {
            let document = match &output {
                Ok(result) => json!({ "metric": metric, "result": result }),
                Err(e) => json!({ "metric": metric, "error": e.to_string() }),
            };
            println!("{document}");
        } else {
            println!("== {metric}");
            match &output {
                Ok(result) => print_output(result),
                Err(e) => println!("error: {e}"),
            }
            println!();
        }
    }

    Ok(())
}

fn print_output(output: &MetricOutput<String>) {
    match output {
        MetricOutput::Matrix { labels, matrix } => {
            println!("{}", labels.join(", "));
            println!("{matrix}");
        }
        MetricOutput::Ranking(ranking) => print_ranking(ranking),
        MetricOutput::Clustering {
            local,
            transitivity,
        } => {
            print_ranking(local);
            println!("transitivity: {transitivity}");
        }
        MetricOutput::Scalar(value) => println!("{value}"),
        MetricOutput::Density { density, sparsity } => {
            println!("density: {density}");
            println!("sparsity: {sparsity}");
        }
        MetricOutput::Histogram(buckets) => {
            for (i, bucket) in buckets.iter().enumerate() {
                let close = if i + 1 == buckets.len() { ']' } else { ')' };
                println!(
                    "[{}, {}{close} {}",
                    bucket.lower, bucket.upper, bucket.count
                );
            }
        }
        MetricOutput::Components(components) => {
            println!("strongly connected: {}", components.strong.len());
            for component in &components.strong {
                println!("  {{{}}}", component.join(", "));
            }
            println!("weakly connected: {}", components.weak.len());
            for component in &components.weak {
                println!("  {{{}}}", component.join(", "));
            }
        }
    }
}

fn print_ranking(ranking: &Ranking<String>) {
    let width = ranking.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    for (position, (label, value)) in ranking.iter().enumerate() {
        println!("{:>3}. {label:<width$}  {value}", position + 1);
    }
}
