// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use pubmed_rag::utils::logging::{format_error, format_info, format_step, format_success, format_warning};
use pubmed_rag::{AskPipeline, AskReport, Config, JsonExporter, ProgressTracker, QueryBatch, Validator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pubmed_rag")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Answer biomedical questions from PubMed abstracts", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask one question and print the answer
    Ask {
        question: String,

        /// Print the full report as JSON instead of the answer text
        #[arg(long)]
        json: bool,

        /// Also write the report into this directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show the search keywords generated for a question
    Keywords { question: String },

    /// Run the PubMed fetch step for the given query lines
    Search {
        #[arg(required = true)]
        queries: Vec<String>,
    },

    /// Probe PubMed and both generation endpoints
    Check {
        #[arg(long)]
        skip_generation: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    pubmed_rag::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("PubMed RAG");

    let config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using built-in defaults",
            cli.config.display()
        );
        Config::load(None).context("Failed to load configuration")?
    };

    let pipeline = Arc::new(AskPipeline::from_config(&config).context("Failed to build pipeline")?);

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(pipeline, &config, host, port).await?;
        }
        Commands::Ask {
            question,
            json,
            output,
        } => {
            cmd_ask(&pipeline, &question, json, output, cli.color).await?;
        }
        Commands::Keywords { question } => {
            cmd_keywords(&pipeline, &question).await?;
        }
        Commands::Search { queries } => {
            cmd_search(&pipeline, &queries).await?;
        }
        Commands::Check { skip_generation } => {
            cmd_check(&pipeline, skip_generation).await?;
        }
    }

    Ok(())
}

async fn cmd_serve(
    pipeline: Arc<AskPipeline>,
    config: &Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let mut server_config = config.server.clone();
    if let Some(host) = host {
        server_config.host = host;
    }
    if let Some(port) = port {
        Validator::validate_port(port)?;
        server_config.port = port;
    }

    pubmed_rag::server::serve(pipeline, &server_config)
        .await
        .context("Web server failed")?;

    Ok(())
}

async fn cmd_ask(
    pipeline: &AskPipeline,
    question: &str,
    json: bool,
    output: Option<PathBuf>,
    colored: bool,
) -> Result<()> {
    let progress = if json {
        ProgressTracker::hidden()
    } else {
        ProgressTracker::with_color(colored)
    };

    let report = pipeline
        .ask_with_progress(question, Some(&progress))
        .await
        .context("Ask failed")?;
    progress.finish();

    if let Some(dir) = output {
        let exporter = JsonExporter::new(dir)?;
        let path = exporter.export_report(&report, true)?;
        eprintln!("{}", format_success(&format!("Report written to {}", path.display())));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &AskReport) {
    let fragments = report.query_batch.non_blank_fragments();
    println!("{}", format_step(1, 3, "Keywords"));
    for fragment in &fragments {
        println!("  {}", fragment);
    }

    println!("\n{}", format_step(2, 3, "Articles"));
    if report.documents.is_empty() {
        println!("  (none)");
    }
    for (idx, doc) in report.documents.iter().enumerate() {
        println!("  {}. {}", idx + 1, Validator::truncate_text(doc.title(), 100));
        if let Some(url) = doc.source_url() {
            println!("     {}", url);
        }
    }

    if let pubmed_rag::FetchStatus::Partial { cause } = &report.fetch_status {
        println!(
            "\n{}",
            format_warning(&format!("Literature search interrupted: {}", cause))
        );
    }

    println!("\n{}", format_step(3, 3, "Answer"));
    println!("{}", report.answer);
    println!(
        "\n{}",
        format_info(&format!(
            "{} search call(s), {} document(s), {} ms",
            report.stats.search_calls, report.stats.documents_fetched, report.stats.duration_ms
        ))
    );
}

async fn cmd_keywords(pipeline: &AskPipeline, question: &str) -> Result<()> {
    let batch = pipeline
        .keywords(question)
        .await
        .context("Keyword generation failed")?;

    for fragment in batch.non_blank_fragments() {
        println!("{}", fragment);
    }

    Ok(())
}

async fn cmd_search(pipeline: &AskPipeline, queries: &[String]) -> Result<()> {
    let batch = QueryBatch::new(queries.join("\n"));
    let run = pipeline.fetch(&batch).await;

    println!(
        "{}",
        format_info(&format!(
            "{} search call(s), {} document(s)",
            run.search_calls,
            run.outcome.documents().len()
        ))
    );

    for (idx, doc) in run.outcome.documents().iter().enumerate() {
        println!("\n{}. {}", idx + 1, doc.title());
        if !doc.keywords().is_empty() {
            println!("   Keywords: {}", doc.keywords().join(", "));
        }
        if let Some(url) = doc.source_url() {
            println!("   {}", url);
        }
        for line in Validator::truncate_text(&doc.content, 300).lines().take(5) {
            println!("     {}", line);
        }
    }

    if let pubmed_rag::FetchOutcome::Partial { cause, .. } = &run.outcome {
        println!("\n{}", format_warning(&format!("Stopped early: {}", cause)));
    }

    Ok(())
}

async fn cmd_check(pipeline: &AskPipeline, skip_generation: bool) -> Result<()> {
    let report = pipeline.health(!skip_generation).await;
    println!("{}", report.format());

    if report.is_healthy() {
        println!("{}", format_success("All components healthy"));
        Ok(())
    } else {
        println!("{}", format_error("One or more components are not healthy"));
        Err(anyhow::anyhow!("Health check failed"))
    }
}
