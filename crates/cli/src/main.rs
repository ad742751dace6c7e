use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use portfolio_advisor_core::errors::CoreError;
use portfolio_advisor_core::models::analysis::AnalysisState;
use portfolio_advisor_core::models::upload::UploadFile;
use portfolio_advisor_core::pages::AnalysisPage;
use portfolio_advisor_core::services::analysis_service::run_analysis;
use portfolio_advisor_core::{Page, PortfolioAdvisor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod settings;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about = "Upload, review and analyze an investment portfolio.")]
struct Cli {
    /// Config file (defaults to ./portfolio-advisor.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend URL, overriding config file and environment.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the current portfolio (stored, or the sample).
    Dashboard,

    /// Edit the working portfolio and request an AI analysis.
    Analyze {
        /// Remove the asset at this position (0-based), applied before --add.
        #[arg(long = "remove", value_name = "INDEX")]
        remove: Vec<usize>,

        /// Add an asset, e.g. "AAPL:10".
        #[arg(long = "add", value_name = "TICKER:QTY")]
        add: Vec<String>,

        /// Investment goal; repeat for several. Omit to use the default goals.
        #[arg(long = "goal", value_name = "TEXT")]
        goals: Vec<String>,
    },

    /// Upload a statement image or PDF for extraction.
    Upload {
        file: PathBuf,

        /// Continue to the analysis page once the upload succeeds.
        #[arg(long)]
        then_analyze: bool,
    },

    /// Delete the stored portfolio.
    Clear,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = settings::load_settings(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    info!(base_url = %settings.base_url, "using backend");

    let advisor = PortfolioAdvisor::new(settings)?;

    match cli.command {
        Commands::Dashboard => handle_dashboard(&advisor).await?,
        Commands::Analyze { remove, add, goals } => {
            handle_analyze(&advisor, remove, add, goals).await?;
        }
        Commands::Upload { file, then_analyze } => handle_upload(&advisor, file, then_analyze).await?,
        Commands::Clear => handle_clear(&advisor).await?,
    }

    Ok(())
}

async fn handle_dashboard(advisor: &PortfolioAdvisor) -> Result<()> {
    let page = advisor.open_dashboard().await?;
    print!("{}", page.view());
    Ok(())
}

async fn handle_clear(advisor: &PortfolioAdvisor) -> Result<()> {
    let mut page = advisor.open_dashboard().await?;
    if !page.can_clear() {
        println!("Nothing to clear: no stored portfolio.");
        return Ok(());
    }
    if !page.clear().await {
        bail!("Failed to clear portfolio");
    }
    println!("Portfolio cleared.");
    Ok(())
}

async fn handle_analyze(
    advisor: &PortfolioAdvisor,
    remove: Vec<usize>,
    add: Vec<String>,
    goals: Vec<String>,
) -> Result<()> {
    let mut page = advisor.open_analysis().await?;
    println!("{}", page.source_hint());

    for index in remove {
        if page.remove_asset(index).is_none() {
            warn!(index, "no asset at that position");
        }
    }
    for entry in &add {
        let (ticker, quantity) = entry.split_once(':').unwrap_or((entry.as_str(), ""));
        if !page.add_asset_input(ticker, quantity) {
            warn!(entry = %entry, "ignored: expected TICKER:QTY with a positive quantity");
        }
    }
    for goal in &goals {
        page.add_goal(goal);
    }

    analyze_page(&mut page).await
}

async fn handle_upload(advisor: &PortfolioAdvisor, path: PathBuf, then_analyze: bool) -> Result<()> {
    let mut page = advisor.open_upload();
    page.select_file(UploadFile::from_path(&path)?);

    let (name, size) = page.file_label();
    let kind = page.preview().map(|p| p.mime_type).unwrap_or("unknown");
    println!("{name} ({size}, {kind})");

    let redirect = page.upload().await?;
    if let Some(summary) = page.summary() {
        print!("{summary}");
    }

    let Some(redirect) = redirect else {
        bail!("Upload did not succeed");
    };
    if !then_analyze {
        println!("Run `portfolio-advisor analyze` to analyze it.");
        return Ok(());
    }

    println!("Redirecting to {} ...", redirect.to.path());
    match advisor.follow(redirect).await? {
        Page::Analysis(mut analysis) => analyze_page(&mut analysis).await,
        other => bail!("Unexpected redirect to {}", other.route().path()),
    }
}

/// Print the working portfolio, then run the analysis. Ctrl-C cancels the
/// request and discards whatever it returns.
async fn analyze_page(page: &mut AnalysisPage) -> Result<()> {
    println!("Assets:");
    for (i, asset) in page.assets().iter().enumerate() {
        println!("  [{i}] {asset}");
    }
    println!("Goals: {}", page.goal_labels().join(", "));

    if !page.can_submit() {
        bail!(CoreError::EmptyPortfolio);
    }

    let ticket = page.begin_analysis()?;
    let (backend, token) = page.dispatcher();
    let in_flight = ticket.clone();
    let mut request = tokio::spawn(async move { run_analysis(backend.as_ref(), &token, &in_flight).await });

    println!("Analyzing...");
    let outcome = tokio::select! {
        joined = &mut request => joined?,
        _ = tokio::signal::ctrl_c() => {
            page.unmount();
            request.await?
        }
    };

    if !page.finish_analysis(&ticket, outcome) {
        println!("Analysis cancelled.");
        return Ok(());
    }

    if let Some(view) = page.view() {
        print!("{view}");
    }
    if let AnalysisState::Failed(_) = page.state() {
        bail!("Analysis failed");
    }
    Ok(())
}
