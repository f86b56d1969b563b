use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use log::{info, LevelFilter};

use financial_goal_planner::cli::Cli;
use financial_goal_planner::llm::{GeminiConfig, GeminiPlanGenerator};
use financial_goal_planner::{
    income_breakdown, DownloadLink, FinancialPlanner, PlanSession, SUCCESS_MESSAGE,
    VALIDATION_WARNING,
};

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let request = cli.plan_request().context("Failed to read plan request")?;

    if let Err(failure) = request.validate() {
        eprintln!("⚠️  {} ({})", VALIDATION_WARNING, failure);
        std::process::exit(2);
    }

    let config = GeminiConfig::from_env().context("Failed to load Gemini configuration")?;
    info!("Using model {}", config.model);

    let planner = FinancialPlanner::new(GeminiPlanGenerator::from_config(&config));
    let mut session = PlanSession::new();

    println!("⏳ Creating your personalized financial plan...");
    planner
        .generate(&mut session, &request)
        .await
        .context("Could not generate a financial plan")?;
    println!("✅ {}\n", SUCCESS_MESSAGE);

    if cli.regenerate {
        println!(
            "🔁 Regenerating with tone '{}' and format '{}'...",
            request.tone, request.format
        );
        planner
            .regenerate(&mut session, &request)
            .await
            .context("Could not regenerate the financial plan")?;
    }

    let plan = session.plan().unwrap_or_default();
    println!("📋 Your Financial Plan\n");
    println!("{}\n", plan);

    let chart = income_breakdown(&request);
    println!("📊 Income Breakdown\n");
    println!("{}", chart);

    if let Some(path) = &cli.chart {
        std::fs::write(path, chart.to_svg())
            .with_context(|| format!("Failed to write chart to {}", path.display()))?;
        println!("🖼️  Chart saved to {}", path.display());
    }

    let document = session.export()?;
    if document.replaced_characters() > 0 {
        info!(
            "{} character(s) could not be represented in the PDF and were replaced",
            document.replaced_characters()
        );
    }

    let link = DownloadLink::from_document(&document);
    std::fs::write(&cli.output, link.bytes())
        .with_context(|| format!("Failed to write report to {}", cli.output.display()))?;
    println!("📥 PDF report saved to {}", cli.output.display());

    if cli.print_link {
        println!("{}", link.to_html_anchor());
    }

    Ok(())
}
