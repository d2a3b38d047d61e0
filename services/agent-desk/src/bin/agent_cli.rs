//! Interactive terminal wizard over the same pipeline the HTTP API uses

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_decimal::Decimal;

use agent_desk::cli::{analyst_lines, fmt_usd, risk_lines, snapshot_lines, swap_lines};
use agent_desk::swap::{self, SwapInput};
use agent_desk::{Orchestrator, QueryOutcome, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Intercom-style market advisory wizard")]
struct Args {
    /// Cache TTL in milliseconds (overrides REFRESH_TTL_MS)
    #[arg(long = "ttl-ms")]
    ttl_ms: Option<u64>,

    /// Log level written to stderr (overrides LOG_LEVEL)
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

const MENU: [&str; 4] = [
    "Agent Mode (Real Data)",
    "Swap Simulator",
    "Risk Check",
    "Exit",
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let settings = Settings::load()
        .context("Failed to load configuration")?
        .with_overrides(args.ttl_ms, args.log_level);

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level())
        .with_writer(std::io::stderr)
        .init();

    let orchestrator = Orchestrator::from_settings(&settings)?;
    let term = Term::stdout();
    term.write_line(&format!(
        "{} {}",
        style("Agent mode:").bold(),
        orchestrator.llm().describe()
    ))?;

    loop {
        term.write_line("")?;
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("INTERCOM MENU")
            .items(&MENU)
            .default(0)
            .interact_on(&term)
            .context("Failed to get menu selection")?;

        match choice {
            0 => agent_mode(&orchestrator, &term).await?,
            1 => swap_mode(&term)?,
            2 => risk_check(&orchestrator, &term).await?,
            _ => {
                term.write_line("Bye!")?;
                return Ok(());
            }
        }
    }
}

fn ask(term: &Term, prompt: &str, allow_empty: bool) -> Result<String> {
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text_on(term)
        .context("Failed to read input")?;
    Ok(answer.trim().to_string())
}

fn write_lines(term: &Term, lines: &[String]) -> Result<()> {
    for line in lines {
        term.write_line(line)?;
    }
    Ok(())
}

/// Prompt for a token and run one query; errors are reported, not fatal
async fn query(orchestrator: &Orchestrator, term: &Term) -> Result<Option<QueryOutcome>> {
    let chain = ask(term, "Chain hint (sol/eth/bsc/base) [optional]", true)?;
    let token = ask(term, "Token (symbol or CA)", false)?;

    term.write_line(&format!("{}", style("[Data] Fetching Dexscreener...").dim()))?;
    let chain = Some(chain.as_str()).filter(|c| !c.is_empty());
    match orchestrator.run_query(chain, &token).await {
        Ok(outcome) => Ok(Some(outcome)),
        Err(e) => {
            term.write_line(&format!("{} {}", style("✘").red(), style(e).bold()))?;
            Ok(None)
        }
    }
}

async fn agent_mode(orchestrator: &Orchestrator, term: &Term) -> Result<()> {
    term.write_line(&format!("\n{}", style("=== AGENT MODE (REAL DATA) ===").bold()))?;
    term.write_line("Tip: Use contract address (CA) for best accuracy.\n")?;

    let Some(outcome) = query(orchestrator, term).await? else {
        return Ok(());
    };

    match &outcome.snapshot {
        Some(snapshot) => {
            term.write_line(&format!("\n{}", style("=== MARKET SNAPSHOT ===").bold()))?;
            write_lines(term, &snapshot_lines(snapshot))?;
            if snapshot.fdv > 0.0 {
                term.write_line(&format!("FDV: {}", fmt_usd(snapshot.fdv)))?;
            }
            term.write_line("========================")?;
        }
        None => {
            term.write_line(&format!("{} No Dexscreener data found.", style("✘").red()))?;
            term.write_line("Try pasting the token contract address (CA) instead.")?;
        }
    }

    term.write_line(&format!("\n{}", style("[Agent: Analyst]").cyan()))?;
    write_lines(term, &analyst_lines(&outcome.verdict.signal))?;

    term.write_line(&format!("\n{}", style("[Agent: Risk Gate]").cyan()))?;
    write_lines(term, &risk_lines(&outcome.verdict.risk))?;

    write_decision(term, &outcome)
}

async fn risk_check(orchestrator: &Orchestrator, term: &Term) -> Result<()> {
    term.write_line(&format!("\n{}", style("=== RISK CHECK ===").bold()))?;

    let Some(outcome) = query(orchestrator, term).await? else {
        return Ok(());
    };

    write_lines(term, &risk_lines(&outcome.verdict.risk))?;
    write_decision(term, &outcome)
}

fn write_decision(term: &Term, outcome: &QueryOutcome) -> Result<()> {
    term.write_line(&format!("\n{}", style("=== DECISION ===").bold()))?;
    term.write_line(&outcome.verdict.decision.headline())?;
    term.write_line(&format!("{}", style(format!("mode: {:?}", outcome.mode)).dim()))?;
    Ok(())
}

fn ask_decimal(term: &Term, prompt: &str, default: Decimal) -> Result<Decimal> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact_text_on(term)
        .context("Failed to read number")
}

fn swap_mode(term: &Term) -> Result<()> {
    term.write_line(&format!("\n{}", style("=== SWAP SIMULATOR (x·y=k) ===").bold()))?;

    let defaults = SwapInput::default();
    let input = SwapInput {
        reserve_x: ask_decimal(term, "Reserve X", defaults.reserve_x)?,
        reserve_y: ask_decimal(term, "Reserve Y", defaults.reserve_y)?,
        amount_in: ask_decimal(term, "Amount in (X)", defaults.amount_in)?,
        fee_bps: ask_decimal(term, "Fee (bps)", defaults.fee_bps)?,
    };

    match swap::simulate(input) {
        Ok(quote) => write_lines(term, &swap_lines(&quote)),
        Err(e) => {
            term.write_line(&format!("{} {}", style("✘").red(), style(e).bold()))?;
            Ok(())
        }
    }
}
