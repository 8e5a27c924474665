use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lookup_core::{DatePart, FormEvent, LookupController};
use store_client::{load_settings, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

use render::{render_diagnostics, render_view};

#[derive(Parser, Debug)]
#[command(name = "results", about = "Look up an examination result")]
struct Cli {
    /// TOML file with store_url, store_key and timeout_seconds.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report which store connection parameters are configured.
    EnvCheck,
    /// List available examinations, newest first.
    Exams,
    /// Submit the form once and print the resulting view.
    Lookup {
        #[arg(long)]
        exam: String,
        #[arg(long)]
        roll: String,
        #[arg(long, allow_hyphen_values = true)]
        day: String,
        #[arg(long, allow_hyphen_values = true)]
        month: String,
        #[arg(long, allow_hyphen_values = true)]
        year: String,
    },
    /// Fill in the form line by line.
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    info!(?settings, "loaded store settings");

    match cli.command {
        Command::EnvCheck => print!("{}", render_diagnostics(&settings.diagnose())),
        Command::Exams => print_catalog(&ready_controller(settings).await?),
        Command::Lookup {
            exam,
            roll,
            day,
            month,
            year,
        } => {
            let mut controller = ready_controller(settings).await?;
            controller.handle(FormEvent::SelectExamination(exam)).await;
            controller.handle(FormEvent::SetRollNumber(roll)).await;
            for (part, value) in [
                (DatePart::Day, day),
                (DatePart::Month, month),
                (DatePart::Year, year),
            ] {
                if !controller.set_date_part(part, &value) {
                    eprintln!("ignoring {part} '{value}': out of range");
                }
            }
            controller.handle(FormEvent::Submit).await;
            print!("{}", render_view(&controller.view()));
        }
        Command::Interactive => {
            let mut controller = ready_controller(settings).await?;
            let stdin = io::stdin();
            run_interactive(&mut controller, &mut stdin.lock()).await?;
        }
    }

    Ok(())
}

async fn ready_controller(settings: StoreConfig) -> Result<LookupController> {
    let mut controller =
        LookupController::from_config(settings).context("failed to build record store client")?;
    controller.initialize().await;
    Ok(controller)
}

fn print_catalog(controller: &LookupController) {
    let catalog = controller.catalog();
    if let Some(err) = catalog.error() {
        println!("{err}");
        return;
    }
    if catalog.examinations().is_empty() {
        println!("No examinations available.");
    }
    for exam in catalog.examinations() {
        println!("{}\t{}", exam.id, exam.label());
    }
}

/// Reads one trimmed line. `None` on end of input.
fn ask(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Maps a 1-based position in the selector to its id; anything else is
/// taken as an id.
fn resolve_selection(controller: &LookupController, answer: &str) -> String {
    let examinations = controller.catalog().examinations();
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| examinations.get(index))
        .map(|exam| exam.id.to_string())
        .unwrap_or_else(|| answer.to_string())
}

/// Blank answers keep the current value.
async fn fill_form(controller: &mut LookupController, input: &mut impl BufRead) -> Result<bool> {
    let Some(answer) = ask(input, "Examination (number or id)")? else {
        return Ok(false);
    };
    if !answer.is_empty() {
        let id = resolve_selection(controller, &answer);
        controller.handle(FormEvent::SelectExamination(id)).await;
    }

    let Some(answer) = ask(input, "Roll Number")? else {
        return Ok(false);
    };
    if !answer.is_empty() {
        controller.handle(FormEvent::SetRollNumber(answer)).await;
    }

    for part in DatePart::ALL {
        let Some(answer) = ask(input, part.placeholder())? else {
            return Ok(false);
        };
        if answer.is_empty() {
            continue;
        }
        if !controller.set_date_part(part, &answer) {
            println!("  {part} '{answer}' is out of range; keeping previous value");
        }
    }
    Ok(true)
}

async fn run_interactive(
    controller: &mut LookupController,
    input: &mut impl BufRead,
) -> Result<()> {
    loop {
        print!("{}", render_view(&controller.view()));
        if controller.view().is_result() {
            let Some(answer) = ask(input, "Search again? [y/N]")? else {
                return Ok(());
            };
            if !answer.eq_ignore_ascii_case("y") {
                return Ok(());
            }
            controller.handle(FormEvent::Reset).await;
            continue;
        }

        if !fill_form(controller, input).await? {
            return Ok(());
        }
        controller.handle(FormEvent::Submit).await;
    }
}
