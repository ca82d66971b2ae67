use clap::{Parser, Subcommand};
use queuezero_cli::CliContext;
use queuezero_cli::commands;
use queuezero_cli::logging;
use queuezero_cli::readline;
use std::io::Write;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let ctx = CliContext::new();

    commands::show_board(&ctx).await;

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "QueueZero wait-time board")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every location with its average, busy level and confidence
    Board,
    /// Show the selected location and pending wait
    Form,
    /// Choose the location the next report goes to
    Select {
        #[arg(short, long, required_unless_present = "name")]
        index: Option<usize>,
        #[arg(short, long, conflicts_with = "index")]
        name: Option<String>,
    },
    /// Set the pending wait in minutes
    Wait {
        #[arg(short, long)]
        minutes: u32,
    },
    /// Record the pending wait against the selected location
    Submit,
    /// Select, set and submit in one step
    Report {
        #[arg(short, long, required_unless_present = "name")]
        index: Option<usize>,
        #[arg(short, long, conflicts_with = "index")]
        name: Option<String>,
        #[arg(short, long)]
        minutes: u32,
    },
    Config,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "queuezero".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Board) => commands::show_board(ctx).await,
        Some(Commands::Form) => commands::show_form(ctx).await,
        Some(Commands::Select { index, name }) => {
            commands::select(ctx, *index, name.as_deref()).await?
        }
        Some(Commands::Wait { minutes }) => commands::set_wait(ctx, *minutes).await,
        Some(Commands::Submit) => commands::submit(ctx).await?,
        Some(Commands::Report {
            index,
            name,
            minutes,
        }) => commands::report(ctx, *index, name.as_deref(), *minutes).await?,
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
