//! LazyTimer - Pomodoro, stopwatch and clock timer
//!
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after every 4th work session
//!
//! The timer can be shown as a window, a full-screen overlay or a floating
//! widget; `lazytimer run` drives it from the terminal.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::time::Instant;

use lazytimer::appearance::gradient_presets;
use lazytimer::cli::{ActionArgs, Cli, Commands, Display};
use lazytimer::completion::{CompletionDispatcher, CompletionMessage, MESSAGE_DURATION};
use lazytimer::sound::discover_system_sounds;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    let code = match execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            Display::show_error(&format!("{:#}", e));
            1
        }
    };

    // A pending stdin read would otherwise keep the runtime from shutting down.
    std::process::exit(code);
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            lazytimer::cli::run(args).await?;
        }
        Some(Commands::Presets) => {
            Display::show_lines(&Display::format_presets(&gradient_presets()));
        }
        Some(Commands::Sounds) => {
            Display::show_lines(&Display::format_sounds(&discover_system_sounds()));
        }
        Some(Commands::TestAction(args)) => {
            test_action(&args).await;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Fires the completion action once and waits long enough for it to be
/// seen or heard.
async fn test_action(args: &ActionArgs) {
    let completion = args.to_completion();
    let dispatcher = CompletionDispatcher::system(false);
    let mut message = CompletionMessage::default();

    let outcome = dispatcher.execute(&completion, &mut message, Instant::now());
    println!("{}", Display::format_outcome(&outcome));

    if message.is_visible() {
        println!("{}", message.text());
        tokio::time::sleep(MESSAGE_DURATION).await;
    } else {
        // Detached sinks stop when the process exits.
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
