//! SafeHaven command-line entry point.
//!
//! Binary name: `haven`
//!
//! Parses CLI arguments, initializes logging and application state, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;

use safehaven_observe::tracing_setup::{LogFormat, LogOptions, init_tracing, shutdown_tracing};

use cli::{AidCommand, Cli, Commands, PostCommand, ReportCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_directive = if cli.quiet && cli.verbose == 0 {
        "error"
    } else {
        LogOptions::directive_for_verbosity(cli.verbose)
    };
    let log_options = LogOptions {
        default_directive: default_directive.to_string(),
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
        otel: cli.otel,
    };
    if let Err(e) = init_tracing(&log_options) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let state = AppState::init(cli.api_url.clone()).await?;
    let json = cli.json;

    let result = match cli.command {
        Commands::Posts { action } => match action {
            PostCommand::List => cli::posts::list_posts(&state, json).await,
            PostCommand::Create { author, content } => {
                cli::posts::create_post(&state, &author, &content, json).await
            }
            PostCommand::Comment {
                post_id,
                author,
                content,
            } => cli::posts::add_comment(&state, &post_id, &author, &content, json).await,
            PostCommand::Like { post_id } => cli::posts::like_post(&state, &post_id, json).await,
        },

        Commands::Report { action } => match action {
            ReportCommand::Submit(args) => cli::reports::submit_report(&state, args, json).await,
            ReportCommand::List { user, all } => {
                cli::reports::list_reports(&state, user.as_deref(), all, json).await
            }
            ReportCommand::Track { report_id, code } => {
                cli::reports::track_report(&state, &report_id, &code, json).await
            }
            ReportCommand::Respond {
                report_id,
                response,
                status,
            } => cli::reports::respond_to_report(&state, &report_id, &response, &status, json).await,
        },

        Commands::Aid { action } => match action {
            AidCommand::Request {
                user,
                name,
                amount,
                reason,
            } => cli::aid::request_aid(&state, user, name, amount, reason, json).await,
            AidCommand::List { user } => cli::aid::list_aid(&state, user.as_deref(), json).await,
        },

        Commands::Login { email, password } => {
            cli::account::login(&state, &email, &password, json).await
        }

        Commands::Register {
            name,
            email,
            password,
        } => cli::account::register(&state, &name, &email, &password, json).await,

        Commands::Chat { message, find_help } => {
            let message = if find_help {
                Some(safehaven_core::chat::persona::FIND_HELP_PROMPT.to_string())
            } else {
                message
            };
            cli::chat::run_chat(&state, message, json).await
        }

        Commands::Status => cli::status::status(&state, json).await,
    };

    state.db_pool.close().await;
    shutdown_tracing();
    result
}
