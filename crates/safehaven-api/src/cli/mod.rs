//! CLI command definitions for the `haven` binary.
//!
//! Uses clap derive macros. Commands are grouped by record family
//! (e.g., `haven posts list`, `haven report track <id> <code>`).

pub mod account;
pub mod aid;
pub mod chat;
pub mod posts;
pub mod reports;
pub mod status;

use clap::{Args, Parser, Subcommand};

/// SafeHaven: community support, incident reports and aid, online or offline.
#[derive(Parser)]
#[command(name = "haven", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export tracing spans through OpenTelemetry (stdout).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Backend base URL, overriding config.toml.
    #[arg(long, global = true, env = "SAFEHAVEN_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Community feed.
    Posts {
        #[command(subcommand)]
        action: PostCommand,
    },

    /// Incident reports.
    Report {
        #[command(subcommand)]
        action: ReportCommand,
    },

    /// Financial aid requests.
    Aid {
        #[command(subcommand)]
        action: AidCommand,
    },

    /// Log in and print the resulting identity.
    Login {
        email: String,
        #[arg(long, env = "SAFEHAVEN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account.
    Register {
        name: String,
        email: String,
        #[arg(long, env = "SAFEHAVEN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Talk to Haven, the support companion.
    Chat {
        /// Send one message and exit instead of starting a conversation.
        #[arg(short, long, conflicts_with = "find_help")]
        message: Option<String>,

        /// Ask Haven for professional help and safe communities.
        #[arg(long)]
        find_help: bool,
    },

    /// Backend reachability and local cache summary.
    Status,
}

#[derive(Subcommand)]
pub enum PostCommand {
    /// Show the feed, newest first.
    #[command(alias = "ls")]
    List,

    /// Publish a post.
    Create {
        #[arg(long, default_value = "Anonymous")]
        author: String,
        content: String,
    },

    /// Comment on a post.
    Comment {
        post_id: String,
        #[arg(long, default_value = "Anonymous")]
        author: String,
        content: String,
    },

    /// Like a post.
    Like { post_id: String },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// Submit an incident report.
    Submit(SubmitReportArgs),

    /// List your reports, or every report with --all.
    #[command(alias = "ls")]
    List {
        #[arg(long, required_unless_present = "all")]
        user: Option<String>,

        #[arg(long, conflicts_with = "user")]
        all: bool,
    },

    /// Look up a report by id and access code.
    Track { report_id: String, code: String },

    /// Respond to a report and set its status.
    Respond {
        report_id: String,
        response: String,
        /// received, reviewing, action_taken or resolved.
        #[arg(long, default_value = "reviewing")]
        status: String,
    },
}

#[derive(Args)]
pub struct SubmitReportArgs {
    /// What happened.
    #[arg(long)]
    pub description: String,

    /// Incident category (e.g. Harassment).
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Submitting account id.
    #[arg(long)]
    pub user: Option<String>,

    /// Leave out name and contact details.
    #[arg(long)]
    pub anonymous: bool,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub contact: Option<String>,

    /// Incident date (YYYY-MM-DD or RFC 3339). Defaults to now.
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,
}

#[derive(Subcommand)]
pub enum AidCommand {
    /// Request financial aid.
    Request {
        #[arg(long)]
        user: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        reason: String,
    },

    /// List aid requests, optionally only one user's.
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        user: Option<String>,
    },
}

/// Shorten `text` to at most `max` characters, ending in "..." when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// "3m ago"-style rendering of a timestamp.
pub fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let secs = (chrono::Utc::now() - *dt).num_seconds().max(0);
    match secs {
        0..60 => "just now".to_string(),
        60..3600 => format!("{}m ago", secs / 60),
        3600..86400 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer sentence", 10), "a longe...");
    }

    #[test]
    fn test_relative_time() {
        let now = chrono::Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::minutes(5))),
            "5m ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::days(2))),
            "2d ago"
        );
    }

    #[test]
    fn test_report_list_requires_user_or_all() {
        assert!(Cli::try_parse_from(["haven", "report", "list"]).is_err());
        assert!(Cli::try_parse_from(["haven", "report", "list", "--all"]).is_ok());
        assert!(Cli::try_parse_from(["haven", "report", "list", "--user", "u1"]).is_ok());
    }
}
