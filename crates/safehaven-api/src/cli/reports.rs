//! Incident report commands: submit, list, track, respond.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use safehaven_types::report::{Location, Report, ReportDraft, ReportStatus};

use super::{SubmitReportArgs, format_relative_time, truncate};
use crate::state::AppState;

pub async fn submit_report(state: &AppState, args: SubmitReportArgs, json: bool) -> Result<()> {
    let incident_date = args.date.as_deref().map(parse_date).transpose()?;
    let location = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some(Location { lat, lng }),
        _ => None,
    };

    let draft = ReportDraft {
        user_id: args.user,
        is_anonymous: Some(args.anonymous),
        name: args.name,
        contact: args.contact,
        kind: args.kind,
        description: Some(args.description),
        incident_date,
        location,
    };

    let receipt = state.store.save_report(draft).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
        return Ok(());
    }

    println!();
    println!("  {} Report submitted", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Report ID:  ").bold(), style(&receipt.id).cyan());
    println!(
        "  {}  {}",
        style("Access code:").bold(),
        style(&receipt.access_code).yellow().bold()
    );
    println!();
    println!(
        "  Keep both safe. Check progress with: {}",
        style(format!("haven report track {} <code>", receipt.id)).yellow()
    );
    println!();
    Ok(())
}

pub async fn list_reports(
    state: &AppState,
    user: Option<&str>,
    all: bool,
    json: bool,
) -> Result<()> {
    let reports = match user {
        Some(user) if !all => state.store.list_reports_for_user(user).await?,
        _ => state.store.list_all_reports().await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!();
        println!("  {} No reports found.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Submitted").fg(Color::White),
    ]);

    for report in &reports {
        table.add_row(vec![
            Cell::new(truncate(&report.id, 14)).fg(Color::DarkGrey),
            Cell::new(&report.kind).fg(Color::Cyan),
            Cell::new(truncate(&report.description, 50)),
            status_cell(report.status),
            Cell::new(format_relative_time(&report.submitted_at)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} report{}",
        style(reports.len()).bold(),
        if reports.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

pub async fn track_report(state: &AppState, report_id: &str, code: &str, json: bool) -> Result<()> {
    let report = state.store.track_report(report_id, code).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report {
        Some(report) => print_report(&report),
        None => {
            println!();
            println!(
                "  {} No report matches that ID and access code.",
                style("✗").red().bold()
            );
            println!();
        }
    }
    Ok(())
}

pub async fn respond_to_report(
    state: &AppState,
    report_id: &str,
    response: &str,
    status: &str,
    json: bool,
) -> Result<()> {
    let status: ReportStatus = status.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let report = state
        .store
        .respond_to_report(report_id, response, status)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    println!();
    println!("  {}  {}", style("Report:  ").bold(), style(&report.id).cyan());
    println!("  {}  {}", style("Type:    ").bold(), report.kind);
    println!("  {}  {}", style("Status:  ").bold(), report.status);
    println!(
        "  {}  {}",
        style("Incident:").bold(),
        report.incident_date.format("%Y-%m-%d")
    );
    println!();
    println!("  {}", report.description);
    if let Some(response) = &report.admin_response {
        println!();
        println!("  {}", style("── Response ──").dim());
        println!("  {response}");
    }
    println!();
}

fn status_cell(status: ReportStatus) -> Cell {
    let color = match status {
        ReportStatus::Received => Color::Blue,
        ReportStatus::Reviewing => Color::Yellow,
        ReportStatus::ActionTaken => Color::Magenta,
        ReportStatus::Resolved => Color::Green,
    };
    Cell::new(status.to_string()).fg(color)
}

/// Accept a plain date (midnight UTC) or a full RFC 3339 timestamp.
fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .with_context(|| format!("invalid date '{raw}'"))
}
