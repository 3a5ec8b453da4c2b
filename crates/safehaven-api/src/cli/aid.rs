//! Financial aid commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use safehaven_types::aid::{AidStatus, NewAidRequest};

use super::truncate;
use crate::state::AppState;

pub async fn request_aid(
    state: &AppState,
    user_id: String,
    user_name: String,
    amount: f64,
    reason: String,
    json: bool,
) -> Result<()> {
    let created = state
        .store
        .create_aid_request(NewAidRequest {
            user_id,
            user_name,
            amount,
            reason,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Aid request for {} submitted ({})",
        style("✓").green().bold(),
        style(format!("${:.2}", created.amount)).bold(),
        style(&created.id).dim()
    );
    println!("  Status: {}", style(created.status).yellow());
    println!();
    Ok(())
}

pub async fn list_aid(state: &AppState, user: Option<&str>, json: bool) -> Result<()> {
    let requests = state.store.list_aid_requests(user).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&requests)?);
        return Ok(());
    }

    if requests.is_empty() {
        println!();
        println!("  {} No aid requests yet.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Requested").fg(Color::White),
        Cell::new("By").fg(Color::White),
        Cell::new("Amount").fg(Color::White),
        Cell::new("Reason").fg(Color::White),
        Cell::new("Status").fg(Color::White),
    ]);

    for request in &requests {
        let status_color = match request.status {
            AidStatus::Pending => Color::Yellow,
            AidStatus::Approved => Color::Blue,
            AidStatus::Funded => Color::Green,
            AidStatus::Rejected => Color::Red,
        };
        table.add_row(vec![
            Cell::new(request.timestamp.format("%Y-%m-%d")).fg(Color::DarkGrey),
            Cell::new(&request.user_name).fg(Color::Cyan),
            Cell::new(format!("${:.2}", request.amount)),
            Cell::new(truncate(&request.reason, 50)),
            Cell::new(request.status.to_string()).fg(status_color),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}
