//! Login and registration commands.

use anyhow::Result;
use console::style;

use safehaven_types::account::User;

use crate::state::AppState;

pub async fn login(state: &AppState, email: &str, password: &str, json: bool) -> Result<()> {
    let user = state.store.login(email, password).await?;
    print_user(&user, "Logged in", json)
}

pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
    json: bool,
) -> Result<()> {
    let user = state.store.register(name, email, password).await?;
    print_user(&user, "Account created", json)
}

fn print_user(user: &User, headline: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(user)?);
        return Ok(());
    }

    println!();
    println!("  {} {headline}", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Name: ").bold(), style(&user.name).cyan());
    println!("  {}  {}", style("Email:").bold(), user.email);
    println!("  {}  {}", style("ID:   ").bold(), style(&user.id).dim());
    if user.is_admin() {
        println!("  {}  {}", style("Role: ").bold(), style("admin").red().bold());
    }
    println!();
    Ok(())
}
