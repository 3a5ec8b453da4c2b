//! Status command: backend reachability and local cache contents.

use anyhow::Result;
use console::style;

use safehaven_core::cache::{Collection, LocalCache};

use crate::state::AppState;

/// Local collection sizes. `None` means never written; `Err` means unreadable.
async fn collection_sizes(state: &AppState) -> Vec<(Collection, Result<Option<usize>, String>)> {
    let mut sizes = Vec::with_capacity(Collection::ALL.len());
    for collection in Collection::ALL {
        let size = match state.store.cache().get(collection.key()).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<serde_json::Value>>(&raw)
                .map(|items| Some(items.len()))
                .map_err(|e| format!("corrupt: {e}")),
            Ok(None) => Ok(None),
            Err(e) => Err(e.to_string()),
        };
        sizes.push((collection, size));
    }
    sizes
}

pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let online = state.store.health().await;
    let sizes = collection_sizes(state).await;
    let credential_set = std::env::var(&state.config.chat.api_key_env)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);

    if json {
        let collections: serde_json::Map<String, serde_json::Value> = sizes
            .iter()
            .map(|(collection, size)| {
                let value = match size {
                    Ok(Some(n)) => serde_json::json!(n),
                    Ok(None) => serde_json::Value::Null,
                    Err(e) => serde_json::json!({ "error": e }),
                };
                (collection.to_string(), value)
            })
            .collect();
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "backend": {
                "url": state.store.remote().base_url(),
                "online": online,
            },
            "local_cache": collections,
            "chat": {
                "model": state.config.chat.model,
                "credential": state.config.chat.api_key_env,
                "credential_set": credential_set,
            },
            "data_dir": state.data_dir.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} SafeHaven v{}",
        style("◆").magenta().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Backend ──").dim());
    println!("  URL:    {}", state.store.remote().base_url());
    if online {
        println!("  State:  {}", style("online").green());
    } else {
        println!(
            "  State:  {} (working from the local cache)",
            style("offline").yellow()
        );
    }
    println!();

    println!("  {}", style("── Local cache ──").dim());
    for (collection, size) in &sizes {
        let rendered = match size {
            Ok(Some(n)) => style(n.to_string()).bold().to_string(),
            Ok(None) => style("empty".to_string()).dim().to_string(),
            Err(e) => style(e.clone()).red().to_string(),
        };
        println!("  {:<13} {rendered}", format!("{collection}:"));
    }
    println!();

    println!("  {}", style("── Chat ──").dim());
    println!("  Model:      {}", state.config.chat.model);
    if credential_set {
        println!("  Credential: {} {}", state.config.chat.api_key_env, style("set").green());
    } else {
        println!(
            "  Credential: {} {}",
            state.config.chat.api_key_env,
            style("missing").red()
        );
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
