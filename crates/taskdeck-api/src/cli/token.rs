//! API token management CLI commands: create, list.

use anyhow::Result;
use clap::Subcommand;
use console::style;
use sqlx::Row;

use crate::http::extractors::auth::issue_token;
use crate::state::AppState;

#[derive(Subcommand)]
pub enum TokenCommand {
    /// Issue a new API token for a user.
    ///
    /// The plaintext token is printed once; only its hash is stored.
    Create {
        /// User the token authenticates as.
        user_id: String,

        /// Optional label for the token.
        #[arg(long)]
        name: Option<String>,
    },

    /// List issued tokens (hashes are never shown).
    List,
}

/// Issue a token and print it once.
pub async fn create_token(
    state: &AppState,
    user_id: &str,
    name: Option<&str>,
    json: bool,
) -> Result<()> {
    let token = issue_token(state, user_id, name).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"user_id": user_id, "token": token})
        );
    } else {
        println!();
        println!(
            "  {} API token for '{}' (save this -- it won't be shown again):",
            style("🔑").bold(),
            style(user_id).cyan()
        );
        println!();
        println!("  {}", style(&token).yellow().bold());
        println!();
    }

    Ok(())
}

/// List issued tokens with their metadata.
pub async fn list_tokens(state: &AppState, json: bool) -> Result<()> {
    let rows = sqlx::query(
        "SELECT user_id, name, created_at, last_used_at FROM api_tokens ORDER BY created_at",
    )
    .fetch_all(&state.db_pool.reader)
    .await?;

    let entries: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "user_id": row.get::<String, _>("user_id"),
                "name": row.get::<Option<String>, _>("name"),
                "created_at": row.get::<String, _>("created_at"),
                "last_used_at": row.get::<Option<String>, _>("last_used_at"),
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!();
        println!(
            "  {} No tokens issued. Create one with: {}",
            style("i").blue().bold(),
            style("tdeck token create <user-id>").yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    for entry in &entries {
        let last_used = entry["last_used_at"]
            .as_str()
            .unwrap_or("never used");
        println!(
            "  {} {} ({}) -- last used: {}",
            style("•").bold(),
            style(entry["user_id"].as_str().unwrap_or("?")).cyan(),
            entry["name"].as_str().unwrap_or("default"),
            style(last_used).dim()
        );
    }
    println!();

    Ok(())
}
