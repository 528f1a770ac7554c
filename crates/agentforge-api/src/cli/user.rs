//! Account management commands: create, list, promote.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Password;

use agentforge_types::user::UserRole;

use crate::state::AppState;

/// Create an account, prompting for the password when not given.
///
/// ```bash
/// agentforge user create --email ada@example.com
/// agentforge user create --email root@example.com --password ... --admin
/// ```
pub async fn create_user(
    state: &AppState,
    email: &str,
    password: Option<String>,
    admin: bool,
    json: bool,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt(format!("Password for {}", style(email).bold()))
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };
    let role = if admin { UserRole::Admin } else { UserRole::User };

    let user = state.auth.create_user(email, &password, role).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user.profile())?);
    } else {
        println!(
            "  {} Created {} ({})",
            style("✓").green().bold(),
            style(&user.email).bold(),
            user.role
        );
    }
    Ok(())
}

/// List every account.
pub async fn list_users(state: &AppState, json: bool) -> Result<()> {
    let users = state.auth.list_users().await?;

    if json {
        let profiles: Vec<_> = users.iter().map(|u| u.profile()).collect();
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    if users.is_empty() {
        println!();
        println!(
            "  {} No users yet. Add one with: {}",
            style("i").blue().bold(),
            style("agentforge user create --email you@example.com").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Email").fg(Color::White),
        Cell::new("Role").fg(Color::White),
        Cell::new("Sign-in").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for user in &users {
        let role = match user.role {
            UserRole::Admin => Cell::new(user.role.to_string()).fg(Color::Yellow),
            UserRole::User => Cell::new(user.role.to_string()),
        };
        let sign_in = if user.password_hash.is_some() { "password" } else { "oauth" };
        table.add_row(vec![
            Cell::new(&user.email).fg(Color::Cyan),
            role,
            Cell::new(sign_in),
            Cell::new(user.created_at.format("%Y-%m-%d").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} user{}",
        style(users.len()).bold(),
        if users.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

/// Grant the admin role.
pub async fn promote_user(state: &AppState, email: &str, json: bool) -> Result<()> {
    let user = state.auth.promote(email).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&user.profile())?);
    } else {
        println!(
            "  {} {} is now an admin",
            style("✓").green().bold(),
            style(&user.email).bold()
        );
    }
    Ok(())
}
