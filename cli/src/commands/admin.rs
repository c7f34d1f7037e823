use anyhow::bail;
use chrono::Utc;
use slate_core::normalize_note;

use crate::api::ApiClient;
use crate::args::AdminCommand;
use crate::commands::authed_api;

pub async fn admin_cmd(base_url: &str, subcommand: AdminCommand) -> anyhow::Result<()> {
    let (api, session) = authed_api(base_url)?;
    if !session.user.is_admin() {
        bail!("The admin portal requires the admin role");
    }

    match subcommand {
        AdminCommand::Stats => {
            let stats = api.admin_stats().await?;
            println!("Users:           {}", stats.total_users);
            println!("Todos:           {}", stats.total_todos);
            println!("  completed:     {}", stats.completed_todos);
            println!("  pending:       {}", stats.pending_todos);
        }
        AdminCommand::Users => {
            for user in api.admin_users().await? {
                let state = if user.is_active { "active" } else { "inactive" };
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    user.id, user.name, user.email, user.role, state
                );
            }
        }
        AdminCommand::Todos => {
            let now = Utc::now();
            for raw in api.admin_todos().await? {
                let note = normalize_note(&raw, now);
                let status = if note.is_trashed {
                    "bin"
                } else {
                    note.status.as_wire()
                };
                println!("{}\t{}\t{}", note.id, status, note.title);
            }
        }
        AdminCommand::ToggleStatus { id } => {
            api.admin_toggle_user_status(&id).await?;
            println!("Toggled active state for user {}", id);
        }
        AdminCommand::ToggleRole { id } => {
            api.admin_toggle_user_role(&id).await?;
            println!("Toggled role for user {}", id);
        }
        AdminCommand::DeleteUser { id } => {
            api.admin_delete_user(&id).await?;
            println!("Deleted user {}", id);
        }
        AdminCommand::DeleteTodo { id } => {
            api.admin_delete_todo(&id).await?;
            println!("Deleted todo {}", id);
        }
    }

    Ok(())
}
