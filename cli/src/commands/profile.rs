use crate::api::ApiClient;
use crate::args::ProfileCommand;
use crate::commands::authed_api;
use crate::paths;

pub async fn profile_cmd(base_url: &str, subcommand: ProfileCommand) -> anyhow::Result<()> {
    let (api, mut session) = authed_api(base_url)?;

    match subcommand {
        ProfileCommand::Show => {
            let profile = api.me().await?;
            println!("Name:  {}", profile.name);
            println!("Email: {}", profile.email);
            println!("Role:  {}", profile.role.as_deref().unwrap_or("user"));

            // Keep the stored session in step with the server record
            session.user.name = profile.name;
            session.user.email = profile.email;
            if !profile.id.is_empty() {
                session.user.id = profile.id;
            }
            if let Some(role) = profile.role {
                session.user.role = role;
            }
            session.save(&paths::session_path())?;
        }
        ProfileCommand::SetName { name } => {
            api.update_user(&name).await?;
            session.user.name = name;
            session.save(&paths::session_path())?;
            println!("Display name updated");
        }
    }

    Ok(())
}
