use anyhow::bail;

use crate::args::SettingsCommand;
use crate::paths;
use crate::settings::AppSettings;

pub fn settings_cmd(subcommand: SettingsCommand) -> anyhow::Result<()> {
    let path = paths::settings_path();
    let mut settings = AppSettings::from_path(&path)?;

    match subcommand {
        SettingsCommand::Show => {
            println!("add_new_at_bottom = {}", settings.add_new_at_bottom);
            println!("theme = {}", settings.theme);
        }
        SettingsCommand::Set(args) => {
            if args.add_new_at_bottom.is_none() && args.theme.is_none() {
                bail!("Nothing to change; pass --add-new-at-bottom or --theme");
            }
            if let Some(value) = args.add_new_at_bottom {
                settings.add_new_at_bottom = value;
            }
            if let Some(theme) = args.theme {
                if theme != "system" && theme != "dark" {
                    bail!("Theme must be 'system' or 'dark'");
                }
                settings.theme = theme;
            }
            settings.save(&path)?;
            println!("Settings updated");
        }
    }

    Ok(())
}
