use anyhow::bail;

use crate::args::LabelCommand;
use crate::commands::authed_api;
use crate::coordinator::Coordinator;
use crate::formatters::print_labels;
use crate::paths;
use crate::settings::AppSettings;
use crate::snapshot;

pub async fn label_cmd(base_url: &str, subcommand: LabelCommand) -> anyhow::Result<()> {
    let (api, _) = authed_api(base_url)?;
    let settings = AppSettings::from_path(&paths::settings_path())?;
    let mut workspace = snapshot::load(&paths::snapshot_path());
    let mut coordinator = Coordinator::new(&api, &mut workspace, settings.add_new_at_bottom);
    coordinator.pull_all().await?;

    match subcommand {
        LabelCommand::List(args) => {
            let merged = coordinator.workspace.merged_labels();
            print_labels(&merged, args.output)?;
        }
        LabelCommand::Add { name } => match coordinator.create_label(&name).await {
            Some(label) => match label.id() {
                Some(id) => println!("Created label '{}' ({})", label.name(), id),
                None => println!("Created label '{}'", label.name()),
            },
            None => bail!("Could not create label '{}'", name),
        },
        LabelCommand::Rename { name, new_name } => {
            let Some(label) = find_label(&coordinator, &name) else {
                bail!("Label '{}' not found", name);
            };
            coordinator.rename_label(&label, &new_name).await;
            println!("Renamed label '{}' to '{}'", name, new_name);
        }
        LabelCommand::Delete { name } => {
            let Some(label) = find_label(&coordinator, &name) else {
                bail!("Label '{}' not found", name);
            };
            coordinator.delete_label(&label).await;
            println!("Deleted label '{}' from every note", name);
        }
    }

    snapshot::save(&workspace, &paths::snapshot_path())?;
    Ok(())
}

fn find_label(coordinator: &Coordinator<'_>, name: &str) -> Option<slate_core::Label> {
    coordinator
        .workspace
        .merged_labels()
        .into_iter()
        .find(|l| l.name() == name || l.id() == Some(name))
}
