use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use slate_core::{visible_notes, Note, Workspace};

use crate::api::{DeleteAction, FileUpload};
use crate::args::{
    NoteAddArgs, NoteCommand, NoteEditArgs, NoteFlagArgs, NoteIdsArgs, NoteListArgs,
    NotePurgeArgs, NoteReorderArgs,
};
use crate::commands::authed_api;
use crate::coordinator::Coordinator;
use crate::formatters::NoteListFormatter;
use crate::paths;
use crate::settings::AppSettings;
use crate::snapshot;

pub async fn note_cmd(base_url: &str, subcommand: NoteCommand) -> anyhow::Result<()> {
    match subcommand {
        NoteCommand::Add(args) => add_cmd(base_url, args).await,
        NoteCommand::List(args) => list_cmd(base_url, args).await,
        NoteCommand::Edit(args) => edit_cmd(base_url, args).await,
        NoteCommand::Delete(args) => delete_cmd(base_url, args, DeleteAction::Bin).await,
        NoteCommand::Restore(args) => delete_cmd(base_url, args, DeleteAction::Restore).await,
        NoteCommand::Purge(args) => purge_cmd(base_url, args).await,
        NoteCommand::Archive(args) => flag_cmd(base_url, args, Flag::Archive).await,
        NoteCommand::Pin(args) => flag_cmd(base_url, args, Flag::Pin).await,
        NoteCommand::Reorder(args) => reorder_cmd(args),
    }
}

async fn list_cmd(base_url: &str, args: NoteListArgs) -> anyhow::Result<()> {
    let mut workspace = snapshot::load(&paths::snapshot_path());

    if !args.cached {
        let (api, _) = authed_api(base_url)?;
        let settings = AppSettings::from_path(&paths::settings_path())?;
        let mut coordinator =
            Coordinator::new(&api, &mut workspace, settings.add_new_at_bottom);
        coordinator.pull_all().await?;
    }

    match &args.label {
        Some(label) => workspace.select_label(label),
        None => workspace.view = args.view.to_view(),
    }
    workspace.filter.search_query = args.search.clone().unwrap_or_default();
    workspace.filter.status = args.status.to_filter();

    let (start, end) = match (args.from, args.to, &args.date) {
        (Some(from), to, _) => (Some(from), to),
        (None, _, Some(target)) => {
            let (start, end) = target.to_range();
            (Some(start), Some(end))
        }
        _ => (None, None),
    };
    workspace.filter.date_start = start;
    workspace.filter.date_end = end;

    // An explicit sort overrides the cached order mode; a manual
    // reorder stays in effect until one is given or a refetch happens
    if let Some(sort) = args.sort {
        workspace.filter.sort_order = sort.to_order();
    }

    let visible = visible_notes(&workspace.notes, &workspace.view, &workspace.filter);
    NoteListFormatter::new(args.output, args.columns)
        .print_notes(&visible)
        .context("Failed to print notes")?;

    snapshot::save(&workspace, &paths::snapshot_path())?;
    Ok(())
}

async fn add_cmd(base_url: &str, args: NoteAddArgs) -> anyhow::Result<()> {
    let (api, _) = authed_api(base_url)?;
    let settings = AppSettings::from_path(&paths::settings_path())?;
    let mut workspace = snapshot::load(&paths::snapshot_path());
    let mut coordinator = Coordinator::new(&api, &mut workspace, settings.add_new_at_bottom);
    coordinator.pull_all().await?;

    let mut note = Note::draft(Utc::now());
    note.title = args.title.unwrap_or_default();
    note.content = args.content.unwrap_or_default();
    note.labels = dedup_names(args.label);
    note.status = args.status.to_status();
    note.is_pinned = args.pin;
    note.is_archived = args.archive;

    let files = read_uploads(&args.attach)?;
    coordinator.create(note, files, vec![]).await;

    snapshot::save(&workspace, &paths::snapshot_path())?;
    println!("Note added successfully");
    Ok(())
}

async fn edit_cmd(base_url: &str, args: NoteEditArgs) -> anyhow::Result<()> {
    let (api, _) = authed_api(base_url)?;
    let settings = AppSettings::from_path(&paths::settings_path())?;
    let mut workspace = snapshot::load(&paths::snapshot_path());
    let mut coordinator = Coordinator::new(&api, &mut workspace, settings.add_new_at_bottom);
    coordinator.pull_all().await?;

    let Some(existing) = coordinator
        .workspace
        .notes
        .iter()
        .find(|n| n.id == args.id)
        .cloned()
    else {
        bail!("Note {} not found", args.id);
    };

    let mut note = existing;
    if let Some(title) = args.title {
        note.title = title;
    }
    if let Some(content) = args.content {
        note.content = content;
    }
    if let Some(labels) = args.label {
        note.labels = dedup_names(labels);
    }
    for label in args.add_label {
        if !note.labels.contains(&label) {
            note.labels.push(label);
        }
    }
    note.labels.retain(|l| !args.remove_label.contains(l));
    if let Some(status) = args.status {
        note.status = status.to_status();
    }

    let files = read_uploads(&args.attach)?;
    coordinator
        .update(note, false, files, args.remove_attachment.clone())
        .await;

    snapshot::save(&workspace, &paths::snapshot_path())?;
    println!("Note updated successfully");
    Ok(())
}

async fn delete_cmd(
    base_url: &str,
    args: NoteIdsArgs,
    action: DeleteAction,
) -> anyhow::Result<()> {
    let (api, _) = authed_api(base_url)?;
    let settings = AppSettings::from_path(&paths::settings_path())?;
    let mut workspace = snapshot::load(&paths::snapshot_path());
    let mut coordinator = Coordinator::new(&api, &mut workspace, settings.add_new_at_bottom);
    coordinator.pull_all().await?;

    for id in &args.ids {
        coordinator.delete(id, action).await;
    }

    snapshot::save(&workspace, &paths::snapshot_path())?;
    match action {
        DeleteAction::Restore => println!("Restored {} note(s)", args.ids.len()),
        _ => println!("Moved {} note(s) to the trash", args.ids.len()),
    }
    Ok(())
}

async fn purge_cmd(base_url: &str, args: NotePurgeArgs) -> anyhow::Result<()> {
    if !args.yes && !confirm_purge(args.ids.len())? {
        println!("Aborted.");
        return Ok(());
    }

    let (api, _) = authed_api(base_url)?;
    let settings = AppSettings::from_path(&paths::settings_path())?;
    let mut workspace = snapshot::load(&paths::snapshot_path());
    let mut coordinator = Coordinator::new(&api, &mut workspace, settings.add_new_at_bottom);
    coordinator.pull_all().await?;

    for id in &args.ids {
        coordinator.delete(id, DeleteAction::Permanent).await;
    }

    snapshot::save(&workspace, &paths::snapshot_path())?;
    println!("Permanently deleted {} note(s)", args.ids.len());
    Ok(())
}

#[derive(Clone, Copy)]
enum Flag {
    Archive,
    Pin,
}

async fn flag_cmd(base_url: &str, args: NoteFlagArgs, flag: Flag) -> anyhow::Result<()> {
    let (api, _) = authed_api(base_url)?;
    let settings = AppSettings::from_path(&paths::settings_path())?;
    let mut workspace = snapshot::load(&paths::snapshot_path());
    let mut coordinator = Coordinator::new(&api, &mut workspace, settings.add_new_at_bottom);
    coordinator.pull_all().await?;

    let value = !args.undo;
    match flag {
        Flag::Archive => coordinator.archive(&args.id, value).await,
        Flag::Pin => coordinator.pin(&args.id, value).await,
    }

    snapshot::save(&workspace, &paths::snapshot_path())?;
    let verb = match (flag, value) {
        (Flag::Archive, true) => "Archived",
        (Flag::Archive, false) => "Unarchived",
        (Flag::Pin, true) => "Pinned",
        (Flag::Pin, false) => "Unpinned",
    };
    println!("{} note {}", verb, args.id);
    Ok(())
}

/// Pure local operation against the cached listing. The next listing
/// that contacts the backend restores server order.
fn reorder_cmd(args: NoteReorderArgs) -> anyhow::Result<()> {
    let path = paths::snapshot_path();
    let mut workspace: Workspace = snapshot::load(&path);

    if workspace.notes.is_empty() {
        bail!("No cached listing; run `slate note list` first");
    }
    if !workspace.reorder(&args.source, &args.dest) {
        bail!("Reorder needs two distinct note ids present in the cached listing");
    }

    snapshot::save(&workspace, &path)?;
    println!(
        "Moved {} to {}'s position; automatic sorting is suspended until the next fetch",
        args.source, args.dest
    );
    Ok(())
}

fn confirm_purge(count: usize) -> anyhow::Result<bool> {
    print!("Permanently delete {} note(s)? This cannot be undone. [y/N] ", count);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn read_uploads(paths: &[PathBuf]) -> anyhow::Result<Vec<FileUpload>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read attachment {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "attachment".to_string());
        files.push(FileUpload { filename, bytes });
    }
    Ok(files)
}

fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for name in names {
        let trimmed = name.trim().to_string();
        if !trimmed.is_empty() && !seen.contains(&trimmed) {
            seen.push(trimmed);
        }
    }
    seen
}
