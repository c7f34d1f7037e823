use chrono::Utc;
use slate_core::{Label, Note, SyncPhase, View, Workspace};

use crate::api::{DeleteAction, FileUpload};
use crate::coordinator::Coordinator;
use crate::test::mock_api::{MockApi, StoredNote};

fn draft(title: &str, content: &str, labels: &[&str]) -> Note {
    let mut note = Note::draft(Utc::now());
    note.title = title.to_string();
    note.content = content.to_string();
    note.labels = labels.iter().map(|s| s.to_string()).collect();
    note
}

#[tokio::test]
async fn test_create_mints_unknown_labels_and_splits_content() {
    let mock = MockApi::new();
    let mut workspace = Workspace::new();

    {
        let mut coordinator = Coordinator::new(&mock, &mut workspace, false);
        coordinator.pull_all().await.unwrap();
        coordinator
            .create(draft("groceries", "milk\neggs", &["errands"]), vec![], vec![])
            .await;
    }

    let state = mock.state.lock().unwrap();
    assert_eq!(state.labels.len(), 1);
    assert_eq!(state.labels[0].name, "errands");
    assert_eq!(state.notes.len(), 1);
    assert_eq!(state.notes[0].title, "groceries");
    assert_eq!(
        state.notes[0].description,
        vec!["milk".to_string(), "eggs".to_string()]
    );
    assert_eq!(state.notes[0].label_ids, vec![state.labels[0].id.clone()]);
    drop(state);

    // Reconciled local state carries the resolved label by name
    assert_eq!(workspace.phase, SyncPhase::Confirmed);
    assert_eq!(workspace.notes.len(), 1);
    assert_eq!(workspace.notes[0].labels, vec!["errands".to_string()]);
    assert_eq!(workspace.notes[0].content, "milk\neggs");
}

#[tokio::test]
async fn test_known_labels_resolve_without_minting() {
    let mock = MockApi::new();
    let existing_id = mock.seed_label("work");
    let mut workspace = Workspace::new();

    {
        let mut coordinator = Coordinator::new(&mock, &mut workspace, false);
        coordinator.pull_all().await.unwrap();
        coordinator
            .create(draft("t", "", &["work"]), vec![], vec![])
            .await;
    }

    let state = mock.state.lock().unwrap();
    assert_eq!(state.labels.len(), 1);
    assert_eq!(state.notes[0].label_ids, vec![existing_id]);
}

#[tokio::test]
async fn test_bin_then_restore_roundtrip() {
    let mock = MockApi::new();
    let id = mock.seed_note(StoredNote {
        title: format!("note-{}", uuid::Uuid::new_v4()),
        ..Default::default()
    });
    let mut workspace = Workspace::new();
    let mut coordinator = Coordinator::new(&mock, &mut workspace, false);
    coordinator.pull_all().await.unwrap();

    coordinator.delete(&id, DeleteAction::Bin).await;
    assert!(coordinator.workspace.notes[0].is_trashed);

    coordinator.delete(&id, DeleteAction::Restore).await;
    assert!(!coordinator.workspace.notes[0].is_trashed);
}

#[tokio::test]
async fn test_purge_removes_the_record() {
    let mock = MockApi::new();
    let id = mock.seed_note(StoredNote::default());
    let mut workspace = Workspace::new();
    let mut coordinator = Coordinator::new(&mock, &mut workspace, false);
    coordinator.pull_all().await.unwrap();

    coordinator.delete(&id, DeleteAction::Permanent).await;

    assert!(coordinator.workspace.notes.is_empty());
    assert!(mock.state.lock().unwrap().notes.is_empty());
}

#[tokio::test]
async fn test_update_with_skip_refetch_leaves_state_pending() {
    let mock = MockApi::new();
    let id = mock.seed_note(StoredNote {
        title: "before".to_string(),
        ..Default::default()
    });
    let mut workspace = Workspace::new();
    let mut coordinator = Coordinator::new(&mock, &mut workspace, false);
    coordinator.pull_all().await.unwrap();

    let mut edited = coordinator.workspace.notes[0].clone();
    edited.title = "after".to_string();
    coordinator.update(edited.clone(), true, vec![], vec![]).await;

    assert_eq!(coordinator.workspace.phase, SyncPhase::Pending);
    assert_eq!(coordinator.workspace.notes[0].title, "after");
    assert_eq!(mock.state.lock().unwrap().notes[0].title, "after");
    drop(coordinator);

    // A plain update reconciles back to confirmed
    let mut coordinator = Coordinator::new(&mock, &mut workspace, false);
    let mut edited = edited;
    edited.id = id;
    edited.title = "final".to_string();
    coordinator.update(edited, false, vec![], vec![]).await;
    assert_eq!(coordinator.workspace.phase, SyncPhase::Confirmed);
    assert_eq!(coordinator.workspace.notes[0].title, "final");
}

#[tokio::test]
async fn test_attachment_intent_selects_multipart_encoding() {
    let mock = MockApi::new();
    let id = mock.seed_note(StoredNote {
        attachments: vec!["old.png".to_string()],
        ..Default::default()
    });
    let mut workspace = Workspace::new();
    let mut coordinator = Coordinator::new(&mock, &mut workspace, false);
    coordinator.pull_all().await.unwrap();

    // Plain field edit goes out as JSON
    let note = coordinator.workspace.notes[0].clone();
    coordinator.update(note.clone(), false, vec![], vec![]).await;

    // A new file forces multipart
    let upload = FileUpload {
        filename: "new.png".to_string(),
        bytes: vec![1, 2, 3],
    };
    coordinator.update(note.clone(), false, vec![upload], vec![]).await;

    // Deletion intent alone also forces multipart
    coordinator
        .update(note, false, vec![], vec!["old.png".to_string()])
        .await;

    let state = mock.state.lock().unwrap();
    assert_eq!(state.json_calls, vec!["update"]);
    assert_eq!(state.multipart_calls, vec!["update", "update"]);
    assert_eq!(state.notes[0].attachments, vec!["new.png".to_string()]);
    drop(state);
    assert_eq!(workspace.notes[0].id, id);
}

#[tokio::test]
async fn test_delete_label_strips_live_notes_and_resets_view() {
    let mock = MockApi::new();
    let work_id = mock.seed_label("work");
    let live = mock.seed_note(StoredNote {
        title: "live".to_string(),
        label_ids: vec![work_id.clone()],
        legacy_labels: vec!["home".to_string()],
        ..Default::default()
    });
    let trashed = mock.seed_note(StoredNote {
        title: "trashed".to_string(),
        status: "bin".to_string(),
        label_ids: vec![work_id.clone()],
        ..Default::default()
    });

    let mut workspace = Workspace::new();
    let mut coordinator = Coordinator::new(&mock, &mut workspace, false);
    coordinator.pull_all().await.unwrap();
    coordinator.workspace.select_label("work");

    coordinator
        .delete_label(&Label::Persisted {
            id: work_id.clone(),
            name: "work".to_string(),
        })
        .await;

    let state = mock.state.lock().unwrap();
    assert!(!state.labels.iter().any(|l| l.id == work_id));

    // The live note was rewritten without the deleted label; its other
    // name survived resolution (minted into a persisted record)
    let live_note = state.notes.iter().find(|n| n.id == live).unwrap();
    assert!(!live_note.label_ids.contains(&work_id));
    let home = state.labels.iter().find(|l| l.name == "home").unwrap();
    assert_eq!(live_note.label_ids, vec![home.id.clone()]);

    // Trashed notes are left alone server-side
    let trashed_note = state.notes.iter().find(|n| n.id == trashed).unwrap();
    assert_eq!(trashed_note.label_ids, vec![work_id]);
    drop(state);

    assert_eq!(workspace.view, View::Notes);
}

#[tokio::test]
async fn test_rename_persisted_label_renames_in_place() {
    let mock = MockApi::new();
    let id = mock.seed_label("work");
    mock.seed_note(StoredNote {
        label_ids: vec![id.clone()],
        ..Default::default()
    });

    let mut workspace = Workspace::new();
    let mut coordinator = Coordinator::new(&mock, &mut workspace, false);
    coordinator.pull_all().await.unwrap();

    coordinator
        .rename_label(
            &Label::Persisted {
                id: id.clone(),
                name: "work".to_string(),
            },
            "office",
        )
        .await;

    let state = mock.state.lock().unwrap();
    assert_eq!(state.labels[0].name, "office");
    // No per-note rewrites on the persisted path
    assert!(state.json_calls.is_empty());
    assert!(state.multipart_calls.is_empty());
    drop(state);
    assert_eq!(workspace.notes[0].labels, vec!["office".to_string()]);
}

#[tokio::test]
async fn test_rename_ephemeral_label_rewrites_carrying_notes() {
    let mock = MockApi::new();
    let id = mock.seed_note(StoredNote {
        legacy_labels: vec!["draft".to_string()],
        ..Default::default()
    });

    let mut workspace = Workspace::new();
    let mut coordinator = Coordinator::new(&mock, &mut workspace, false);
    coordinator.pull_all().await.unwrap();

    coordinator
        .rename_label(
            &Label::Ephemeral {
                name: "draft".to_string(),
            },
            "final",
        )
        .await;

    let state = mock.state.lock().unwrap();
    // The new name got minted as a persisted record and attached by id
    let minted = state.labels.iter().find(|l| l.name == "final").unwrap();
    let note = state.notes.iter().find(|n| n.id == id).unwrap();
    assert_eq!(note.label_ids, vec![minted.id.clone()]);
    assert!(note.legacy_labels.is_empty());
    drop(state);
    assert_eq!(workspace.notes[0].labels, vec!["final".to_string()]);
}

#[tokio::test]
async fn test_create_label_rejects_blank_names_without_a_request() {
    let mock = MockApi::new();
    let mut workspace = Workspace::new();
    let mut coordinator = Coordinator::new(&mock, &mut workspace, false);

    assert!(coordinator.create_label("   ").await.is_none());
    assert!(mock.state.lock().unwrap().labels.is_empty());
}

#[tokio::test]
async fn test_add_at_bottom_setting_controls_optimistic_placement() {
    let mock = MockApi::new();
    mock.seed_note(StoredNote {
        title: "existing".to_string(),
        ..Default::default()
    });

    let mut workspace = Workspace::new();
    let mut coordinator = Coordinator::new(&mock, &mut workspace, true);
    coordinator.pull_all().await.unwrap();
    coordinator.create(draft("new", "", &[]), vec![], vec![]).await;

    // After reconcile the mock appends, so bottom placement holds
    let titles: Vec<&str> = coordinator
        .workspace
        .notes
        .iter()
        .map(|n| n.title.as_str())
        .collect();
    assert_eq!(titles, vec!["existing", "new"]);
}
