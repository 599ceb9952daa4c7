use std::fs;

use notes_core::models::{FilterView, SortKey, SortOrder, SortSpec, Theme};
use notes_core::{Note, NoteDraft};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::cli::{AddArgs, CompletionShell, ExportFormat, FilterArg, ThemeArg};
use crate::commands::add::run_add;
use crate::commands::clear::run_clear;
use crate::commands::common::{
    default_editor, format_relative_time, normalize_content, normalize_note_identifier,
    note_preview, open_provider, resolve_note_id, StoreContext,
};
use crate::commands::completions::render_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::{run_edit, run_edit_with};
use crate::commands::export::run_export;
use crate::commands::flags::{run_archive, run_pin};
use crate::commands::import::run_import;
use crate::commands::search::run_search;
use crate::commands::select::run_select;
use crate::commands::show::run_show;
use crate::commands::theme::run_theme;
use crate::commands::view::{run_filter, run_sort};
use crate::error::CliError;

fn temp_context() -> (TempDir, StoreContext) {
    let dir = tempfile::tempdir().unwrap();
    let ctx = StoreContext::new(dir.path().join("data"), "simple-notes");
    (dir, ctx)
}

fn seed(ctx: &StoreContext, drafts: Vec<NoteDraft>) -> Vec<String> {
    let mut provider = open_provider(ctx).unwrap();
    drafts
        .into_iter()
        .map(|draft| provider.create_note(draft))
        .collect()
}

fn note_with_id(id: &str) -> Note {
    let mut note = Note::new("", "");
    note.id = id.to_string();
    note
}

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn normalize_content_keeps_multiline_text() {
    assert_eq!(
        normalize_content("line 1\nline 2\n"),
        Some("line 1\nline 2".to_string())
    );
}

#[test]
fn normalize_note_identifier_rejects_blank() {
    assert_eq!(normalize_note_identifier("  abc ").unwrap(), "abc");
    assert!(matches!(
        normalize_note_identifier("   "),
        Err(CliError::EmptyNoteId)
    ));
}

#[test]
fn default_editor_is_defined() {
    assert!(!default_editor().is_empty());
}

#[test]
fn format_relative_time_units() {
    let now = 10_000_000_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
    assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
    assert_eq!(format_relative_time(now - 3 * 24 * 60 * 60_000, now), "3d ago");
    assert_eq!(format_relative_time(now + 5_000, now), "just now");
}

#[test]
fn note_preview_uses_first_line_and_placeholder() {
    let mut note = Note::new("Title", "  first   line  \nsecond line");
    assert_eq!(note_preview(&note, 40), "first line");

    note.content = String::new();
    assert_eq!(note_preview(&note, 40), "No content yet.");
}

#[test]
fn resolve_note_id_accepts_exact_and_unique_prefix() {
    let notes = vec![note_with_id("note-abc"), note_with_id("note-abd"), note_with_id("x1")];

    assert_eq!(resolve_note_id("note-abc", &notes).unwrap(), "note-abc");
    assert_eq!(resolve_note_id("x", &notes).unwrap(), "x1");
    assert!(matches!(
        resolve_note_id("note-ab", &notes),
        Err(CliError::AmbiguousNoteId(_))
    ));
    assert!(matches!(
        resolve_note_id("zzz", &notes),
        Err(CliError::NoteNotFound(_))
    ));
}

#[test]
fn resolve_note_id_prefers_exact_match_over_prefix() {
    let notes = vec![note_with_id("ab"), note_with_id("abc")];
    assert_eq!(resolve_note_id("ab", &notes).unwrap(), "ab");
}

#[test]
fn add_persists_note_with_flags_and_tags() {
    let (_dir, ctx) = temp_context();
    let args = AddArgs {
        title: Some("  Groceries ".to_string()),
        pin: true,
        archive: false,
        tags: vec!["home".to_string(), "  ".to_string()],
        content: vec!["milk".to_string(), "eggs".to_string()],
    };
    run_add(args, &ctx).unwrap();

    let provider = open_provider(&ctx).unwrap();
    let state = provider.state();
    assert_eq!(state.notes.len(), 1);
    let note = &state.notes[0];
    assert_eq!(note.title, "Groceries");
    assert_eq!(note.content, "milk eggs");
    assert!(note.pinned);
    assert_eq!(note.tags, vec!["home".to_string()]);
    assert_eq!(state.selected_id.as_deref(), Some(note.id.as_str()));
}

#[test]
fn delete_many_ids_uses_prefixes_and_clears_selection() {
    let (_dir, ctx) = temp_context();
    let ids = seed(
        &ctx,
        vec![
            NoteDraft::new("one", ""),
            NoteDraft::new("two", ""),
            NoteDraft::new("three", ""),
        ],
    );

    run_delete(&[ids[1].clone(), ids[2].clone(), ids[2].clone()], &ctx).unwrap();

    let provider = open_provider(&ctx).unwrap();
    let remaining = provider
        .state()
        .notes
        .iter()
        .map(|note| note.id.clone())
        .collect::<Vec<_>>();
    assert_eq!(remaining, vec![ids[0].clone()]);
    assert_eq!(provider.state().selected_id, None);
}

#[test]
fn delete_unknown_id_fails_without_changes() {
    let (_dir, ctx) = temp_context();
    seed(&ctx, vec![NoteDraft::new("one", "")]);

    let error = run_delete(&["missing".to_string()], &ctx).unwrap_err();
    assert!(matches!(error, CliError::NoteNotFound(_)));
    assert_eq!(open_provider(&ctx).unwrap().state().notes.len(), 1);
}

#[test]
fn pin_and_archive_toggle_persisted_flags() {
    let (_dir, ctx) = temp_context();
    let ids = seed(&ctx, vec![NoteDraft::new("one", "")]);

    run_pin(&ids[0], &ctx).unwrap();
    run_archive(&ids[0], &ctx).unwrap();
    {
        let provider = open_provider(&ctx).unwrap();
        let note = provider.state().note(&ids[0]).unwrap();
        assert!(note.pinned);
        assert!(note.archived);
    }

    run_pin(&ids[0], &ctx).unwrap();
    let provider = open_provider(&ctx).unwrap();
    assert!(!provider.state().note(&ids[0]).unwrap().pinned);
}

#[test]
fn edit_title_and_tags_without_editor() {
    let (_dir, ctx) = temp_context();
    let ids = seed(&ctx, vec![NoteDraft::new("old", "body")]);
    let before = open_provider(&ctx).unwrap().state().notes[0].updated_at;

    run_edit(
        &ids[0],
        Some(" new ".to_string()),
        Some(vec!["a".to_string(), " b ".to_string()]),
        &ctx,
    )
    .unwrap();

    let provider = open_provider(&ctx).unwrap();
    let note = &provider.state().notes[0];
    assert_eq!(note.title, "new");
    assert_eq!(note.content, "body");
    assert_eq!(note.tags, vec!["a".to_string(), "b".to_string()]);
    assert!(note.updated_at > before);
}

#[test]
fn edit_unchanged_empty_content_is_a_noop() {
    let (_dir, ctx) = temp_context();
    let ids = seed(&ctx, vec![NoteDraft::new("Only", "")]);
    let before = open_provider(&ctx).unwrap().state().notes[0].clone();

    run_edit_with(&ids[0], None, None, &ctx, |initial| {
        assert_eq!(initial, "");
        Ok(normalize_content(initial))
    })
    .unwrap();

    assert_eq!(open_provider(&ctx).unwrap().state().notes[0], before);
}

#[test]
fn edit_can_clear_note_content() {
    let (_dir, ctx) = temp_context();
    let ids = seed(&ctx, vec![NoteDraft::new("title", "body")]);

    run_edit_with(&ids[0], None, None, &ctx, |_| Ok(None)).unwrap();

    let provider = open_provider(&ctx).unwrap();
    let note = &provider.state().notes[0];
    assert_eq!(note.content, "");
    assert_eq!(note.title, "title");
}

#[test]
fn search_filter_and_sort_persist_view_settings() {
    let (_dir, ctx) = temp_context();
    seed(
        &ctx,
        vec![NoteDraft::new("alpha", ""), NoteDraft::new("Beta", "")],
    );

    run_search(&["ALP".to_string()], false, true, &ctx).unwrap();
    run_filter(FilterArg::Pinned, &ctx).unwrap();
    run_sort("title:asc", &ctx).unwrap();
    {
        let provider = open_provider(&ctx).unwrap();
        let state = provider.state();
        assert_eq!(state.query, "ALP");
        assert_eq!(FilterView::from_filter(state.filter), FilterView::Pinned);
        assert_eq!(state.sort, SortSpec::new(SortKey::Title, SortOrder::Asc));
    }

    run_search(&[], true, false, &ctx).unwrap();
    run_filter(FilterArg::All, &ctx).unwrap();
    let provider = open_provider(&ctx).unwrap();
    let titles = provider
        .visible_notes()
        .iter()
        .map(|note| note.title.clone())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["alpha".to_string(), "Beta".to_string()]);
}

#[test]
fn sort_rejects_unknown_field() {
    let (_dir, ctx) = temp_context();
    assert!(matches!(
        run_sort("color:asc", &ctx),
        Err(CliError::InvalidArgument(_))
    ));
}

#[test]
fn show_and_select_update_selection() {
    let (_dir, ctx) = temp_context();
    let ids = seed(
        &ctx,
        vec![NoteDraft::new("one", ""), NoteDraft::new("two", "")],
    );

    run_show(&ids[0], true, &ctx).unwrap();
    assert_eq!(
        open_provider(&ctx).unwrap().state().selected_id.as_deref(),
        Some(ids[0].as_str())
    );

    run_select(None, true, &ctx).unwrap();
    assert_eq!(open_provider(&ctx).unwrap().state().selected_id, None);

    run_select(Some(&ids[1]), false, &ctx).unwrap();
    assert_eq!(
        open_provider(&ctx).unwrap().state().selected_id.as_deref(),
        Some(ids[1].as_str())
    );
}

#[test]
fn import_merges_file_and_ignores_unsupported_payload() {
    let (dir, ctx) = temp_context();
    let ids = seed(&ctx, vec![NoteDraft::new("local", "")]);

    let payload = dir.path().join("import.json");
    fs::write(
        &payload,
        format!(
            r#"{{ "notes": [
                {{ "id": "{}", "title": "replaced", "createdAt": 5, "updatedAt": 3 }},
                {{ "id": "remote", "title": "remote" }},
                null,
                {{ "title": "no id" }}
            ] }}"#,
            ids[0]
        ),
    )
    .unwrap();
    run_import(&payload, &ctx).unwrap();

    let provider = open_provider(&ctx).unwrap();
    let state = provider.state();
    assert_eq!(state.notes.len(), 3);
    assert_eq!(state.notes[0].id, ids[0]);
    assert_eq!(state.notes[0].title, "replaced");
    assert_eq!(state.notes[0].updated_at, 5);
    assert_eq!(state.notes[1].id, "remote");
    assert!(!state.notes[2].id.is_empty());
    drop(provider);

    let unsupported = dir.path().join("bad.json");
    fs::write(&unsupported, r#"{ "items": [] }"#).unwrap();
    run_import(&unsupported, &ctx).unwrap();
    assert_eq!(open_provider(&ctx).unwrap().state().notes.len(), 3);
}

#[test]
fn export_writes_visible_notes_in_both_formats() {
    let (dir, ctx) = temp_context();
    let ids = seed(
        &ctx,
        vec![
            NoteDraft::new("kept", "hello")
                .pinned(true)
                .tags(vec!["t".to_string()]),
            NoteDraft::new("hidden", ""),
        ],
    );
    run_filter(FilterArg::Pinned, &ctx).unwrap();

    let json_path = dir.path().join("export.json");
    run_export(ExportFormat::Json, Some(&json_path), &ctx).unwrap();
    let exported: Vec<Note> =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].id, ids[0]);

    let markdown_path = dir.path().join("export.md");
    run_export(ExportFormat::Markdown, Some(&markdown_path), &ctx).unwrap();
    let markdown = fs::read_to_string(&markdown_path).unwrap();
    assert!(markdown.contains(&format!("id: {}", ids[0])));
    assert!(markdown.contains("# kept"));
    assert!(markdown.contains("  - t"));
    assert!(!markdown.contains("# hidden"));
}

#[test]
fn theme_toggle_persists_preference() {
    let (_dir, ctx) = temp_context();
    run_theme(Some(ThemeArg::Toggle), &ctx).unwrap();
    assert_eq!(
        open_provider(&ctx).unwrap().state().preferences.theme(),
        Theme::Dark
    );

    run_theme(Some(ThemeArg::Light), &ctx).unwrap();
    assert_eq!(
        open_provider(&ctx).unwrap().state().preferences.theme(),
        Theme::Light
    );
}

#[test]
fn clear_requires_confirmation() {
    let (_dir, ctx) = temp_context();
    seed(&ctx, vec![NoteDraft::new("one", "")]);

    assert!(matches!(
        run_clear(false, &ctx),
        Err(CliError::ClearNotConfirmed)
    ));
    assert_eq!(open_provider(&ctx).unwrap().state().notes.len(), 1);

    run_clear(true, &ctx).unwrap();
    assert!(open_provider(&ctx).unwrap().state().notes.is_empty());
}

#[test]
fn completions_use_binary_name() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("notes"));
}
