use serde_json::{json, Value};

use phrase_core::protocol::handle;
use phrase_core::session::Session;

fn send(session: &mut Session, cmd: &str, payload: Value) -> Value {
    let line = json!({ "id": 1, "cmd": cmd, "payload": payload }).to_string();
    let resp: Value = serde_json::from_str(&handle(session, &line)).unwrap();
    assert_eq!(resp["status"], "ok", "{cmd} failed: {resp}");
    resp["payload"].clone()
}

fn send_err(session: &mut Session, cmd: &str, payload: Value) -> String {
    let line = json!({ "id": 1, "cmd": cmd, "payload": payload }).to_string();
    let resp: Value = serde_json::from_str(&handle(session, &line)).unwrap();
    assert_eq!(resp["status"], "error", "{cmd} unexpectedly succeeded: {resp}");
    resp["message"].as_str().unwrap().to_string()
}

fn page_ids(view: &Value) -> Vec<String> {
    view["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn edited_row_stays_visible_under_missing_filter() {
    let mut s = Session::default();
    send(
        &mut s,
        "phrases.load",
        json!({ "rows": [{
            "id": "r1",
            "phraseKey": "hello",
            "translations": { "fr": "bonjour", "de": "", "es": "hola", "ar": "marhaban" }
        }]}),
    );

    let f = send(&mut s, "filter.set", json!({ "missing_only": true }));
    assert_eq!(f["total"], 1);
    assert_eq!(f["active_filters"], 1);

    send(&mut s, "edit.begin", json!({ "id": "r1" }));
    send(
        &mut s,
        "phrases.set_translation",
        json!({ "id": "r1", "lang": "de", "text": "hallo" }),
    );
    let view = send(&mut s, "view.get", json!({}));
    assert_eq!(page_ids(&view), vec!["r1"]);
    assert_eq!(view["rows"][0]["editing"], true);
    assert_eq!(view["rows"][0]["translations"]["de"], "hallo");

    let commit = send(&mut s, "edit.commit", json!({ "id": "r1" }));
    assert_eq!(commit["state"], "viewing");
    let view = send(&mut s, "view.get", json!({}));
    assert_eq!(view["total"], 0);
}

#[test]
fn cancel_restores_pre_edit_values_including_null_namespace() {
    let mut s = Session::default();
    send(
        &mut s,
        "phrases.load",
        json!({ "rows": [{ "id": "r1", "phrase_key": "title", "namespace": null }] }),
    );
    send(&mut s, "edit.begin", json!({ "id": "r1" }));
    send(
        &mut s,
        "phrases.update",
        json!({ "id": "r1", "fields": { "phrase_key": "renamed", "namespace": "Digital Whiteboard" } }),
    );

    let cancel = send(&mut s, "edit.cancel", json!({ "id": "r1" }));
    assert_eq!(cancel["state"], "viewing");
    assert_eq!(cancel["row"]["phrase_key"], "title");
    assert_eq!(cancel["row"]["namespace"], Value::Null);
}

#[test]
fn hidden_selected_row_is_bulk_deleted_and_page_clamps() {
    let mut s = Session::default();
    let rows: Vec<Value> = (0..12)
        .map(|i| json!({ "id": format!("r{i:02}"), "phrase_key": format!("key{i:02}") }))
        .collect();
    send(&mut s, "phrases.load", json!({ "rows": rows }));
    send(&mut s, "view.page_size", json!({ "page_size": 5 }));

    send(&mut s, "selection.toggle", json!({ "id": "r00" }));
    send(&mut s, "selection.toggle", json!({ "id": "r10" }));
    send(&mut s, "selection.toggle", json!({ "id": "r11" }));
    let view = send(&mut s, "view.page", json!({ "page_index": 2 }));
    assert_eq!(page_ids(&view), vec!["r10", "r11"]);

    send(&mut s, "filter.set", json!({ "search": "KEY1" }));
    let deleted = send(&mut s, "selection.bulk_delete", json!({}));
    assert_eq!(deleted["removed"], 3);

    send(&mut s, "filter.set", json!({ "search": "" }));
    let view = send(&mut s, "view.get", json!({}));
    assert_eq!(view["total"], 9);
    assert_eq!(view["selected_count"], 0);
    assert_eq!(view["page_index"], 0);
    assert!(!page_ids(&view).contains(&"r00".to_string()));
}

#[test]
fn sort_toggle_and_select_all_header_state() {
    let mut s = Session::default();
    send(
        &mut s,
        "phrases.load",
        json!({ "rows": [
            { "id": "a", "phrase_key": "beta" },
            { "id": "b", "phrase_key": "Alpha" },
            { "id": "c", "phrase_key": "gamma" }
        ]}),
    );

    let sort = send(&mut s, "view.sort", json!({ "column": "phrase_key" }));
    assert_eq!(sort["sort"]["direction"], "asc");
    let view = send(&mut s, "view.get", json!({}));
    assert_eq!(page_ids(&view), vec!["b", "a", "c"]);

    send(&mut s, "view.sort", json!({ "column": "phrase_key" }));
    let view = send(&mut s, "view.get", json!({}));
    assert_eq!(page_ids(&view), vec!["c", "a", "b"]);

    let sort = send(&mut s, "view.sort", json!({ "column": "phrase_key" }));
    assert_eq!(sort["sort"], Value::Null);

    send(&mut s, "selection.toggle", json!({ "id": "a" }));
    assert_eq!(send(&mut s, "view.get", json!({}))["header"], "partial");
    send(&mut s, "selection.select_all", json!({}));
    assert_eq!(send(&mut s, "view.get", json!({}))["header"], "all");
}

#[test]
fn add_phrase_then_cancel_keeps_blank_row() {
    let mut s = Session::default();
    let added = send(&mut s, "phrases.add", json!({}));
    let id = added["id"].as_str().unwrap().to_string();
    assert_eq!(added["row"]["translations"].as_object().unwrap().len(), 4);

    send(
        &mut s,
        "phrases.update",
        json!({ "id": id, "fields": { "phrase_key": "draft" } }),
    );
    send(&mut s, "edit.cancel", json!({ "id": id }));

    let list = send(&mut s, "phrases.list", json!({}));
    assert_eq!(list["rows"].as_array().unwrap().len(), 1);
    assert_eq!(list["rows"][0]["phrase_key"], "");
}

#[test]
fn translation_lookup_failure_leaves_field_untouched() {
    let mut s = Session::default();
    send(
        &mut s,
        "phrases.load",
        json!({ "rows": [{ "id": "r1", "phrase_key": "k", "translations": { "fr": "oui" } }] }),
    );

    let begin = send(&mut s, "lookup.begin", json!({ "id": "r1" }));
    assert_eq!(begin["started"], true);
    assert_eq!(send(&mut s, "view.get", json!({}))["rows"][0]["loading"], true);

    let done = send(&mut s, "lookup.finish", json!({ "id": "r1", "lang": "fr", "text": "" }));
    assert_eq!(done["applied"], false);
    assert_eq!(done["row"]["translations"]["fr"], "oui");
    assert_eq!(send(&mut s, "view.get", json!({}))["rows"][0]["loading"], false);

    send(&mut s, "lookup.begin", json!({ "id": "r1" }));
    let done = send(&mut s, "lookup.finish", json!({ "id": "r1", "lang": "es", "text": "sí" }));
    assert_eq!(done["applied"], true);
    assert_eq!(done["row"]["translations"]["es"], "sí");
}

#[test]
fn cultures_reorder_add_save_delete() {
    let mut s = Session::default();
    let moved = send(&mut s, "cultures.move", json!({ "source": 0, "target": 2 }));
    assert_eq!(moved["moved"], true);
    let codes: Vec<&str> = moved["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["fr-FR", "de-DE", "en-US"]);

    let added = send(&mut s, "cultures.add", json!({}));
    assert_eq!(added["id"], "4");
    assert_eq!(added["editing_id"], "4");

    let saved = send(
        &mut s,
        "cultures.save",
        json!({ "id": "4", "code": "es-ES", "name": "Spanish (Spain)" }),
    );
    assert_eq!(saved["editing_id"], Value::Null);
    assert_eq!(saved["entries"][3]["code"], "es-ES");

    send(&mut s, "cultures.delete", json!({ "id": "4" }));
    let again = send(&mut s, "cultures.add", json!({}));
    assert_eq!(again["id"], "5");

    let msg = send_err(&mut s, "cultures.edit", json!({ "id": "99" }));
    assert_eq!(msg, "unknown culture: 99");
}

#[test]
fn export_selected_and_merge_import_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selected.json");
    let path_str = path.to_str().unwrap();

    let mut s = Session::default();
    send(
        &mut s,
        "phrases.load",
        json!({ "rows": [
            { "id": "a", "phrase_key": "home.title", "translations": { "fr": "Accueil" } },
            { "id": "b", "phrase_key": "home.body" }
        ]}),
    );
    send(&mut s, "selection.toggle", json!({ "id": "a" }));
    let exported = send(
        &mut s,
        "exchange.export",
        json!({ "scope": "selected", "path": path_str }),
    );
    assert_eq!(exported["count"], 1);

    let mut other = Session::default();
    send(
        &mut other,
        "phrases.load",
        json!({ "rows": [{ "id": "x", "phrase_key": "home.title" }] }),
    );
    let report = send(
        &mut other,
        "exchange.import",
        json!({ "path": path_str, "mode": "merge" }),
    );
    assert_eq!(report["updated"], 1);
    assert_eq!(report["added"], 0);

    let list = send(&mut other, "phrases.list", json!({}));
    assert_eq!(list["rows"][0]["translations"]["fr"], "Accueil");
}

#[test]
fn unknown_rows_and_languages_are_rejected() {
    let mut s = Session::default();
    assert_eq!(
        send_err(&mut s, "edit.begin", json!({ "id": "ghost" })),
        "unknown row: ghost"
    );
    send(&mut s, "phrases.load", json!({ "rows": [{ "id": "r1" }] }));
    assert_eq!(
        send_err(&mut s, "phrases.set_translation", json!({ "id": "r1", "lang": "xx", "text": "?" })),
        "unknown language: xx"
    );
    assert_eq!(
        send_err(&mut s, "view.page_size", json!({ "page_size": 3 })),
        "invalid page size: 3"
    );
    assert!(send_err(&mut s, "filter.set", json!({ "namespaces": ["Backend"] }))
        .contains("unknown namespace"));
}

#[test]
fn qa_reports_missing_translations() {
    let mut s = Session::default();
    send(
        &mut s,
        "phrases.load",
        json!({ "rows": [{
            "id": "r1", "phrase_key": "k", "default_translation": "Hi",
            "translations": { "fr": "Salut", "de": "Hallo", "es": "Hola" }
        }]}),
    );
    let qa = send(&mut s, "qa.run", json!({}));
    let issues = qa["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["code"], "MISSING_TRANSLATION");
    assert_eq!(issues[0]["row_id"], "r1");
}

#[test]
fn rejected_filter_update_leaves_criteria_untouched() {
    let mut s = Session::default();
    send(
        &mut s,
        "phrases.load",
        json!({ "rows": [{ "id": "r1", "phrase_key": "home.title" }] }),
    );
    send(&mut s, "filter.set", json!({ "search": "home" }));

    let msg = send_err(
        &mut s,
        "filter.set",
        json!({ "search": "zzz", "namespaces": ["Backend"], "missing_only": true }),
    );
    assert!(msg.contains("unknown namespace: Backend"));
    let msg = send_err(&mut s, "filter.set", json!({ "search": "zzz", "missing_only": "yes" }));
    assert!(msg.contains("missing_only"));

    let state = send(&mut s, "filter.get", json!({}));
    assert_eq!(state["criteria"]["search"], "home");
    assert_eq!(state["criteria"]["missing_only"], false);
    assert_eq!(state["total"], 1);
}

#[test]
fn merge_import_never_lands_on_a_draft_row() {
    let mut s = Session::default();
    let added = send(&mut s, "phrases.add", json!({}));
    let draft = added["id"].as_str().unwrap().to_string();

    let report = send(
        &mut s,
        "exchange.import",
        json!({
            "mode": "merge",
            "document": { "version": 1, "phrases": [
                { "phrase_key": "", "default_translation": "Imported" }
            ]}
        }),
    );
    assert_eq!(report["added"], 1);
    assert_eq!(report["updated"], 0);

    send(
        &mut s,
        "phrases.update",
        json!({ "id": draft, "fields": { "phrase_key": "lobby.title" } }),
    );
    let report = send(
        &mut s,
        "exchange.import",
        json!({
            "mode": "merge",
            "document": { "phrases": [
                { "phrase_key": "lobby.title", "default_translation": "Welcome" }
            ]}
        }),
    );
    assert_eq!(report["skipped"], 1);

    let cancel = send(&mut s, "edit.cancel", json!({ "id": draft }));
    assert_eq!(cancel["row"]["phrase_key"], "");
    assert_eq!(cancel["row"]["default_translation"], "");
    let list = send(&mut s, "phrases.list", json!({}));
    assert_eq!(list["rows"].as_array().unwrap().len(), 2);
}

#[test]
fn loaded_codes_outside_the_catalog_are_dropped() {
    let mut s = Session::default();
    send(
        &mut s,
        "phrases.load",
        json!({ "rows": [{
            "id": "r1", "phrase_key": "k", "default_translation": "Hi",
            "translations": { "fr": "a", "de": "b", "es": "c", "ar": "d", "xx": "" }
        }]}),
    );

    let f = send(&mut s, "filter.set", json!({ "missing_only": true }));
    assert_eq!(f["total"], 0);
    let list = send(&mut s, "phrases.list", json!({}));
    assert!(list["rows"][0]["translations"].get("xx").is_none());
}

#[test]
fn huge_numeric_row_id_does_not_break_add() {
    let mut s = Session::default();
    let max = u128::MAX.to_string();
    send(&mut s, "phrases.load", json!({ "rows": [{ "id": max, "phrase_key": "k" }] }));

    let first = send(&mut s, "phrases.add", json!({}));
    let second = send(&mut s, "phrases.add", json!({}));
    assert_ne!(first["id"], json!(max));
    assert_ne!(first["id"], second["id"]);
}

#[test]
fn update_can_clear_optional_fields() {
    let mut s = Session::default();
    send(
        &mut s,
        "phrases.load",
        json!({ "rows": [{ "id": "r1", "phrase_key": "k", "description": "old", "screenshot": "a.png" }] }),
    );
    let updated = send(
        &mut s,
        "phrases.update",
        json!({ "id": "r1", "fields": { "description": null } }),
    );
    assert_eq!(updated["row"]["description"], Value::Null);
    assert_eq!(updated["row"]["screenshot"], "a.png");
}
