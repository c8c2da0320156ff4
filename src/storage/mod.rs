use crate::models::{NewNote, Theme};
use serde::{Deserialize, Serialize};

/// Plain theme name, shared with the stylesheet loader.
pub(crate) const THEME_KEY: &str = "selectedTheme";
pub(crate) const COPIED_NOTE_KEY: &str = "pinnwand_copied_note";
pub(crate) const COPIED_DAY_KEY: &str = "pinnwand_copied_day";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable localStorage entry");
            None
        }
    }
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, &json);
        }
    }
}

pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub(crate) fn load_theme() -> Theme {
    local_storage()
        .and_then(|s| s.get_item(THEME_KEY).ok().flatten())
        .and_then(|name| name.parse().ok())
        .unwrap_or_default()
}

pub(crate) fn save_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_KEY, theme.as_ref());
    }
}

pub(crate) fn load_copied_note() -> Option<NewNote> {
    load_json_from_storage(COPIED_NOTE_KEY)
}

pub(crate) fn save_copied_note(note: Option<&NewNote>) {
    match note {
        Some(note) => save_json_to_storage(COPIED_NOTE_KEY, note),
        None => remove_from_storage(COPIED_NOTE_KEY),
    }
}

pub(crate) fn load_copied_day() -> Option<Vec<NewNote>> {
    load_json_from_storage::<Vec<NewNote>>(COPIED_DAY_KEY).filter(|notes| !notes.is_empty())
}

pub(crate) fn save_copied_day(notes: Option<&[NewNote]>) {
    match notes {
        Some(notes) if !notes.is_empty() => save_json_to_storage(COPIED_DAY_KEY, &notes),
        _ => remove_from_storage(COPIED_DAY_KEY),
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::{NoteFields, Weekday};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_theme_roundtrip() {
        save_theme(Theme::Minecraft);
        assert_eq!(load_theme(), Theme::Minecraft);

        remove_from_storage(THEME_KEY);
        assert_eq!(load_theme(), Theme::Chalkboard);
    }

    #[wasm_bindgen_test]
    fn test_unknown_theme_falls_back() {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(THEME_KEY, "barbie");
        }
        assert_eq!(load_theme(), Theme::Chalkboard);
        remove_from_storage(THEME_KEY);
    }

    #[wasm_bindgen_test]
    fn test_clipboard_roundtrip() {
        let note = NoteFields::blank(Weekday::Montag, 1.0, 2.0, 240.0, 150.0, false);
        save_copied_note(Some(&note));
        assert_eq!(load_copied_note(), Some(note.clone()));
        save_copied_note(None);
        assert_eq!(load_copied_note(), None);

        save_copied_day(Some(&[note.clone(), note]));
        assert_eq!(load_copied_day().map(|d| d.len()), Some(2));
        save_copied_day(Some(&[]));
        assert_eq!(load_copied_day(), None);
    }
}
