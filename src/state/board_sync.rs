use super::AppState;
use crate::api::image_name_from_url;
use crate::models::{NewNote, Note, NotePatch, NoteUpdate, Weekday};
use crate::realtime::protocol::ChangeEvent;
use crate::util::{image_file_name, now_ms, validate_image};
use leptos::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Fold one realtime change into the notes of `current_day`.
pub(crate) fn apply_change(notes: &mut Vec<Note>, change: ChangeEvent, current_day: Weekday) {
    match change {
        ChangeEvent::Insert(note) => {
            if note.fields.day == current_day && !notes.iter().any(|n| n.id == note.id) {
                notes.push(note);
            }
        }
        ChangeEvent::Update(note) => {
            if note.fields.day != current_day {
                notes.retain(|n| n.id != note.id);
            } else if let Some(existing) = notes.iter_mut().find(|n| n.id == note.id) {
                *existing = note;
            } else {
                notes.push(note);
            }
        }
        ChangeEvent::Delete { id } => notes.retain(|n| n.id != id),
    }
}

/// Only the newest load may write the notes of the board.
pub(crate) fn is_current_load(request_id: u64, latest: u64) -> bool {
    request_id == latest
}

pub(crate) fn apply_local(notes: &mut [Note], id: i64, update: &NoteUpdate) {
    if let Some(note) = notes.iter_mut().find(|n| n.id == id) {
        note.apply(update);
    }
}

/// Persistence actions for the board. Local state is updated first; the
/// realtime echo confirms it, and a failed write reloads the day.
#[derive(Clone, Copy)]
pub(crate) struct BoardSync {
    state: AppState,
}

impl BoardSync {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn load_day(&self, day: Weekday) {
        let request_id = self.state.notes_request_id.get_untracked() + 1;
        self.state.notes_request_id.set(request_id);
        self.state.notes_loading.set(true);

        let result = self.state.api().load_notes(day).await;

        if !is_current_load(request_id, self.state.notes_request_id.get_untracked()) {
            tracing::debug!(%day, "stale notes response ignored");
            return;
        }
        self.state.notes_loading.set(false);

        match result {
            Ok(notes) => self.state.notes.set(notes),
            Err(e) => {
                tracing::error!(%day, error = %e, "loading notes failed");
                self.state.notes.set(vec![]);
                self.state.error("Fehler beim Laden der Zettel.");
            }
        }
    }

    pub fn apply_remote(&self, change: ChangeEvent) {
        let day = self.state.current_day.get_untracked();
        self.state
            .notes
            .update(|notes| apply_change(notes, change, day));
    }

    async fn recover(&self, what: &str, e: impl std::fmt::Display) {
        tracing::error!(error = %e, "{what} failed");
        self.state.error(format!("{what} fehlgeschlagen."));
        self.load_day(self.state.current_day.get_untracked()).await;
    }

    pub async fn update(&self, id: i64, update: NoteUpdate) -> bool {
        self.state
            .notes
            .update(|notes| apply_local(notes, id, &update));

        match self.state.api().update_note(id, &update).await {
            Ok(()) => true,
            Err(e) => {
                self.recover("Speichern", e).await;
                false
            }
        }
    }

    pub async fn update_many(&self, patches: Vec<NotePatch>) -> bool {
        if patches.is_empty() {
            return true;
        }
        self.state.notes.update(|notes| {
            for p in &patches {
                apply_local(notes, p.id, &p.update);
            }
        });

        match self.state.api().update_notes(&patches).await {
            Ok(()) => true,
            Err(e) => {
                self.recover("Aktualisieren", e).await;
                false
            }
        }
    }

    pub async fn insert(&self, note: NewNote) -> Option<Note> {
        match self.state.api().insert_note(&note).await {
            Ok(created) => {
                self.apply_remote(ChangeEvent::Insert(created.clone()));
                Some(created)
            }
            Err(e) => {
                tracing::error!(error = %e, "insert failed");
                None
            }
        }
    }

    pub async fn insert_many(&self, notes: Vec<NewNote>) -> bool {
        match self.state.api().insert_notes(&notes).await {
            Ok(created) => {
                for note in created {
                    self.apply_remote(ChangeEvent::Insert(note));
                }
                true
            }
            Err(e) => {
                tracing::error!(error = %e, count = notes.len(), "bulk insert failed");
                false
            }
        }
    }

    pub async fn delete(&self, note: &Note) -> bool {
        let api = self.state.api();
        if let Err(e) = api.delete_note(note.id).await {
            tracing::error!(id = note.id, error = %e, "delete failed");
            return false;
        }
        self.apply_remote(ChangeEvent::Delete { id: note.id });

        if let Some(url) = note.fields.image.as_deref() {
            api.remove_images_for([url]).await;
        }
        true
    }

    /// Remove every note of `day` together with its images.
    pub async fn clear_day(&self, day: Weekday, notes: &[Note]) -> bool {
        let api = self.state.api();
        api.remove_images_for(notes.iter().filter_map(|n| n.fields.image.as_deref()))
            .await;

        match api.delete_day(day).await {
            Ok(()) => {
                if self.state.current_day.get_untracked() == day {
                    self.state.notes.set(vec![]);
                }
                true
            }
            Err(e) => {
                tracing::error!(%day, error = %e, "clearing day failed");
                false
            }
        }
    }

    /// Upload `file` as the note's image, replacing any previous one.
    pub async fn set_image(&self, note: &Note, file: web_sys::File) -> Result<(), String> {
        validate_image(&file.type_(), file.size()).map_err(|e| e.to_string())?;

        let bytes = JsFuture::from(file.array_buffer())
            .await
            .map(|buf| js_sys::Uint8Array::new(&buf).to_vec())
            .map_err(|e| {
                tracing::error!(error = ?e, "reading image failed");
                "Bild konnte nicht gelesen werden.".to_string()
            })?;

        let api = self.state.api();
        if let Some(old) = note.fields.image.as_deref() {
            api.remove_images_for([old]).await;
        }

        let name = image_file_name(note.id, &file.name(), now_ms());
        let url = api
            .upload_image(&name, &file.type_(), bytes)
            .await
            .map_err(|e| {
                tracing::error!(%name, error = %e, "image upload failed");
                "Fehler beim Hochladen des Bildes.".to_string()
            })?;

        if self.update(note.id, NoteUpdate::image(Some(url))).await {
            Ok(())
        } else {
            Err("Fehler beim Speichern des Bildes.".to_string())
        }
    }

    pub async fn remove_image(&self, note: &Note) -> bool {
        if let Some(name) = note.fields.image.as_deref().and_then(image_name_from_url) {
            if let Err(e) = self.state.api().remove_images(&[name]).await {
                tracing::warn!(id = note.id, error = %e, "image blob not removed");
            }
        }
        self.update(note.id, NoteUpdate::image(None)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LockState, NoteFields};

    fn note(id: i64, day: Weekday, name: &str) -> Note {
        Note {
            id,
            fields: NoteFields {
                name: name.to_string(),
                ..NoteFields::blank(day, 0.0, 0.0, 240.0, 150.0, false)
            },
        }
    }

    #[test]
    fn test_stale_load_is_not_current() {
        // Monday requested as 1, Tuesday as 2; Monday's answer arrives last.
        assert!(!is_current_load(1, 2));
        assert!(is_current_load(2, 2));
    }

    #[test]
    fn test_insert_only_for_current_day_and_once() {
        let mut notes = vec![note(1, Weekday::Montag, "a")];

        apply_change(
            &mut notes,
            ChangeEvent::Insert(note(2, Weekday::Dienstag, "b")),
            Weekday::Montag,
        );
        assert_eq!(notes.len(), 1);

        apply_change(
            &mut notes,
            ChangeEvent::Insert(note(2, Weekday::Montag, "b")),
            Weekday::Montag,
        );
        apply_change(
            &mut notes,
            ChangeEvent::Insert(note(2, Weekday::Montag, "b")),
            Weekday::Montag,
        );
        assert_eq!(notes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_update_replaces_or_moves_away() {
        let mut notes = vec![note(1, Weekday::Montag, "a"), note(2, Weekday::Montag, "b")];

        apply_change(
            &mut notes,
            ChangeEvent::Update(note(1, Weekday::Montag, "neu")),
            Weekday::Montag,
        );
        assert_eq!(notes[0].fields.name, "neu");

        apply_change(
            &mut notes,
            ChangeEvent::Update(note(2, Weekday::Freitag, "b")),
            Weekday::Montag,
        );
        assert_eq!(notes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1]);

        // Moved onto the visible day from elsewhere.
        apply_change(
            &mut notes,
            ChangeEvent::Update(note(3, Weekday::Montag, "c")),
            Weekday::Montag,
        );
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn test_delete_ignores_day() {
        let mut notes = vec![note(1, Weekday::Montag, "a")];
        apply_change(&mut notes, ChangeEvent::Delete { id: 1 }, Weekday::Dienstag);
        assert!(notes.is_empty());

        apply_change(&mut notes, ChangeEvent::Delete { id: 99 }, Weekday::Montag);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_apply_local_touches_only_target() {
        let mut notes = vec![note(1, Weekday::Montag, "a"), note(2, Weekday::Montag, "b")];
        apply_local(&mut notes, 2, &NoteUpdate::lock(LockState::Locked));
        assert_eq!(notes[0].fields.closed_until, LockState::Open);
        assert_eq!(notes[1].fields.closed_until, LockState::Locked);

        apply_local(&mut notes, 42, &NoteUpdate::position(1.0, 1.0));
        assert_eq!(notes[0].fields.x, 0.0);
    }
}
