use super::{confirm, BoardRef};
use crate::layout::{self, note_rects, Rect, Size};
use crate::models::{LockState, NewNote, Note, NoteFields, NoteUpdate};
use crate::schedule;
use crate::state::board_sync::BoardSync;
use crate::state::AppState;
use leptos::prelude::*;
use leptos::task::spawn_local;

const NOTE_WIDTH: f64 = 240.0;
const TEXT_NOTE_HEIGHT: f64 = 150.0;
const IMAGE_NOTE_HEIGHT: f64 = 280.0;
const COPY_OFFSET: f64 = 20.0;

/// Board-wide commands shared by the header, the quick actions bar and the FAB.
#[derive(Clone, Copy)]
pub(crate) struct BoardActions {
    sync: BoardSync,
    board: BoardRef,
}

impl BoardActions {
    pub fn new(state: AppState, board: BoardRef) -> Self {
        Self {
            sync: BoardSync::new(state),
            board,
        }
    }

    pub fn sync(&self) -> BoardSync {
        self.sync
    }

    fn state(&self) -> AppState {
        *self.sync.state()
    }

    pub fn toggle_edit_mode(&self) {
        let state = self.state();
        let editing = !state.edit_mode.get_untracked();
        state.edit_mode.set(editing);
        state.info(if editing {
            "Bearbeitungsmodus aktiviert."
        } else {
            "Ansichtsmodus aktiviert."
        });
    }

    pub fn add_note(&self, with_image: bool) {
        let state = self.state();
        let height = if with_image {
            IMAGE_NOTE_HEIGHT
        } else {
            TEXT_NOTE_HEIGHT
        };
        let rects = state.notes.with_untracked(|n| note_rects(n));
        let Some(spot) =
            layout::find_empty_spot(&rects, Size::new(NOTE_WIDTH, height), self.board.viewport())
        else {
            state.error("Die Pinnwand ist zu voll. Bitte schaffe erst Platz!");
            return;
        };

        let note = NoteFields::blank(
            state.current_day.get_untracked(),
            spot.x,
            spot.y,
            NOTE_WIDTH,
            height,
            with_image,
        );
        let sync = self.sync;
        spawn_local(async move {
            if sync.insert(note).await.is_some() {
                state.success("Neuer Zettel hinzugefügt!");
            } else {
                state.error("Fehler beim Hinzufügen des Zettels.");
            }
        });
    }

    pub fn paste_note(&self) {
        let state = self.state();
        let Some(copied) = state.copied_note.get_untracked() else {
            state.info("Kein Zettel zum Einfügen kopiert!");
            return;
        };

        let rects = state.notes.with_untracked(|n| note_rects(n));
        let size = Size::new(copied.width, copied.height);
        let Some(spot) = layout::find_empty_spot(&rects, size, self.board.viewport()) else {
            state.error("Kein freier Platz zum Einfügen!");
            return;
        };

        let note = NewNote {
            day: state.current_day.get_untracked(),
            x: spot.x,
            y: spot.y,
            ..copied
        };
        let sync = self.sync;
        spawn_local(async move {
            if sync.insert(note).await.is_some() {
                state.success("Zettel eingefügt!");
            } else {
                state.error("Fehler beim Einfügen des Zettels.");
            }
        });
    }

    pub fn copy_day(&self) {
        let state = self.state();
        let copies: Vec<NewNote> = state
            .notes
            .with_untracked(|notes| notes.iter().map(|n| n.without_id()).collect());
        if copies.is_empty() {
            state.info("Keine Zettel zum Kopieren vorhanden.");
            return;
        }

        let count = copies.len();
        state.set_copied_day(Some(copies));
        state.success(format!(
            "Tag '{}' mit {count} Zetteln kopiert.",
            state.current_day.get_untracked()
        ));
    }

    pub fn paste_day(&self) {
        let state = self.state();
        let Some(copied) = state.copied_day.get_untracked() else {
            state.info("Kein Tag zum Einfügen kopiert!");
            return;
        };
        let day = state.current_day.get_untracked();
        if !confirm(&format!(
            "{} kopierte Zettel am '{day}' einfügen?",
            copied.len()
        )) {
            return;
        }

        // Onto a day that already has notes, move the copies out of the way.
        let existing = state.notes.with_untracked(|n| note_rects(n));
        let targets: Vec<Rect> = copied
            .iter()
            .map(|n| Rect::new(n.x, n.y, n.width, n.height))
            .collect();
        let placed = if existing.is_empty() {
            targets
                .iter()
                .map(|r| layout::Point::new(r.x, r.y))
                .collect()
        } else {
            layout::place_batch(&targets, &existing)
        };

        let notes: Vec<NewNote> = copied
            .into_iter()
            .zip(placed)
            .map(|(n, p)| NewNote {
                day,
                x: p.x,
                y: p.y,
                ..n
            })
            .collect();

        let sync = self.sync;
        spawn_local(async move {
            if sync.insert_many(notes).await {
                state.success("Tag erfolgreich eingefügt!");
            } else {
                state.error("Fehler beim Einfügen des Tages.");
            }
        });
    }

    pub fn open_all(&self) {
        let state = self.state();
        let patches = state.notes.with_untracked(|n| schedule::open_all(n));
        if patches.is_empty() {
            state.info("Es sind keine Zettel geschlossen.");
            return;
        }
        if !confirm(&format!(
            "Wirklich alle {} geschlossenen Zettel öffnen?",
            patches.len()
        )) {
            return;
        }

        let sync = self.sync;
        spawn_local(async move {
            if sync.update_many(patches).await {
                state.success("Alle Zettel wurden geöffnet!");
            }
        });
    }

    pub fn lock_all(&self) {
        let state = self.state();
        let patches = state.notes.with_untracked(|n| schedule::lock_all(n));
        if patches.is_empty() {
            state.info("Alle Zettel sind bereits gesperrt.");
            return;
        }
        if !confirm(&format!(
            "Wirklich alle {} offenen Zettel sperren?",
            patches.len()
        )) {
            return;
        }

        let sync = self.sync;
        spawn_local(async move {
            if sync.update_many(patches).await {
                state.success("Alle Zettel wurden gesperrt!");
            }
        });
    }

    pub fn arrange(&self) {
        let state = self.state();
        let patches = state.notes.with_untracked(|n| layout::arrange(n));
        if patches.is_empty() {
            state.info("Keine Zettel zum Anordnen vorhanden.");
            return;
        }
        if !confirm("Wirklich alle Zettel automatisch anordnen?") {
            return;
        }

        let sync = self.sync;
        spawn_local(async move {
            if sync.update_many(patches).await {
                state.success("Pinnwand wurde aufgeräumt!");
            }
        });
    }

    pub fn clear_day(&self) {
        let state = self.state();
        let notes = state.notes.get_untracked();
        if notes.is_empty() {
            state.info("Der Tag ist bereits leer.");
            return;
        }
        let day = state.current_day.get_untracked();
        let count = notes.len();
        if !confirm(&format!(
            "Möchtest du wirklich alle {count} Zettel von '{day}' dauerhaft löschen? Diese Aktion kann nicht rückgängig gemacht werden!"
        )) {
            return;
        }

        let sync = self.sync;
        spawn_local(async move {
            if sync.clear_day(day, &notes).await {
                state.success(format!("Alle {count} Zettel von '{day}' wurden gelöscht!"));
            } else {
                state.error("Ein Fehler ist beim Löschen aufgetreten.");
            }
        });
    }

    pub fn zoom_fit(&self) {
        let state = self.state();
        let rects = state.notes.with_untracked(|n| note_rects(n));
        match layout::zoom_fit(&rects, self.board.viewport()) {
            Some(target) => self.board.scroll_to(target),
            None => state.info("Keine Zettel zum Anzeigen vorhanden."),
        }
    }

    pub fn center_view(&self) {
        let rects = self.state().notes.with_untracked(|n| note_rects(n));
        self.board
            .scroll_to(layout::center_view(&rects, self.board.viewport()));
    }

    /// Duplicate `note` next to itself and remember it for pasting.
    pub fn copy_note(&self, note: &Note) {
        let state = self.state();
        let copy = note.duplicate();
        let others = state.notes.with_untracked(|n| note_rects(n));
        let proposed = layout::Point::new(copy.x + COPY_OFFSET, copy.y + COPY_OFFSET);
        let Some(spot) =
            layout::resolve_collisions(proposed, Size::new(copy.width, copy.height), &others)
        else {
            state.error("Kein freier Platz für die Kopie!");
            return;
        };

        state.set_copied_note(Some(copy.clone()));
        let copy = NewNote {
            x: spot.x,
            y: spot.y,
            ..copy
        };
        let sync = self.sync;
        spawn_local(async move {
            if sync.insert(copy).await.is_some() {
                state.success("Zettel wurde kopiert!");
            } else {
                state.error("Fehler beim Kopieren des Zettels.");
            }
        });
    }

    pub fn set_color(&self, id: i64, color: &'static str) {
        let sync = self.sync;
        spawn_local(async move {
            sync.update(id, NoteUpdate::color(color)).await;
        });
    }

    pub fn set_lock(&self, id: i64, lock: LockState) {
        let state = self.state();
        let sync = self.sync;
        spawn_local(async move {
            if sync.update(id, NoteUpdate::lock(lock)).await {
                state.info(match lock {
                    LockState::Open => "Zettel geöffnet.",
                    _ => "Zettel gesperrt.",
                });
            }
        });
    }

    pub fn delete_note(&self, note: Note) {
        let state = self.state();
        let title = crate::util::strip_html(&note.fields.name);
        let title = if title.trim().is_empty() {
            "Unbenannt".to_string()
        } else {
            title
        };
        if !confirm(&format!("Zettel \"{title}\" wirklich löschen?")) {
            return;
        }

        if state.editing_note.get_untracked() == Some(note.id) {
            state.editing_note.set(None);
        }
        let sync = self.sync;
        spawn_local(async move {
            if sync.delete(&note).await {
                state.success("Zettel gelöscht.");
            } else {
                state.error("Fehler beim Löschen des Zettels.");
            }
        });
    }
}
