pub(crate) mod board_sync;

use crate::api::ApiClient;
use crate::models::{NewNote, Note, Theme, Weekday};
use crate::storage::{
    load_copied_day, load_copied_note, load_theme, save_copied_day, save_copied_note, save_theme,
};
use crate::util::today_local;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

const NOTIFICATION_MS: i32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// A hide timer may only clear the notification it was started for.
pub(crate) fn should_hide(current: Option<&Notification>, id: u64) -> bool {
    current.is_some_and(|n| n.id == id)
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    pub current_day: RwSignal<Weekday>,
    pub theme: RwSignal<Theme>,
    pub edit_mode: RwSignal<bool>,

    /// Notes of `current_day`, kept in sync by realtime changes.
    pub notes: RwSignal<Vec<Note>>,
    pub notes_loading: RwSignal<bool>,

    /// Load guard: only the newest request may write `notes`.
    pub notes_request_id: RwSignal<u64>,

    pub copied_note: RwSignal<Option<NewNote>>,
    pub copied_day: RwSignal<Option<Vec<NewNote>>>,

    /// Note open in the side editor.
    pub editing_note: RwSignal<Option<i64>>,

    pub notification: RwSignal<Option<Notification>>,
    notification_seq: RwSignal<u64>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_window()),
            current_day: RwSignal::new(Weekday::default_for(today_local().index())),
            theme: RwSignal::new(load_theme()),
            edit_mode: RwSignal::new(false),
            notes: RwSignal::new(vec![]),
            notes_loading: RwSignal::new(false),
            notes_request_id: RwSignal::new(0),
            copied_note: RwSignal::new(load_copied_note()),
            copied_day: RwSignal::new(load_copied_day()),
            editing_note: RwSignal::new(None),
            notification: RwSignal::new(None),
            notification_seq: RwSignal::new(0),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api_client.get_untracked()
    }

    pub fn step_day(&self, direction: i32) {
        self.current_day.update(|d| *d = d.step_school_day(direction));
    }

    pub fn set_theme(&self, theme: Theme) {
        save_theme(theme);
        self.theme.set(theme);
    }

    pub fn set_copied_note(&self, note: Option<NewNote>) {
        save_copied_note(note.as_ref());
        self.copied_note.set(note);
    }

    pub fn set_copied_day(&self, notes: Option<Vec<NewNote>>) {
        let notes = notes.filter(|n| !n.is_empty());
        save_copied_day(notes.as_deref());
        self.copied_day.set(notes);
    }

    pub fn note(&self, id: i64) -> Option<Note> {
        self.notes
            .with_untracked(|notes| notes.iter().find(|n| n.id == id).cloned())
    }

    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let id = self.notification_seq.get_untracked() + 1;
        self.notification_seq.set(id);
        self.notification.set(Some(Notification {
            id,
            kind,
            message: message.into(),
        }));

        let Some(win) = web_sys::window() else {
            return;
        };
        let notification = self.notification;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            if notification.with_untracked(|current| should_hide(current.as_ref(), id)) {
                notification.set(None);
            }
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            NOTIFICATION_MS,
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Info, message);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(id: u64) -> Notification {
        Notification {
            id,
            kind: NotificationKind::Info,
            message: "Hallo".to_string(),
        }
    }

    #[test]
    fn test_old_timer_keeps_newer_notification() {
        let newer = notification(2);
        assert!(!should_hide(Some(&newer), 1));
        assert!(should_hide(Some(&newer), 2));
        assert!(!should_hide(None, 2));
    }
}
