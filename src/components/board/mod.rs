mod actions;
mod context_menu;
mod fab;
mod header;
mod note_card;
mod notification;
mod pinboard;
mod quick_actions;
mod scheduler;
mod side_editor;
mod theme_selector;
mod time_lock;
mod weather;

pub(crate) use actions::BoardActions;
pub(crate) use fab::Fab;
pub(crate) use header::Header;
pub(crate) use notification::NotificationToast;
pub(crate) use pinboard::PinboardArea;
pub(crate) use quick_actions::QuickActions;
pub(crate) use side_editor::SideEditor;

use crate::layout::{Point, Viewport};
use leptos::html;
use leptos::prelude::*;

/// The scrollable canvas element, shared so toolbars can read and move the view.
#[derive(Clone, Copy)]
pub(crate) struct BoardRef(pub NodeRef<html::Main>);

impl BoardRef {
    pub fn viewport(&self) -> Viewport {
        self.0
            .get_untracked()
            .map(|el| Viewport::from_element(&el))
            .unwrap_or_default()
    }

    pub fn scroll_to(&self, target: Point) {
        let Some(el) = self.0.get_untracked() else {
            return;
        };
        let opts = web_sys::ScrollToOptions::new();
        opts.set_left(target.x);
        opts.set_top(target.y);
        opts.set_behavior(web_sys::ScrollBehavior::Smooth);
        el.scroll_to_with_scroll_to_options(&opts);
    }
}

pub(crate) fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}
