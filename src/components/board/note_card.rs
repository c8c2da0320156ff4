use super::context_menu::ContextMenu;
use super::pinboard::BoardClock;
use super::time_lock::TimeLockDialog;
use super::{confirm, BoardActions};
use crate::layout::{drag_target, resize_target, Point, Rect, Size};
use crate::models::{Note, NoteUpdate, NOTE_COLORS};
use crate::schedule::Status;
use crate::state::AppContext;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use wasm_bindgen::JsCast;

/// Elements inside a card that never start a drag.
const NO_DRAG: &str = "button, input, textarea, select, label, [data-no-drag]";

const MENU_ITEM_CLASS: &str =
    "flex w-full items-center gap-3 rounded-md px-3 py-2 text-left text-sm text-slate-700 hover:bg-slate-100";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Move { start: Point },
    Resize { start: Point },
}

impl Gesture {
    fn start(self) -> Point {
        match self {
            Gesture::Move { start } | Gesture::Resize { start } => start,
        }
    }

    /// Where `base` is while the pointer sits at `now`.
    fn apply(self, base: Rect, now: Point) -> Rect {
        let start = self.start();
        match self {
            Gesture::Move { .. } => Rect::at(
                drag_target(Point::new(base.x, base.y), start, now),
                Size::new(base.width, base.height),
            ),
            Gesture::Resize { .. } => Rect::at(
                Point::new(base.x, base.y),
                resize_target(
                    Size::new(base.width, base.height),
                    Point::new(now.x - start.x, now.y - start.y),
                ),
            ),
        }
    }

    /// Update to persist once the pointer is released, if anything changed.
    fn commit(self, base: Rect, end: Rect) -> Option<NoteUpdate> {
        match self {
            Gesture::Move { .. } if (end.x, end.y) != (base.x, base.y) => {
                Some(NoteUpdate::position(end.x, end.y))
            }
            Gesture::Resize { .. } if (end.width, end.height) != (base.width, base.height) => {
                Some(NoteUpdate::size(end.width, end.height))
            }
            _ => None,
        }
    }
}

fn client_point(ev: &web_sys::MouseEvent) -> Point {
    Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

fn starts_on_control(ev: &web_sys::PointerEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(NO_DRAG).ok().flatten())
        .is_some()
}

/// Whether an event target lies inside `root`.
fn is_within(root: &web_sys::Node, target: Option<web_sys::EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|node| root.contains(Some(&node)))
}

fn badge_class(status: Status) -> &'static str {
    match status {
        Status::Open => "bg-emerald-500",
        Status::Locked => "bg-red-500",
        Status::OpensAt(_) => "bg-amber-500",
    }
}

fn overlay_text(status: Status) -> String {
    match status {
        Status::OpensAt(_) => format!("⏳ {}", status.label()),
        _ => "🔒 Geschlossen".to_string(),
    }
}

#[component]
pub(crate) fn NoteCard(id: i64) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let actions = expect_context::<BoardActions>();
    let sync = actions.sync();
    let clock = expect_context::<BoardClock>().0;
    let edit_mode = app_state.edit_mode;

    let note = Memo::new(move |_| {
        app_state
            .notes
            .with(|notes| notes.iter().find(|n| n.id == id).cloned())
    });

    let gesture = RwSignal::new(None::<Gesture>);
    let preview = RwSignal::new(None::<Rect>);
    let menu_open = RwSignal::new(false);
    let palette_open = RwSignal::new(false);
    let context_at = RwSignal::new(None::<Point>);
    let time_lock_open = RwSignal::new(false);
    let uploading = RwSignal::new(false);
    let file_input = NodeRef::<html::Input>::new();
    let menu_root = NodeRef::<html::Div>::new();

    let base_rect = move || note.with_untracked(|n| n.as_ref().map(Rect::of));
    let status = move || {
        note.with(|n| {
            n.as_ref()
                .map(|n| n.fields.closed_until.status_at(clock.get()))
                .unwrap_or(Status::Open)
        })
    };

    let begin = move |ev: web_sys::PointerEvent, g: Gesture| {
        if ev.button() != 0 || !edit_mode.get_untracked() {
            return;
        }
        ev.prevent_default();
        menu_open.set(false);
        gesture.set(Some(g));
        preview.set(base_rect());
    };

    let on_move = window_event_listener(leptos::ev::pointermove, move |ev| {
        let (Some(g), Some(base)) = (gesture.get_untracked(), base_rect()) else {
            return;
        };
        preview.set(Some(g.apply(base, client_point(&ev))));
    });

    let on_up = window_event_listener(leptos::ev::pointerup, move |ev| {
        let Some(g) = gesture.get_untracked() else {
            return;
        };
        gesture.set(None);
        let Some(base) = base_rect() else {
            preview.set(None);
            return;
        };
        let end = g.apply(base, client_point(&ev));
        match g.commit(base, end) {
            Some(update) => spawn_local(async move {
                sync.update(id, update).await;
                preview.set(None);
            }),
            None => preview.set(None),
        }
    });

    let on_outside = window_event_listener(leptos::ev::mousedown, move |ev| {
        if !menu_open.get_untracked() && !palette_open.get_untracked() {
            return;
        }
        let inside = menu_root
            .get_untracked()
            .is_some_and(|root| is_within(&root, ev.target()));
        if !inside {
            menu_open.set(false);
            palette_open.set(false);
        }
    });

    on_cleanup(move || {
        on_move.remove();
        on_up.remove();
        on_outside.remove();
    });

    let rect = move || preview.get().or_else(|| note.with(|n| n.as_ref().map(Rect::of)));

    let card_style = move || {
        let Some(r) = rect() else {
            return String::new();
        };
        let color = note.with(|n| {
            n.as_ref()
                .map(|n| n.fields.color().to_string())
                .unwrap_or_default()
        });
        format!(
            "left: {}px; top: {}px; width: {}px; height: {}px; background-color: {color};",
            r.x, r.y, r.width, r.height
        )
    };

    let draggable = move || {
        edit_mode.get() && !note.with(|n| n.as_ref().is_some_and(|n| n.fields.is_position_locked))
    };

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !draggable() || starts_on_control(&ev) {
            return;
        }
        let start = client_point(&ev);
        begin(ev, Gesture::Move { start });
    };

    let on_contextmenu = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        menu_open.set(false);
        context_at.set(Some(client_point(&ev)));
    };

    let on_file = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");
        let Some(current) = note.get_untracked() else {
            return;
        };

        uploading.set(true);
        spawn_local(async move {
            match sync.set_image(&current, file).await {
                Ok(()) => app_state.success("Bild hochgeladen!"),
                Err(message) => app_state.error(message),
            }
            uploading.set(false);
        });
    };

    let pick_image = move |_: web_sys::MouseEvent| {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let remove_image = move |_: web_sys::MouseEvent| {
        let Some(current) = note.get_untracked() else {
            return;
        };
        if !confirm("Bild wirklich entfernen?") {
            return;
        }
        spawn_local(async move {
            if sync.remove_image(&current).await {
                app_state.info("Bild entfernt.");
            }
        });
    };

    let toggle_lock = move || {
        if let Some(current) = note.get_untracked() {
            let next = current.fields.closed_until.toggled_at(clock.get_untracked());
            actions.set_lock(id, next);
        }
    };

    let toggle_pin = move |_: web_sys::MouseEvent| {
        if !edit_mode.get_untracked() {
            return;
        }
        let pinned = note.with_untracked(|n| n.as_ref().is_some_and(|n| n.fields.is_position_locked));
        spawn_local(async move {
            sync.update(id, NoteUpdate::position_lock(!pinned)).await;
        });
    };

    let menu = move || {
        let closed = status().is_closed();
        view! {
            <div
                class="absolute right-2 top-9 z-30 min-w-[180px] rounded-xl bg-white p-1.5 shadow-2xl"
                data-no-drag
            >
                <button
                    type="button"
                    class=MENU_ITEM_CLASS
                    on:click=move |_| {
                        menu_open.set(false);
                        app_state.editing_note.set(Some(id));
                    }
                >
                    "✏️ Bearbeiten"
                </button>
                <button
                    type="button"
                    class=MENU_ITEM_CLASS
                    on:click=move |_| {
                        menu_open.set(false);
                        if let Some(current) = note.get_untracked() {
                            actions.copy_note(&current);
                        }
                    }
                >
                    "⧉ Kopieren"
                </button>
                <button
                    type="button"
                    class=MENU_ITEM_CLASS
                    on:click=move |_| {
                        menu_open.set(false);
                        palette_open.set(true);
                    }
                >
                    "🎨 Farbe ändern"
                </button>
                <button
                    type="button"
                    class=MENU_ITEM_CLASS
                    on:click=move |_| {
                        menu_open.set(false);
                        toggle_lock();
                    }
                >
                    {if closed { "🔓 Zettel öffnen" } else { "🔒 Zettel sperren" }}
                </button>
                <Show when=move || !closed fallback=|| ()>
                    <button
                        type="button"
                        class=MENU_ITEM_CLASS
                        on:click=move |_| {
                            menu_open.set(false);
                            time_lock_open.set(true);
                        }
                    >
                        "⏰ Zeitsperre setzen"
                    </button>
                </Show>
                <button
                    type="button"
                    class=format!("{MENU_ITEM_CLASS} text-red-600")
                    on:click=move |_| {
                        menu_open.set(false);
                        if let Some(current) = note.get_untracked() {
                            actions.delete_note(current);
                        }
                    }
                >
                    "🗑 Löschen"
                </button>
            </div>
        }
    };

    let palette = move || {
        view! {
            <div
                class="absolute right-2 top-9 z-30 grid grid-cols-6 gap-2 rounded-xl bg-white p-3 shadow-2xl"
                data-no-drag
            >
                {NOTE_COLORS
                    .iter()
                    .map(|&color| {
                        view! {
                            <button
                                type="button"
                                class="size-6 cursor-pointer rounded-md border-2 border-slate-200 hover:scale-110"
                                style=format!("background-color: {color};")
                                on:click=move |_| {
                                    palette_open.set(false);
                                    actions.set_color(id, color);
                                }
                            />
                        }
                    })
                    .collect_view()}
            </div>
        }
    };

    let image_area = move |n: &Note| {
        let url = n.fields.image.clone();
        let has_url = url.is_some();
        let can_edit = move || edit_mode.get() && !status().is_closed();
        view! {
            <div class="relative mt-2 flex min-h-0 flex-1 items-center justify-center overflow-hidden rounded-lg bg-black/5">
                {match url {
                    Some(src) => {
                        view! { <img src=src alt="" class="size-full object-contain" draggable="false" /> }
                            .into_any()
                    }
                    None => {
                        view! { <span class="text-xs text-slate-500">"Kein Bild"</span> }.into_any()
                    }
                }}
                <Show when=move || uploading.get() fallback=|| ()>
                    <div class="absolute inset-0 flex items-center justify-center bg-white/70 text-xs">
                        "Lädt hoch…"
                    </div>
                </Show>
                <Show when=can_edit fallback=|| ()>
                    <div class="absolute bottom-1 right-1 flex gap-1" data-no-drag>
                        <button
                            type="button"
                            class="rounded-md bg-white/90 px-2 py-1 text-xs shadow hover:bg-white"
                            on:click=pick_image
                        >
                            {if has_url { "Bild ändern" } else { "Bild wählen" }}
                        </button>
                        <Show when=move || has_url fallback=|| ()>
                            <button
                                type="button"
                                class="rounded-md bg-red-500/90 px-2 py-1 text-xs text-white shadow hover:bg-red-500"
                                on:click=remove_image
                            >
                                "Entfernen"
                            </button>
                        </Show>
                    </div>
                </Show>
            </div>
        }
    };

    let content = move || {
        note.get().map(|n| {
            let f = &n.fields;
            let title_style = format!(
                "font-size: {}px; font-family: {}; text-align: {};",
                f.title_size(),
                f.title_font(),
                f.name_align.as_css()
            );
            let body_style = format!(
                "font-size: {}px; font-family: {}; text-align: {};",
                f.body_size(),
                f.body_font(),
                f.activity_align.as_css()
            );
            let name = f.name.clone();
            let activity = f.activity.clone();
            let image = f.has_image.then(|| image_area(&n));
            view! {
                <div class="break-words pr-16 font-bold leading-tight" style=title_style inner_html=name />
                <div
                    class="mt-1 min-h-0 overflow-hidden whitespace-pre-wrap break-words"
                    style=body_style
                    inner_html=activity
                />
                {image}
            }
        })
    };

    view! {
        <div
            class="absolute flex select-none flex-col rounded-lg p-3 pt-9 shadow-[0_4px_12px_rgba(0,0,0,0.35)]"
            class:cursor-move=draggable
            class:z-20=move || gesture.get().is_some()
            class:ring-2=move || app_state.editing_note.get() == Some(id)
            style=card_style
            on:pointerdown=on_pointerdown
            on:contextmenu=on_contextmenu
        >
            <button
                type="button"
                class="absolute left-2 top-2 z-10 text-base leading-none transition-transform"
                class:cursor-pointer=move || edit_mode.get()
                class:rotate-45=move || note.with(|n| n.as_ref().is_some_and(|n| !n.fields.is_position_locked))
                title=move || {
                    if edit_mode.get() { "Position sperren / lösen" } else { "" }
                }
                on:click=toggle_pin
            >
                "📌"
            </button>

            <button
                type="button"
                class=move || {
                    format!(
                        "absolute right-2 top-2 z-10 flex items-center gap-1 rounded-full px-2 py-0.5 text-[11px] font-bold text-white shadow {}",
                        badge_class(status()),
                    )
                }
                title=move || {
                    if status().is_closed() { "Zettel öffnen" } else { "Zettel schließen" }
                }
                on:click=move |_| toggle_lock()
            >
                {move || if status().is_closed() { "🔒 Gesperrt" } else { "🔓 Offen" }}
            </button>


            {content}

            <Show when=move || status().is_closed() fallback=|| ()>
                <div class="pointer-events-none absolute left-1/2 top-1/2 z-20 min-w-[75%] -translate-x-1/2 -translate-y-1/2 -rotate-[8deg] rounded-lg bg-white/85 px-3 py-2 text-center text-sm font-bold uppercase tracking-wide text-red-600 shadow-lg backdrop-blur">
                    {move || overlay_text(status())}
                </div>
            </Show>

            <div node_ref=menu_root class="contents" data-no-drag>
                <button
                    type="button"
                    class="absolute right-20 top-2 z-10 rounded-full px-2 text-slate-600 hover:bg-black/10"
                    title="Menü"
                    on:click=move |_| {
                        palette_open.set(false);
                        menu_open.update(|o| *o = !*o);
                    }
                >
                    "⋮"
                </button>
                <Show when=move || menu_open.get() fallback=|| ()>
                    {menu}
                </Show>
                <Show when=move || palette_open.get() fallback=|| ()>
                    {palette}
                </Show>
            </div>

            <Show when=move || edit_mode.get() fallback=|| ()>
                <div
                    class="absolute -bottom-2 -right-2 z-10 size-5 cursor-se-resize rounded-full border-2 border-white bg-blue-500/80 shadow"
                    data-no-drag
                    on:pointerdown=move |ev: web_sys::PointerEvent| {
                        ev.stop_propagation();
                        let start = client_point(&ev);
                        begin(ev, Gesture::Resize { start });
                    }
                />
            </Show>

            <input
                type="file"
                accept="image/*"
                class="hidden"
                node_ref=file_input
                on:change=on_file
            />
        </div>

        <ContextMenu at=context_at note_id=id />
        <TimeLockDialog open=time_lock_open note_id=id />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Rect {
        Rect::new(100.0, 100.0, 240.0, 150.0)
    }

    #[test]
    fn test_move_follows_pointer_and_stays_on_board() {
        let g = Gesture::Move {
            start: Point::new(500.0, 500.0),
        };
        let r = g.apply(base(), Point::new(530.0, 490.0));
        assert_eq!((r.x, r.y, r.width, r.height), (130.0, 90.0, 240.0, 150.0));

        let r = g.apply(base(), Point::new(0.0, 0.0));
        assert_eq!((r.x, r.y), (0.0, 0.0));
    }

    #[test]
    fn test_resize_keeps_origin_and_minimum() {
        let g = Gesture::Resize {
            start: Point::new(340.0, 250.0),
        };
        let r = g.apply(base(), Point::new(400.0, 300.0));
        assert_eq!((r.x, r.y, r.width, r.height), (100.0, 100.0, 300.0, 200.0));

        let r = g.apply(base(), Point::new(0.0, 0.0));
        assert_eq!((r.width, r.height), (120.0, 80.0));
    }

    #[test]
    fn test_commit_only_when_changed() {
        let g = Gesture::Move {
            start: Point::new(0.0, 0.0),
        };
        assert_eq!(g.commit(base(), base()), None);
        assert_eq!(
            g.commit(base(), Rect::new(10.0, 20.0, 240.0, 150.0)),
            Some(NoteUpdate::position(10.0, 20.0))
        );

        let g = Gesture::Resize {
            start: Point::new(0.0, 0.0),
        };
        assert_eq!(
            g.commit(base(), Rect::new(100.0, 100.0, 300.0, 150.0)),
            Some(NoteUpdate::size(300.0, 150.0))
        );
    }

    #[test]
    fn test_overlay_text() {
        assert_eq!(overlay_text(Status::Locked), "🔒 Geschlossen");
        let t = crate::models::ClockTime::new(9, 5).unwrap();
        assert_eq!(overlay_text(Status::OpensAt(t)), "⏳ Öffnet um 09:05");
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_menu_click_stays_inside() {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("document");
        let root = document.create_element("div").expect("div");
        let item = document.create_element("button").expect("button");
        root.append_child(&item).expect("append");
        let elsewhere = document.create_element("div").expect("div");

        assert!(is_within(&root, Some(item.into())));
        assert!(is_within(&root, Some(root.clone().into())));
        assert!(!is_within(&root, Some(elsewhere.into())));
        assert!(!is_within(&root, None));
    }
}
