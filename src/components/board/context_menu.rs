use super::BoardActions;
use crate::layout::Point;
use crate::models::{LockState, NOTE_COLORS};
use crate::state::AppContext;
use leptos::prelude::*;

const CONTEXT_COLORS: usize = 12;

const ITEM_CLASS: &str =
    "flex w-full items-center gap-3 rounded-md px-3 py-2 text-left text-sm hover:bg-slate-100";

/// Right-click menu of a note, shown at `at` (client coordinates) while set.
#[component]
pub(crate) fn ContextMenu(at: RwSignal<Option<Point>>, note_id: i64) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let actions = expect_context::<BoardActions>();
    let show_palette = RwSignal::new(false);

    let close = move || {
        show_palette.set(false);
        at.set(None);
    };

    let toggle_lock = move |_: web_sys::MouseEvent| {
        if let Some(note) = app_state.note(note_id) {
            let next = if note.fields.closed_until == LockState::Locked {
                LockState::Open
            } else {
                LockState::Locked
            };
            actions.set_lock(note_id, next);
        }
        close();
    };

    let delete = move |_: web_sys::MouseEvent| {
        close();
        if let Some(note) = app_state.note(note_id) {
            actions.delete_note(note);
        }
    };

    view! {
        {move || {
            at.get()
                .map(|p| {
                    let style = format!("left: {}px; top: {}px;", p.x, p.y);
                    view! {
                        <div
                            class="fixed inset-0 z-[999]"
                            on:click=move |_| close()
                            on:contextmenu=move |ev| {
                                ev.prevent_default();
                                close();
                            }
                        />
                        <div
                            class="fixed z-[1000] rounded-xl bg-white p-1.5 text-slate-800 shadow-2xl"
                            style=style
                        >
                            <Show
                                when=move || show_palette.get()
                                fallback=move || {
                                    view! {
                                        <div class="flex min-w-[160px] flex-col">
                                            <button
                                                type="button"
                                                class=ITEM_CLASS
                                                on:click=move |_| show_palette.set(true)
                                            >
                                                "🎨 Farbe ändern"
                                            </button>
                                            <button type="button" class=ITEM_CLASS on:click=toggle_lock>
                                                "🔒 Sperren / Entsperren"
                                            </button>
                                            <button
                                                type="button"
                                                class=format!("{ITEM_CLASS} text-red-600")
                                                on:click=delete
                                            >
                                                "🗑 Löschen"
                                            </button>
                                        </div>
                                    }
                                }
                            >
                                <div class="grid grid-cols-6 gap-2 p-1.5">
                                    {NOTE_COLORS[..CONTEXT_COLORS]
                                        .iter()
                                        .map(|&color| {
                                            view! {
                                                <button
                                                    type="button"
                                                    class="size-7 cursor-pointer rounded-md border-2 border-slate-200"
                                                    style=format!("background-color: {color};")
                                                    on:click=move |_| {
                                                        actions.set_color(note_id, color);
                                                        close();
                                                    }
                                                />
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </Show>
                        </div>
                    }
                })
        }}
    }
}
