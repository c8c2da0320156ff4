use super::BoardActions;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Dialog, DialogDescription};
use crate::models::{ClockTime, LockState, Note, NoteUpdate};
use crate::schedule::open_time_value;
use crate::state::AppContext;
use crate::util::{strip_html, title_sort_key};
use leptos::prelude::*;
use leptos::task::spawn_local;

const TIME_INPUT_CLASS: &str =
    "h-8 rounded-md border border-slate-300 bg-white px-2 text-sm text-slate-800 outline-none focus-visible:ring-2 focus-visible:ring-blue-400/40";

fn sorted_by_title(notes: &[Note]) -> Vec<Note> {
    let mut sorted = notes.to_vec();
    sorted.sort_by_cached_key(|n| title_sort_key(&n.fields.name));
    sorted
}

/// Per-note open / close times and permanent locks for the current day.
#[component]
pub(crate) fn SchedulerDialog(open: RwSignal<bool>) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let sync = expect_context::<BoardActions>().sync();

    let save = move |id: i64, update: NoteUpdate| {
        spawn_local(async move {
            sync.update(id, update).await;
        });
    };

    let rows = move || {
        let notes = app_state.notes.with(|n| sorted_by_title(n));
        if notes.is_empty() {
            return view! {
                <p class="py-6 text-center text-sm text-slate-500">
                    "Keine Zettel für diesen Tag vorhanden."
                </p>
            }
            .into_any();
        }

        notes
            .into_iter()
            .map(|note| {
                let id = note.id;
                let lock = note.fields.closed_until;
                let is_locked = lock == LockState::Locked;
                let title = strip_html(&note.fields.name);
                let tooltip = title.clone();
                let close_value = note
                    .fields
                    .close_at
                    .map(|t| t.to_string())
                    .unwrap_or_default();
                let (lock_variant, lock_title, lock_glyph) = if is_locked {
                    (ButtonVariant::Destructive, "Zettel entsperren", "🔒")
                } else {
                    (ButtonVariant::Outline, "Dauerhaft sperren", "🔓")
                };

                view! {
                    <div class="flex items-center gap-3 border-b border-black/10 py-2 last:border-b-0">
                        <span class="min-w-0 flex-1 truncate font-semibold" title=tooltip>
                            {title}
                        </span>
                        <label class="flex items-center gap-1 text-xs" title="Öffnet um">
                            "🚪"
                            <input
                                type="time"
                                class=TIME_INPUT_CLASS
                                prop:value=open_time_value(lock)
                                on:change=move |ev| {
                                    save(
                                        id,
                                        NoteUpdate::lock(
                                            LockState::from_open_time_input(&event_target_value(&ev)),
                                        ),
                                    )
                                }
                            />
                        </label>
                        <label class="flex items-center gap-1 text-xs" title="Schließt um">
                            "🔚"
                            <input
                                type="time"
                                class=TIME_INPUT_CLASS
                                prop:value=close_value
                                on:change=move |ev| {
                                    save(
                                        id,
                                        NoteUpdate::close_at(ClockTime::parse(&event_target_value(&ev))),
                                    )
                                }
                            />
                        </label>
                        <Button
                            variant=lock_variant
                            size=ButtonSize::Icon
                            class="size-8"
                            attr:title=lock_title
                            on:click=move |_| {
                                let next = if is_locked { LockState::Open } else { LockState::Locked };
                                save(id, NoteUpdate::lock(next))
                            }
                        >
                            {lock_glyph}
                        </Button>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <Dialog open=open title="Zeitplan" class="sm:max-w-[640px]">
            <DialogDescription>
                "Öffnungs- und Schließzeiten der Zettel dieses Tages."
            </DialogDescription>
            <div class="-mx-2 overflow-y-auto px-2">{rows}</div>
        </Dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteFields, Weekday};

    fn note(id: i64, name: &str) -> Note {
        Note {
            id,
            fields: NoteFields {
                name: name.to_string(),
                ..NoteFields::blank(Weekday::Montag, 0.0, 0.0, 240.0, 150.0, false)
            },
        }
    }

    #[test]
    fn test_sorted_by_plain_title() {
        let notes = vec![note(1, "<b>Zebra</b>"), note(2, "affe"), note(3, "Mathe")];
        let ids: Vec<i64> = sorted_by_title(&notes).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sorted_by_title_folds_umlauts() {
        let notes = vec![note(1, "Zeichnen"), note(2, "Äpfel"), note(3, "Mathe")];
        let ids: Vec<i64> = sorted_by_title(&notes).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
