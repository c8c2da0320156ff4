use super::note_card::NoteCard;
use super::{BoardActions, BoardRef};
use crate::components::ui::SpinnerCircle;
use crate::layout::BOARD_SIZE;
use crate::models::ClockTime;
use crate::realtime::RealtimeSubscription;
use crate::schedule;
use crate::state::AppContext;
use crate::util::{local_clock_time, today_local};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::set_interval_with_handle;
use std::time::Duration;

const TICK: Duration = Duration::from_secs(30);

/// Wall-clock time of the board, advanced by the auto-close ticker.
#[derive(Clone, Copy)]
pub(crate) struct BoardClock(pub RwSignal<ClockTime>);

#[component]
pub(crate) fn PinboardArea() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let board = expect_context::<BoardRef>();
    let sync = expect_context::<BoardActions>().sync();

    let clock = RwSignal::new(local_clock_time());
    provide_context(BoardClock(clock));

    Effect::new(move |_| {
        let day = app_state.current_day.get();
        spawn_local(async move {
            sync.load_day(day).await;
        });
    });

    // One subscription for the board's lifetime; dropping it closes the socket.
    let subscription = RealtimeSubscription::connect(&app_state.api().config, move |change| {
        sync.apply_remote(change)
    });
    let _subscription = StoredValue::new_local(subscription);

    let last_tick = StoredValue::new(clock.get_untracked());
    let tick = move || {
        let now = local_clock_time();
        let since = last_tick.get_value();
        if now == since {
            return;
        }
        last_tick.set_value(now);
        clock.set(now);

        let today = today_local();
        let displayed = app_state.current_day.get_untracked();
        spawn_local(async move {
            // Only today's notes close; fetch them when another day is shown.
            let patches = if displayed == today {
                app_state
                    .notes
                    .with_untracked(|n| schedule::due_for_auto_close(n, today, since, now))
            } else {
                match app_state.api().load_notes(today).await {
                    Ok(notes) => schedule::due_for_auto_close(&notes, today, since, now),
                    Err(e) => {
                        tracing::warn!(%today, error = %e, "auto-close check failed");
                        return;
                    }
                }
            };
            if patches.is_empty() {
                return;
            }
            let count = patches.len();
            tracing::info!(count, at = %now, "auto-closing notes");
            if sync.update_many(patches).await {
                app_state.info(format!("{count} Zettel automatisch geschlossen."));
            }
        });
    };
    if let Ok(handle) = set_interval_with_handle(tick, TICK) {
        on_cleanup(move || handle.clear());
    }

    let note_ids = move || app_state.notes.with(|n| n.iter().map(|n| n.id).collect::<Vec<_>>());

    view! {
        <main
            node_ref=board.0
            class="relative flex-1 overflow-auto"
            style="background: var(--board-bg);"
        >
            <div
                class="relative"
                style=format!("width: {BOARD_SIZE}px; height: {BOARD_SIZE}px;")
            >
                <For each=note_ids key=|id| *id children=move |id| view! { <NoteCard id=id /> } />
            </div>
            <Show when=move || app_state.notes_loading.get() fallback=|| ()>
                <div class="pointer-events-none fixed inset-0 z-[800] flex items-center justify-center">
                    <SpinnerCircle class="size-12 text-white/80" />
                </div>
            </Show>
        </main>
    }
}
