use super::BoardActions;
use crate::components::ui::{
    Button, ButtonVariant, Dialog, DialogBody, DialogDescription, DialogFooter, Input, Label,
};
use crate::models::{ClockTime, LockState, NoteUpdate};
use crate::schedule::open_time_value;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Close a note until a time of day.
#[component]
pub(crate) fn TimeLockDialog(open: RwSignal<bool>, note_id: i64) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let sync = expect_context::<BoardActions>().sync();
    let time = RwSignal::new(String::new());

    // Start from the note's pending unlock time, if it has one.
    Effect::new(move |_| {
        if open.get() {
            let current = app_state
                .note(note_id)
                .map(|n| open_time_value(n.fields.closed_until))
                .unwrap_or_default();
            time.set(current);
        }
    });

    let on_save = move |_: web_sys::MouseEvent| {
        let Some(until) = ClockTime::parse(&time.get_untracked()) else {
            app_state.error("Bitte eine gültige Uhrzeit eingeben.");
            return;
        };
        open.set(false);
        spawn_local(async move {
            if sync
                .update(note_id, NoteUpdate::lock(LockState::Until(until)))
                .await
            {
                app_state.success(format!("Zettel gesperrt bis {until} Uhr."));
            }
        });
    };

    view! {
        <Dialog open=open title="Zeitsperre" class="sm:max-w-[360px]">
            <DialogBody>
                <DialogDescription>
                    "Der Zettel bleibt bis zur gewählten Uhrzeit geschlossen."
                </DialogDescription>
                <Label>"Öffnen um"</Label>
                <Input r#type="time" bind_value=time autofocus=true />
            </DialogBody>
            <DialogFooter>
                <Button variant=ButtonVariant::Outline on:click=move |_| open.set(false)>
                    "Abbrechen"
                </Button>
                <Button on:click=on_save>"Sperren"</Button>
            </DialogFooter>
        </Dialog>
    }
}
