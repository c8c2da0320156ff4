use super::BoardActions;
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use leptos::prelude::*;

const MENU_ITEM_CLASS: &str =
    "flex items-center gap-3 whitespace-nowrap rounded-lg px-4 py-2.5 text-sm font-medium text-slate-800 hover:bg-slate-100";

/// Floating add button with its small creation menu.
#[component]
pub(crate) fn Fab() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let actions = expect_context::<BoardActions>();
    let open = RwSignal::new(false);

    let run = move |f: fn(&BoardActions)| {
        open.set(false);
        f(&actions);
    };

    view! {
        <div class="fixed bottom-6 right-6 z-[900] flex flex-col items-end gap-3">
            <Show when=move || open.get() fallback=|| ()>
                <div class="flex flex-col gap-1 rounded-xl bg-white p-2 shadow-2xl">
                    <Show when=move || app_state.copied_note.with(|n| n.is_some()) fallback=|| ()>
                        <button
                            type="button"
                            class=MENU_ITEM_CLASS
                            on:click=move |_| run(|a| a.paste_note())
                        >
                            <span class="w-5 text-emerald-500">"📋"</span>
                            "Zettel einfügen"
                        </button>
                    </Show>
                    <button
                        type="button"
                        class=MENU_ITEM_CLASS
                        on:click=move |_| run(|a| a.add_note(false))
                    >
                        <span class="w-5 text-blue-500">"📝"</span>
                        "Text-Zettel"
                    </button>
                    <button
                        type="button"
                        class=MENU_ITEM_CLASS
                        on:click=move |_| run(|a| a.add_note(true))
                    >
                        <span class="w-5 text-blue-500">"🖼"</span>
                        "Bild-Zettel"
                    </button>
                </div>
            </Show>
            <Button
                variant=ButtonVariant::Default
                size=ButtonSize::Round
                attr:title="Neuer Zettel"
                attr:aria-expanded=move || open.get().to_string()
                on:click=move |_| open.update(|o| *o = !*o)
            >
                <span class="transition-transform" class:rotate-45=move || open.get()>
                    "+"
                </span>
            </Button>
        </div>
    }
}
