use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::models::Theme;
use crate::state::AppContext;
use leptos::prelude::*;
use strum::IntoEnumIterator;

#[component]
pub(crate) fn ThemeSelector() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let open = RwSignal::new(false);

    view! {
        <div class="relative">
            <Button
                variant=ButtonVariant::Header
                size=ButtonSize::Icon
                attr:title="Design wählen"
                on:click=move |_| open.update(|o| *o = !*o)
            >
                "🎨"
            </Button>
            <Show when=move || open.get() fallback=|| ()>
                <div class="absolute right-0 top-full z-[1100] mt-2 flex min-w-[180px] flex-col gap-1 rounded-xl bg-slate-50/95 p-2 text-slate-800 shadow-2xl">
                    {Theme::iter()
                        .map(|theme| {
                            let is_active = move || app_state.theme.get() == theme;
                            view! {
                                <button
                                    type="button"
                                    class="rounded-lg px-3 py-2 text-left text-sm hover:bg-slate-200"
                                    class:font-bold=is_active
                                    class:bg-slate-200=is_active
                                    on:click=move |_| {
                                        app_state.set_theme(theme);
                                        open.set(false);
                                    }
                                >
                                    {theme.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}
