use super::theme_selector::ThemeSelector;
use super::weather::WeatherWidget;
use super::BoardActions;
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use crate::util::local_clock_label;
use leptos::prelude::*;
use leptos_dom::helpers::set_interval_with_handle;
use std::time::Duration;

#[component]
fn Clock() -> impl IntoView {
    let now = RwSignal::new(local_clock_label());

    if let Ok(handle) =
        set_interval_with_handle(move || now.set(local_clock_label()), Duration::from_secs(1))
    {
        on_cleanup(move || handle.clear());
    }

    view! {
        <div class="font-mono text-base tabular-nums tracking-wider">{move || now.get()}</div>
    }
}

fn toggle_fullscreen() {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let result = if doc.fullscreen_element().is_none() {
        doc.document_element()
            .map(|el| el.request_fullscreen())
            .unwrap_or(Ok(()))
    } else {
        doc.exit_fullscreen();
        Ok(())
    };
    if let Err(e) = result {
        tracing::warn!(error = ?e, "fullscreen request rejected");
    }
}

#[component]
pub(crate) fn Header() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let actions = expect_context::<BoardActions>();
    let edit_mode = app_state.edit_mode;
    let has_copied_day = move || app_state.copied_day.with(|d| d.is_some());

    view! {
        <header
            class="relative z-10 shadow-[0_4px_10px_rgba(0,0,0,0.4)]"
            style="background: var(--header-bg); color: var(--header-text, white);"
        >
            <div class="flex h-[52px] items-center justify-between px-6 py-3">
                <div class="flex flex-1 items-center gap-3">
                    <WeatherWidget />
                    <Clock />
                </div>

                <div class="flex items-center gap-3 rounded-2xl bg-white/20 px-5 py-2">
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="size-7 text-inherit hover:bg-white/20"
                        attr:title="Vorheriger Tag"
                        on:click=move |_| app_state.step_day(-1)
                    >
                        "‹"
                    </Button>
                    <div class="min-w-[120px] text-center text-lg font-semibold">
                        {move || app_state.current_day.get().to_string()}
                    </div>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="size-7 text-inherit hover:bg-white/20"
                        attr:title="Nächster Tag"
                        on:click=move |_| app_state.step_day(1)
                    >
                        "›"
                    </Button>
                </div>

                <div class="flex flex-1 items-center justify-end gap-2">
                    <Button
                        variant=ButtonVariant::Header
                        size=ButtonSize::Icon
                        attr:title="Ganzen Tag kopieren"
                        on:click=move |_| actions.copy_day()
                    >
                        "⧉"
                    </Button>
                    <Show when=has_copied_day fallback=|| ()>
                        <Button
                            variant=ButtonVariant::Header
                            size=ButtonSize::Icon
                            attr:title="Kopierten Tag einfügen"
                            on:click=move |_| actions.paste_day()
                        >
                            "📋"
                        </Button>
                    </Show>
                    <Show when=move || edit_mode.get() fallback=|| ()>
                        <Button
                            variant=ButtonVariant::Header
                            size=ButtonSize::Icon
                            attr:title="Alle Zettel öffnen"
                            on:click=move |_| actions.open_all()
                        >
                            "🔓"
                        </Button>
                        <Button
                            variant=ButtonVariant::Header
                            size=ButtonSize::Icon
                            attr:title="Automatisch anordnen"
                            on:click=move |_| actions.arrange()
                        >
                            "✨"
                        </Button>
                    </Show>
                    <ThemeSelector />
                    <Button
                        variant=ButtonVariant::Header
                        size=ButtonSize::Icon
                        attr:title=move || {
                            if edit_mode.get() {
                                "Bearbeitungsmodus verlassen"
                            } else {
                                "Bearbeitungsmodus aktivieren"
                            }
                        }
                        on:click=move |_| actions.toggle_edit_mode()
                    >
                        {move || if edit_mode.get() { "👁" } else { "✏️" }}
                    </Button>
                    <Button
                        variant=ButtonVariant::Header
                        size=ButtonSize::Icon
                        attr:title="Vollbild"
                        on:click=move |_| toggle_fullscreen()
                    >
                        "⛶"
                    </Button>
                </div>
            </div>

            <Show when=move || edit_mode.get() fallback=|| ()>
                <div class="absolute left-1/2 top-full z-50 -translate-x-1/2 rounded-b-lg bg-red-500 px-3 py-1 text-sm font-bold text-white">
                    "✎ Bearbeitungsmodus"
                </div>
            </Show>
        </header>
    }
}
