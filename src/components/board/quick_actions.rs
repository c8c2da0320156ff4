use super::scheduler::SchedulerDialog;
use super::BoardActions;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Separator};
use crate::state::AppContext;
use leptos::prelude::*;

#[component]
fn QuickAction(
    #[prop(into)] title: String,
    #[prop(optional)] variant: ButtonVariant,
    on_click: impl Fn() + 'static,
    children: Children,
) -> impl IntoView {
    view! {
        <Button
            variant=variant
            size=ButtonSize::Icon
            class="size-10 text-base"
            attr:title=title
            on:click=move |_| on_click()
        >
            {children()}
        </Button>
    }
}

/// Vertical toolbar of board-wide actions, visible in edit mode.
#[component]
pub(crate) fn QuickActions() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let actions = expect_context::<BoardActions>();
    let scheduler_open = RwSignal::new(false);

    view! {
        <Show when=move || app_state.edit_mode.get() fallback=|| ()>
            <nav class="fixed left-4 top-1/2 z-[900] flex -translate-y-1/2 flex-col items-center gap-2 rounded-2xl bg-black/40 p-2 shadow-2xl backdrop-blur">
                <QuickAction
                    title="Bearbeitungsmodus verlassen"
                    variant=ButtonVariant::Active
                    on_click=move || actions.toggle_edit_mode()
                >
                    "✎"
                </QuickAction>
                <Separator class="w-8" />
                <QuickAction
                    title="Alle Zettel öffnen"
                    variant=ButtonVariant::Success
                    on_click=move || actions.open_all()
                >
                    "🔓"
                </QuickAction>
                <QuickAction
                    title="Alle Zettel sperren"
                    variant=ButtonVariant::Warning
                    on_click=move || actions.lock_all()
                >
                    "🔒"
                </QuickAction>
                <QuickAction
                    title="Automatisch anordnen"
                    variant=ButtonVariant::Info
                    on_click=move || actions.arrange()
                >
                    "✨"
                </QuickAction>
                <Separator class="w-8" />
                <QuickAction
                    title="Tag kopieren"
                    variant=ButtonVariant::Outline
                    on_click=move || actions.copy_day()
                >
                    "⧉"
                </QuickAction>
                <QuickAction
                    title="Tag einfügen"
                    variant=ButtonVariant::Outline
                    on_click=move || actions.paste_day()
                >
                    "📋"
                </QuickAction>
                <Separator class="w-8" />
                <QuickAction
                    title="Alle Zettel anzeigen"
                    variant=ButtonVariant::Outline
                    on_click=move || actions.zoom_fit()
                >
                    "🔍"
                </QuickAction>
                <QuickAction
                    title="Ansicht zentrieren"
                    variant=ButtonVariant::Outline
                    on_click=move || actions.center_view()
                >
                    "🎯"
                </QuickAction>
                <QuickAction
                    title="Zeitplan"
                    variant=ButtonVariant::Outline
                    on_click=move || scheduler_open.set(true)
                >
                    "🕒"
                </QuickAction>
                <Separator class="w-8" />
                <QuickAction
                    title="Tag leeren"
                    variant=ButtonVariant::Destructive
                    on_click=move || actions.clear_day()
                >
                    "🗑"
                </QuickAction>
            </nav>
        </Show>
        <SchedulerDialog open=scheduler_open />
    }
}
