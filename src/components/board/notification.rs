use crate::components::ui::{Alert, AlertDescription};
use crate::state::{AppContext, NotificationKind};
use leptos::prelude::*;
use tw_merge::tw_merge;

fn kind_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "bg-emerald-500",
        NotificationKind::Error => "bg-red-500",
        NotificationKind::Info => "bg-sky-500",
    }
}

fn kind_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✓",
        NotificationKind::Error => "✕",
        NotificationKind::Info => "ℹ",
    }
}

#[component]
pub(crate) fn NotificationToast() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    view! {
        <div class="pointer-events-none fixed left-1/2 top-20 z-[2000] -translate-x-1/2">
            {move || {
                app_state
                    .notification
                    .get()
                    .map(|n| {
                        view! {
                            <Alert class=tw_merge!("animate-in fade-in", kind_class(n.kind))>
                                <span class="text-lg">{kind_icon(n.kind)}</span>
                                <AlertDescription>{n.message}</AlertDescription>
                            </Alert>
                        }
                    })
            }}
        </div>
    }
}
