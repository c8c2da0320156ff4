use crate::api::weather::{fetch_current, WeatherSummary};
use crate::components::ui::Spinner;
use crate::state::AppContext;
use crate::util::{now_ms, today_iso_local};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::set_interval_with_handle;
use std::time::Duration;

const REFRESH: Duration = Duration::from_secs(15 * 60);

#[derive(Clone, Copy, Debug, PartialEq)]
enum WeatherView {
    Loading,
    Ready(WeatherSummary),
    Failed,
}

#[component]
pub(crate) fn WeatherWidget() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let weather = RwSignal::new(WeatherView::Loading);

    let refresh = move || {
        let config = app_state.api().config;
        spawn_local(async move {
            match fetch_current(&config, &today_iso_local(), now_ms()).await {
                Ok(summary) => weather.set(WeatherView::Ready(summary)),
                Err(e) => {
                    tracing::warn!(error = %e, "weather unavailable");
                    // Keep the last reading on a failed refresh.
                    if !matches!(weather.get_untracked(), WeatherView::Ready(_)) {
                        weather.set(WeatherView::Failed);
                    }
                }
            }
        });
    };

    refresh();
    if let Ok(handle) = set_interval_with_handle(refresh, REFRESH) {
        on_cleanup(move || handle.clear());
    }

    view! {
        <div class="flex items-center gap-2 rounded-xl bg-white/15 px-3 py-1 text-sm font-semibold">
            {move || match weather.get() {
                WeatherView::Loading => view! { <Spinner class="size-4" /> }.into_any(),
                WeatherView::Failed => {
                    view! { <span title="Wetter nicht verfügbar">"⚠"</span> }.into_any()
                }
                WeatherView::Ready(w) => {
                    view! {
                        <span class="text-lg">{w.icon.glyph()}</span>
                        <span>{format!("{}°C", w.temperature)}</span>
                        <span class="opacity-80">{format!("💧 {}%", w.precipitation)}</span>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
