use icons::X;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_ui::clx;
use tw_merge::*;

use crate::components::hooks::use_random::use_random_id_for;

mod components {
    use super::*;
    clx! {DialogBody, div, "flex flex-col gap-4"}
    clx! {DialogDescription, p, "text-slate-500 text-sm"}
    clx! {DialogFooter, footer, "flex flex-col-reverse gap-2 sm:flex-row sm:justify-end"}
}

pub use components::*;

/// Modal driven by an `open` signal. Clicking the backdrop, the close
/// button or pressing Escape sets it to `false`.
#[component]
pub fn Dialog(
    open: RwSignal<bool>,
    #[prop(into)] title: String,
    #[prop(optional, into)] class: String,
    children: ChildrenFn,
) -> impl IntoView {
    let title_id = use_random_id_for("dialog_title");
    let merged_class = tw_merge!(
        "relative w-full max-w-[calc(100%-2rem)] max-h-[85vh] overflow-hidden rounded-2xl border border-white/60 bg-slate-50/95 p-6 text-slate-800 shadow-2xl backdrop-blur-md flex flex-col gap-4",
        class
    );
    let children = StoredValue::new(children);
    let title = StoredValue::new(title);
    let title_id = StoredValue::new(title_id);

    let esc = window_event_listener(leptos::ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && open.get_untracked() {
            ev.prevent_default();
            open.set(false);
        }
    });
    on_cleanup(move || esc.remove());

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <div
                data-name="DialogBackdrop"
                class="fixed inset-0 z-[1000] flex items-center justify-center bg-black/70 p-4"
                on:click=move |_| open.set(false)
            >
                <div
                    data-name="DialogContent"
                    class=merged_class.clone()
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby=title_id.get_value()
                    on:click=|ev| ev.stop_propagation()
                >
                    <div class="flex items-center justify-between gap-4">
                        <h3 id=title_id.get_value() class="text-xl font-bold leading-none">
                            {title.get_value()}
                        </h3>
                        <button
                            type="button"
                            class="rounded-lg p-2 text-slate-500 hover:bg-slate-200 hover:text-slate-700 [&_svg]:size-4"
                            aria-label="Schließen"
                            on:click=move |_| open.set(false)
                        >
                            <X />
                        </button>
                    </div>
                    {children.with_value(|children| children())}
                </div>
            </div>
        </Show>
    }
}
