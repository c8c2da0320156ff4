use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "pointer-events-auto flex items-center gap-3 rounded-xl px-5 py-3 text-sm font-semibold text-white shadow-2xl"}
    clx! {AlertDescription, p, "leading-snug"}
}

pub use components::*;
