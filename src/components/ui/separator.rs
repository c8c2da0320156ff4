use leptos::prelude::*;
use tw_merge::*;

#[component]
pub fn Separator(
    #[prop(optional)] vertical: bool,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let orientation = if vertical { "h-full w-[1px]" } else { "w-full h-[1px]" };
    let merged_class = tw_merge!("shrink-0 bg-white/30", orientation, class);

    view! { <div class=merged_class role="separator" /> }
}
