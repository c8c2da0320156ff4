use crate::components::board::{
    BoardActions, BoardRef, Fab, Header, NotificationToast, PinboardArea, QuickActions, SideEditor,
};
use crate::state::AppContext;
use leptos::prelude::*;

/// The weekly board: header, canvas, toolbars and overlays.
#[component]
pub fn BoardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let board = BoardRef(NodeRef::new());
    provide_context(board);
    provide_context(BoardActions::new(app_state, board));

    view! {
        <div
            class="flex h-screen flex-col overflow-hidden"
            data-theme=move || app_state.theme.get().as_ref().to_string()
        >
            <Header />
            <PinboardArea />
            <QuickActions />
            <Fab />
            <SideEditor />
            <NotificationToast />
        </div>
    }
}
