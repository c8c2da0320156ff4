use super::BoardActions;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Label, Separator, Textarea};
use crate::models::{Note, NoteUpdate, TextAlign, FONTS};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use strum::IntoEnumIterator;

const MIN_FONT_SIZE: u32 = 10;
const MAX_FONT_SIZE: u32 = 40;

fn parse_font_size(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .map(|s| s.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE))
}

/// Typography of one text block (title or body).
#[derive(Clone, Copy)]
struct TextStyle {
    text: RwSignal<String>,
    size: RwSignal<u32>,
    font: RwSignal<String>,
    align: RwSignal<TextAlign>,
}

impl TextStyle {
    fn new() -> Self {
        Self {
            text: RwSignal::new(String::new()),
            size: RwSignal::new(0),
            font: RwSignal::new(String::new()),
            align: RwSignal::new(TextAlign::Left),
        }
    }
}

/// Editable copy of a note; written back as one update when the editor closes.
#[derive(Clone, Copy)]
struct Draft {
    title: TextStyle,
    body: TextStyle,
}

impl Draft {
    fn new() -> Self {
        Self {
            title: TextStyle::new(),
            body: TextStyle::new(),
        }
    }

    fn load(&self, note: &Note) {
        let f = &note.fields;
        self.title.text.set(f.name.clone());
        self.title.size.set(f.title_size());
        self.title.font.set(f.title_font().to_string());
        self.title.align.set(f.name_align);
        self.body.text.set(f.activity.clone());
        self.body.size.set(f.body_size());
        self.body.font.set(f.body_font().to_string());
        self.body.align.set(f.activity_align);
    }

    fn to_update(self) -> NoteUpdate {
        NoteUpdate {
            name: Some(self.title.text.get_untracked()),
            activity: Some(self.body.text.get_untracked()),
            name_fs: Some(self.title.size.get_untracked()),
            activity_fs: Some(self.body.size.get_untracked()),
            name_font: Some(self.title.font.get_untracked()),
            activity_font: Some(self.body.font.get_untracked()),
            name_align: Some(self.title.align.get_untracked()),
            activity_align: Some(self.body.align.get_untracked()),
            ..Default::default()
        }
    }
}

#[component]
fn TextStyleControls(style: TextStyle, #[prop(into)] heading: String) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-3 rounded-xl bg-white/5 p-4">
            <h4 class="text-xs font-semibold uppercase tracking-wide text-slate-400">{heading}</h4>

            <div class="flex items-center gap-3">
                <Label class="w-24 normal-case tracking-normal text-slate-300">"Schriftgröße"</Label>
                <input
                    type="range"
                    class="flex-1 accent-blue-400"
                    min=MIN_FONT_SIZE.to_string()
                    max=MAX_FONT_SIZE.to_string()
                    prop:value=move || style.size.get().to_string()
                    on:input=move |ev| {
                        if let Some(size) = parse_font_size(&event_target_value(&ev)) {
                            style.size.set(size);
                        }
                    }
                />
                <span class="w-12 text-right text-sm tabular-nums">
                    {move || format!("{}px", style.size.get())}
                </span>
            </div>

            <div class="flex flex-col gap-1">
                <Label class="normal-case tracking-normal text-slate-300">"Schriftart"</Label>
                <select
                    class="h-9 rounded-lg border border-slate-600 bg-slate-800 px-2 text-sm text-slate-100"
                    prop:value=move || style.font.get()
                    on:change=move |ev| style.font.set(event_target_value(&ev))
                >
                    {FONTS
                        .iter()
                        .map(|&(value, label)| {
                            view! {
                                <option value=value style=format!("font-family: {value};")>
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="flex flex-col gap-1">
                <Label class="normal-case tracking-normal text-slate-300">"Ausrichtung"</Label>
                <div class="flex gap-1">
                    {TextAlign::iter()
                        .map(|align| {
                            view! {
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Sm
                                    class="flex-1 text-slate-200 hover:bg-white/10"
                                    attr:aria-pressed=move || (style.align.get() == align).to_string()
                                    on:click=move |_| style.align.set(align)
                                >
                                    <span class:font-bold=move || style.align.get() == align>
                                        {align.label()}
                                    </span>
                                </Button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}

/// Slide-in panel for the note in `editing_note`.
#[component]
pub(crate) fn SideEditor() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let sync = expect_context::<BoardActions>().sync();
    let draft = Draft::new();

    Effect::new(move |_| {
        if let Some(note) = app_state.editing_note.get().and_then(|id| app_state.note(id)) {
            draft.load(&note);
        }
    });

    let close = move |_: web_sys::MouseEvent| {
        let Some(id) = app_state.editing_note.get_untracked() else {
            return;
        };
        app_state.editing_note.set(None);
        let update = draft.to_update();
        spawn_local(async move {
            if sync.update(id, update).await {
                app_state.success("Zettel gespeichert.");
            }
        });
    };

    view! {
        <Show when=move || app_state.editing_note.get().is_some() fallback=|| ()>
            <aside class="fixed right-0 top-0 z-[1500] flex h-full w-[380px] max-w-full flex-col gap-5 overflow-y-auto bg-slate-900 p-6 text-slate-100 shadow-[-8px_0_24px_rgba(0,0,0,0.4)]">
                <div class="flex items-center justify-between">
                    <h3 class="text-lg font-bold">"Zettel bearbeiten"</h3>
                    <Button
                        variant=ButtonVariant::Success
                        size=ButtonSize::Sm
                        on:click=close
                    >
                        "Fertig"
                    </Button>
                </div>

                <div class="flex flex-col gap-2">
                    <Label class="text-slate-400">"Titel"</Label>
                    <Textarea bind_value=draft.title.text rows=2 placeholder="Zettel Titel..." />
                </div>
                <TextStyleControls style=draft.title heading="Titel-Formatierung" />

                <Separator class="bg-slate-700" />

                <div class="flex flex-col gap-2">
                    <Label class="text-slate-400">"Text"</Label>
                    <Textarea bind_value=draft.body.text rows=6 placeholder="Zettel Text..." />
                </div>
                <TextStyleControls style=draft.body heading="Text-Formatierung" />
            </aside>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_is_clamped() {
        assert_eq!(parse_font_size("16"), Some(16));
        assert_eq!(parse_font_size(" 8 "), Some(MIN_FONT_SIZE));
        assert_eq!(parse_font_size("99"), Some(MAX_FONT_SIZE));
        assert_eq!(parse_font_size("groß"), None);
    }
}
