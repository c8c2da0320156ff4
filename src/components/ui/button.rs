use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-lg text-sm font-medium transition-all disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg:not([class*='size-'])]:size-4 shrink-0 [&_svg]:shrink-0 outline-none focus-visible:ring-[3px] focus-visible:ring-white/40 hover:cursor-pointer active:scale-[0.97] touch-manipulation [-webkit-tap-highlight-color:transparent] select-none",
        variants: {
            variant: {
                Default: "bg-blue-500 text-white shadow-sm hover:bg-blue-600",
                Destructive: "bg-red-500 text-white shadow-sm hover:bg-red-600",
                Outline: "border border-black/10 bg-white/80 text-slate-800 shadow-xs hover:bg-white",
                Ghost: "text-slate-700 hover:bg-black/5",
                // Header buttons sit on the themed header background.
                Header: "bg-white/15 text-[color:var(--header-text,white)] hover:bg-white/30",
                Success: "bg-emerald-500 text-white shadow-sm hover:bg-emerald-600",
                Info: "bg-sky-500 text-white shadow-sm hover:bg-sky-600",
                Warning: "bg-amber-500 text-white shadow-sm hover:bg-amber-600",
                Active: "bg-red-500 text-white shadow-md ring-2 ring-white/60",
            },
            size: {
                Default: "h-9 px-4 py-2",
                Sm: "h-8 gap-1.5 px-3",
                Lg: "h-11 px-6 text-base",
                Icon: "size-9",
                Round: "size-12 rounded-full text-lg shadow-lg",
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
