use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-sm font-medium transition-all disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg:not([class*='size-'])]:size-4 shrink-0 outline-none focus-visible:ring-ring/50 focus-visible:ring-[3px] w-fit hover:cursor-pointer active:scale-[0.98] touch-manipulation select-none",
        variants: {
            variant: {
                Default: "bg-primary text-primary-foreground shadow-xs hover:bg-primary/90",
                // Row-level delete: quiet until hovered.
                Destructive: "text-destructive hover:bg-destructive/10 focus-visible:ring-destructive/20",
                Outline: "border bg-border/30 shadow-xs hover:bg-border/50 hover:text-foreground",
                Ghost: "hover:bg-accent hover:text-accent-foreground",
            },
            size: {
                Default: "h-9 px-4 py-2",
                Sm: "h-7 gap-1.5 px-2.5 text-xs",
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
