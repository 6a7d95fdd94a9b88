use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    // Compact panels: the memo page stacks a form card over a list card.
    clx! {Card, section, "bg-card text-card-foreground flex flex-col gap-3 rounded-lg border py-4 shadow-xs"}
    clx! {CardHeader, header, "flex flex-col gap-1 px-4"}
    clx! {CardTitle, h2, "text-base leading-tight font-semibold"}
    clx! {CardDescription, p, "text-muted-foreground text-xs"}
    clx! {CardContent, div, "px-4"}
}

pub use components::*;
