use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm"}
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
}

pub use components::*;

/// Red banner for a page or form error.
#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some() fallback=|| ().into_view()>
            <Alert class="border-destructive/30 bg-destructive/5">
                <AlertDescription class="text-destructive text-xs">
                    {move || message.get().unwrap_or_default()}
                </AlertDescription>
            </Alert>
        </Show>
    }
}

/// Green banner for a completed action.
#[component]
pub fn SuccessAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some() fallback=|| ().into_view()>
            <Alert class="border-green-500/30 bg-green-50 dark:bg-green-900/30">
                <AlertDescription class="text-green-600 dark:text-green-400 text-xs">
                    {move || message.get().unwrap_or_default()}
                </AlertDescription>
            </Alert>
        </Show>
    }
}
