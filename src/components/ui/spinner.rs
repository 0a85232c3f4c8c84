use icons::Loader;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);

    view! { <Loader class=merged_class attr:role="status" attr:aria-label="Loading" /> }
}

/// Centered spinner with a caption, used while a page loads.
#[component]
pub fn LoadingState(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="flex w-full flex-col items-center gap-2 py-10 text-sm text-muted-foreground">
            <Spinner class="size-5" />
            <span>{label}</span>
        </div>
    }
}
