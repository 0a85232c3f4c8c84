use crate::components::ui::{Button, ButtonSize};
use icons::{ChevronLeft, ChevronRight};
use leptos::ev;
use leptos::prelude::*;

/// Prev / "Page N of M" / Next. Hidden while there is at most one page.
#[component]
pub fn Pagination(page: RwSignal<u32>, #[prop(into)] total_pages: Signal<u32>) -> impl IntoView {
    let on_prev = move |_: ev::MouseEvent| page.update(|p| *p = p.saturating_sub(1).max(1));
    let on_next = move |_: ev::MouseEvent| {
        let total = total_pages.get_untracked().max(1);
        page.update(|p| *p = (*p + 1).min(total));
    };

    view! {
        <Show when=move || { total_pages.get() > 1 } fallback=|| ().into_view()>
            <nav
                aria-label="Pagination"
                class="fixed bottom-3 left-1/2 z-40 flex -translate-x-1/2 items-center gap-3 rounded-full border bg-background/90 px-3 py-1.5 shadow-md backdrop-blur"
            >
                <Button
                    size=ButtonSize::Sm
                    attr:disabled=move || page.get() <= 1
                    on:click=on_prev
                >
                    <ChevronLeft />
                    "Prev"
                </Button>
                <span class="text-sm font-semibold">
                    {move || format!("Page {} of {}", page.get(), total_pages.get())}
                </span>
                <Button
                    size=ButtonSize::Sm
                    attr:disabled=move || page.get() >= total_pages.get()
                    on:click=on_next
                >
                    "Next"
                    <ChevronRight />
                </Button>
            </nav>
        </Show>
    }
}
