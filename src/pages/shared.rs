use super::dashboard::{ContentBoard, ContentFeed};
use super::summary::SummaryView;
use super::{SharedBrainRouteParams, SharedSummaryRouteParams};
use crate::components::toast::use_toasts;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, ErrorAlert, LoadingState};
use crate::models::Content;
use crate::state::AppContext;
use crate::util::{copy_to_clipboard, current_href, set_page_title};
use icons::{Copy, UserPlus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params};

#[component]
pub fn SharedSummaryPage() -> impl IntoView {
    set_page_title("Shared Summary");

    let app_state = expect_context::<AppContext>();
    let toasts = use_toasts();
    let navigate = StoredValue::new(use_navigate());
    let params = use_params::<SharedSummaryRouteParams>();

    let content: RwSignal<Option<Content>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    Effect::new(move |_| {
        let Some(hash) = params.get().ok().and_then(|p| p.hash).filter(|h| !h.is_empty()) else {
            loading.set(false);
            error.set(Some("Shared link is incomplete.".to_string()));
            return;
        };

        loading.set(true);
        error.set(None);
        let mut api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.get_shared_summary(&hash).await;
            app_state.0.adopt_client(&api_client);
            match result {
                Ok(c) => {
                    let _ = content.try_set(Some(c));
                }
                Err(e) => {
                    log::warn!("shared summary {hash} failed: {e}");
                    let _ = error.try_set(Some(
                        "Error loading shared content or content not found.".to_string(),
                    ));
                }
            }
            let _ = loading.try_set(false);
        });
    });

    let on_copy = move |_: leptos::ev::MouseEvent| {
        let Some(href) = current_href() else {
            return;
        };
        spawn_local(async move {
            match copy_to_clipboard(&href).await {
                Ok(()) => toasts.success("Share link copied to clipboard!"),
                Err(_) => toasts.error("Failed to copy share link."),
            }
        });
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! { <LoadingState label="Loading shared summary..." /> }
        >
            <ErrorAlert message=error />
            {move || content.get().map(|c| view! {
                <SummaryView content=c>
                    <Button
                        variant=ButtonVariant::Secondary
                        size=ButtonSize::Sm
                        attr:aria-label="Copy link"
                        on:click=on_copy
                    >
                        <Copy />
                        "Copy link"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        on:click=move |_| navigate.with_value(|nav| nav("/register", Default::default()))
                    >
                        <UserPlus />
                        "Register"
                    </Button>
                </SummaryView>
            })}
        </Show>
    }
}

#[component]
pub fn SharedBrainPage() -> impl IntoView {
    set_page_title("Shared Brain");

    let params = use_params::<SharedBrainRouteParams>();
    let feed = Signal::derive(move || {
        ContentFeed::SharedBrain(
            params
                .get()
                .ok()
                .and_then(|p| p.hash_code)
                .unwrap_or_default(),
        )
    });

    view! { <ContentBoard feed=feed /> }
}
