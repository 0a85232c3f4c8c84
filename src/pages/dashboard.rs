use crate::api::{ApiClient, ApiError, ApiResult, PAGE_SIZE};
use crate::components::ui::{ErrorAlert, LoadingState};
use crate::components::{ContentCard, Pagination};
use crate::models::{Content, ContentPage, Source};
use crate::state::AppContext;
use crate::util::{clamp_page, set_page_title, total_pages};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Where a paginated card list comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ContentFeed {
    /// The signed-in user's own items.
    Own,
    /// Someone's shared brain, by share hash.
    SharedBrain(String),
}

impl ContentFeed {
    async fn load(
        &self,
        client: &mut ApiClient,
        source: Option<Source>,
        page: u32,
    ) -> ApiResult<ContentPage> {
        match self {
            Self::Own => client.get_content(source, page).await,
            Self::SharedBrain(hash) => client.get_shared_brain(hash, source, page).await,
        }
    }

    fn is_owner(&self) -> bool {
        matches!(self, Self::Own)
    }
}

/// Whether a filter change should send the board back to page 1. The first
/// run of the effect sees no previous value and keeps the current page.
fn source_changed(prev: Option<Option<Source>>, current: Option<Source>) -> bool {
    prev.is_some_and(|p| p != current)
}

/// A response may be applied only while it belongs to the newest request.
/// `latest` is `None` once the board has been disposed.
fn is_current_response(latest: Option<u64>, rid: u64) -> bool {
    latest == Some(rid)
}

/// Paginated grid of cards, filtered by the global source selection.
///
/// Refetches on page, source, feed and `content_version` changes. Responses
/// that arrive after a newer request was issued are dropped.
#[component]
pub(crate) fn ContentBoard(#[prop(into)] feed: Signal<ContentFeed>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let source = app_state.0.source;
    let content_version = app_state.0.content_version;

    let page: RwSignal<u32> = RwSignal::new(1);
    let items: RwSignal<Vec<Content>> = RwSignal::new(vec![]);
    let count: RwSignal<u64> = RwSignal::new(0);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let request_id: StoredValue<u64> = StoredValue::new(0);

    let total = Signal::derive(move || total_pages(count.get(), PAGE_SIZE));

    // Back to the first page whenever the filter changes.
    Effect::new(move |prev: Option<Option<Source>>| {
        let current = source.get();
        if source_changed(prev, current) {
            page.set(1);
        }
        current
    });

    Effect::new(move |_| {
        let feed = feed.get();
        let src = source.get();
        let p = page.get();
        content_version.track();

        let rid = request_id.get_value().wrapping_add(1);
        request_id.set_value(rid);
        loading.set(true);
        error.set(None);

        let mut api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = feed.load(&mut api_client, src, p).await;
            // A refreshed or cleared token is kept even when the page data is stale.
            let latest = request_id.try_get_value();
            if latest.is_some() {
                app_state.0.adopt_client(&api_client);
            }
            if !is_current_response(latest, rid) {
                log::debug!("dropping stale content response for page {p}");
                return;
            }

            match result {
                Ok(res) => {
                    let clamped = clamp_page(p, total_pages(res.count, PAGE_SIZE));
                    count.set(res.count);
                    items.set(res.content);
                    if clamped != p {
                        page.set(clamped);
                    }
                }
                Err(ApiError::Unauthorized) if feed.is_owner() => {
                    log::info!("session expired while loading content");
                    app_state.0.clear_token();
                }
                Err(e) => {
                    log::warn!("content load failed: {e}");
                    items.set(vec![]);
                    error.set(Some(format!("Failed to load content: {e}")));
                }
            }
            loading.set(false);
        });
    });

    let delete_option = move || feed.with(ContentFeed::is_owner);

    view! {
        <ErrorAlert message=error />
        <Show when=move || !loading.get() fallback=|| view! { <LoadingState label="Loading..." /> }>
            <Show
                when=move || !items.with(Vec::is_empty)
                fallback=|| view! {
                    <div class="py-10 text-center text-lg font-bold text-muted-foreground">
                        "No content available"
                    </div>
                }
            >
                <div class="flex flex-wrap items-start justify-center gap-3">
                    <For
                        each=move || items.get()
                        key=|c| c.id.clone()
                        children=move |c: Content| view! {
                            <ContentCard content=c delete_option=delete_option() />
                        }
                    />
                </div>
            </Show>
        </Show>
        <Pagination page=page total_pages=total />
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    set_page_title("Dashboard");

    view! { <ContentBoard feed=ContentFeed::Own /> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_own_feed_allows_delete() {
        assert!(ContentFeed::Own.is_owner());
        assert!(!ContentFeed::SharedBrain("h".to_string()).is_owner());
    }

    #[test]
    fn test_source_change_resets_page_only_after_first_run() {
        assert!(!source_changed(None, Some(Source::Github)));
        assert!(!source_changed(Some(None), None));
        assert!(!source_changed(Some(Some(Source::Github)), Some(Source::Github)));
        assert!(source_changed(Some(None), Some(Source::Youtube)));
        assert!(source_changed(Some(Some(Source::Youtube)), None));
    }

    #[test]
    fn test_stale_responses_are_dropped() {
        assert!(is_current_response(Some(3), 3));
        assert!(!is_current_response(Some(4), 3));
        assert!(!is_current_response(None, 3));
    }
}
