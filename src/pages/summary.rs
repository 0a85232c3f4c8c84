use super::SummaryRouteParams;
use crate::api::ApiError;
use crate::components::toast::use_toasts;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, ErrorAlert, LoadingState, Spinner};
use crate::embed::{external_href, youtube_embed_url};
use crate::models::{Content, Source};
use crate::state::AppContext;
use crate::util::{copy_to_clipboard, set_page_title};
use icons::{ArrowLeft, ExternalLink, Share2};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params};

pub(crate) const NO_SUMMARY: &str = "No summary available.";

pub(crate) fn summary_text(content: &Content) -> String {
    content
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_SUMMARY)
        .to_string()
}

/// Label for the external link shown instead of an embed.
fn external_label(source: Source) -> Option<&'static str> {
    match source {
        Source::Twitter => Some("View on Twitter"),
        Source::Github => Some("View on GitHub"),
        Source::Facebook => Some("View on Facebook"),
        Source::Youtube => None,
    }
}

/// Label and target of the external link, when the source has one and the
/// link is http(s).
fn external_link(content: &Content) -> Option<(&'static str, String)> {
    let label = external_label(content.source)?;
    let href = external_href(&content.link)?;
    Some((label, href.to_string()))
}

/// Title, media and summary text of one saved item. `actions` sit next to the title.
#[component]
pub(crate) fn SummaryView(content: Content, children: Children) -> impl IntoView {
    let media = match content.source {
        Source::Youtube => youtube_embed_url(&content.link).map(|src| {
            view! {
                <iframe
                    class="aspect-video w-full rounded-md border-0"
                    src=src
                    title="YouTube video player"
                    allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                    allowfullscreen=true
                ></iframe>
            }
            .into_any()
        }),
        _ => external_link(&content).map(|(label, href)| {
            view! {
                <a
                    class="inline-flex items-center gap-1.5 text-sm text-primary hover:underline [&_svg]:size-4"
                    href=href
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    <ExternalLink />
                    {label}
                </a>
            }
            .into_any()
        }),
    };

    let summary = summary_text(&content);

    view! {
        <section class="mx-auto w-full max-w-4xl rounded-lg border bg-card p-6 text-card-foreground shadow-lg">
            <div class="mb-4 flex flex-wrap items-center justify-between gap-3">
                <h1 class="text-2xl font-bold">{content.title.clone()}</h1>
                <div class="flex gap-2">{children()}</div>
            </div>

            {media.map(|m| view! { <div class="mb-4">{m}</div> })}

            <h2 class="mb-2 text-xl font-semibold">"Summary"</h2>
            <p class="whitespace-pre-wrap text-muted-foreground">{summary}</p>
        </section>
    }
}

#[component]
pub fn SummaryPage() -> impl IntoView {
    set_page_title("Summary");

    let app_state = expect_context::<AppContext>();
    let toasts = use_toasts();
    let navigate = StoredValue::new(use_navigate());
    let params = use_params::<SummaryRouteParams>();

    let content: RwSignal<Option<Content>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let sharing: RwSignal<bool> = RwSignal::new(false);

    let content_id = move || params.get().ok().and_then(|p| p.id).unwrap_or_default();

    Effect::new(move |_| {
        let id = content_id();
        if id.is_empty() {
            loading.set(false);
            error.set(Some("Error loading content or content not found.".to_string()));
            return;
        }

        loading.set(true);
        error.set(None);
        let mut api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.get_summary(&id).await;
            app_state.0.adopt_client(&api_client);
            match result {
                Ok(c) => {
                    let _ = content.try_set(Some(c));
                }
                Err(ApiError::Unauthorized) => {
                    app_state.0.clear_token();
                }
                Err(e) => {
                    log::warn!("summary {id} failed: {e}");
                    let _ = error.try_set(Some(
                        "Error loading content or content not found.".to_string(),
                    ));
                }
            }
            let _ = loading.try_set(false);
        });
    });

    let on_share = move |_: leptos::ev::MouseEvent| {
        if sharing.get_untracked() {
            return;
        }
        let id = content_id();
        sharing.set(true);
        let mut api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.create_summary_link(&id).await;
            app_state.0.adopt_client(&api_client);
            match result {
                Ok(link) => match copy_to_clipboard(&link).await {
                    Ok(()) => toasts.success("Share link copied to clipboard!"),
                    Err(_) => toasts.error(format!("Share link: {link}")),
                },
                Err(e) => {
                    log::error!("summary link for {id} failed: {e}");
                    toasts.error(e.share_link_message());
                }
            }
            let _ = sharing.try_set(false);
        });
    };

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <LoadingState label="Loading..." /> }>
            <ErrorAlert message=error />
            {move || content.get().map(|c| view! {
                <SummaryView content=c>
                    <Button
                        variant=ButtonVariant::Secondary
                        size=ButtonSize::Sm
                        on:click=move |_| navigate.with_value(|nav| nav("/dashboard", Default::default()))
                    >
                        <ArrowLeft />
                        "Back"
                    </Button>
                    <Button
                        variant=ButtonVariant::Secondary
                        size=ButtonSize::Sm
                        attr:disabled=move || sharing.get()
                        on:click=on_share
                    >
                        {move || if sharing.get() {
                            view! { <Spinner /> }.into_any()
                        } else {
                            view! { <Share2 /> }.into_any()
                        }}
                        {move || if sharing.get() { "Creating..." } else { "Share" }}
                    </Button>
                </SummaryView>
            })}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(summary: Option<&str>) -> Content {
        Content {
            id: "1".to_string(),
            title: "t".to_string(),
            link: "https://github.com/a/b".to_string(),
            source: Source::Github,
            content_type: None,
            summary: summary.map(str::to_string),
        }
    }

    #[test]
    fn test_summary_text_falls_back_when_missing_or_blank() {
        assert_eq!(summary_text(&content(None)), NO_SUMMARY);
        assert_eq!(summary_text(&content(Some("  \n"))), NO_SUMMARY);
        assert_eq!(summary_text(&content(Some(" A repo. "))), "A repo.");
    }

    #[test]
    fn test_external_link_skips_non_http_links() {
        let mut c = content(None);
        assert_eq!(
            external_link(&c),
            Some(("View on GitHub", "https://github.com/a/b".to_string()))
        );

        c.link = "javascript:alert(1)".to_string();
        assert_eq!(external_link(&c), None);
    }

    #[test]
    fn test_external_label_per_source() {
        assert_eq!(external_label(Source::Twitter), Some("View on Twitter"));
        assert_eq!(external_label(Source::Github), Some("View on GitHub"));
        assert_eq!(external_label(Source::Youtube), None);
    }
}
