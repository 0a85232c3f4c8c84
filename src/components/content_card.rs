use crate::api::fetch_github_repo;
use crate::components::toast::use_toasts;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Spinner};
use crate::embed::{
    external_href, facebook_embed_url, parse_github_repo, twitter_embed_url, youtube_embed_url,
};
use crate::models::{Content, GithubRepo, Source};
use crate::state::AppContext;
use crate::util::{copy_to_clipboard, now_ms, relative_time_from_iso};
use icons::{ExternalLink, FileText, GitFork, Share2, Star, Trash2};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

const LINK_BUTTON_CLASS: &str = "inline-flex h-8 w-fit items-center gap-1.5 rounded-md border bg-background px-3 text-sm font-medium shadow-xs hover:bg-accent hover:text-accent-foreground [&_svg]:size-4";
const ICON_LINK_CLASS: &str = "inline-flex size-8 items-center justify-center rounded-full hover:bg-accent hover:text-accent-foreground [&_svg]:size-4";

/// Asks the twitter widget script (if loaded) to upgrade new blockquotes.
fn load_twitter_widgets() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let load = js_sys::Reflect::get(&window, &"twttr".into())
        .ok()
        .filter(|v| v.is_object())
        .and_then(|twttr| js_sys::Reflect::get(&twttr, &"widgets".into()).ok())
        .filter(|v| v.is_object())
        .and_then(|widgets| {
            let f = js_sys::Reflect::get(&widgets, &"load".into()).ok()?;
            Some((widgets, f))
        });
    if let Some((widgets, f)) = load {
        if let Ok(f) = f.dyn_into::<js_sys::Function>() {
            let _ = f.call0(&widgets);
        }
    }
}

/// Renders nothing for links that are not http(s).
#[component]
fn ExternalLinkButton(#[prop(into)] href: String, label: &'static str) -> impl IntoView {
    external_href(&href).map(|href| {
        view! {
            <a class=LINK_BUTTON_CLASS href=href.to_string() target="_blank" rel="noopener noreferrer">
                <ExternalLink />
                {label}
            </a>
        }
    })
}

#[component]
fn YoutubeEmbed(link: String) -> impl IntoView {
    match youtube_embed_url(&link) {
        Some(src) => view! {
            <iframe
                class="aspect-video w-full rounded-md border-0"
                src=src
                title="YouTube video player"
                allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share"
                referrerpolicy="strict-origin-when-cross-origin"
                allowfullscreen=true
            ></iframe>
        }
        .into_any(),
        None => view! { <ExternalLinkButton href=link label="Open on YouTube" /> }.into_any(),
    }
}

#[component]
fn TwitterEmbed(link: String) -> impl IntoView {
    let href = twitter_embed_url(&link);

    Effect::new(move |_| load_twitter_widgets());

    view! {
        <div class="flex flex-col gap-2">
            {href.map(|href| view! {
                <blockquote class="twitter-tweet">
                    <a href=href></a>
                </blockquote>
            })}
            <ExternalLinkButton href=link label="View on Twitter" />
        </div>
    }
}

#[component]
fn FacebookEmbed(link: String) -> impl IntoView {
    view! {
        <iframe
            class="w-full overflow-hidden rounded-md border-0"
            src=facebook_embed_url(&link)
            height="300"
            allowfullscreen=true
            allow="autoplay; clipboard-write; encrypted-media; picture-in-picture; web-share"
        ></iframe>
    }
}

#[component]
fn GithubPreview(link: String) -> impl IntoView {
    let repo: RwSignal<Option<GithubRepo>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    match parse_github_repo(&link) {
        Some((owner, name)) => {
            loading.set(true);
            spawn_local(async move {
                match fetch_github_repo(&owner, &name).await {
                    Ok(r) => {
                        let _ = repo.try_set(Some(r));
                    }
                    Err(e) => {
                        log::warn!("github metadata for {owner}/{name} failed: {e}");
                        let _ = error.try_set(Some("Could not load repository details.".to_string()));
                    }
                }
                let _ = loading.try_set(false);
            });
        }
        None => error.set(Some("Not a GitHub repository link.".to_string())),
    }

    view! {
        <div class="flex flex-col gap-2 rounded-md border bg-muted/40 p-3 text-sm">
            <Show when=move || loading.get() fallback=|| ().into_view()>
                <div class="flex items-center gap-2 text-muted-foreground">
                    <Spinner />
                    "Loading repository..."
                </div>
            </Show>
            {move || error.get().map(|e| view! { <div class="text-xs text-destructive">{e}</div> })}
            {move || {
                repo.get()
                    .map(|r| {
                        let updated = r
                            .updated_at
                            .as_deref()
                            .and_then(|at| relative_time_from_iso(at, now_ms()));
                        view! {
                            <div class="font-semibold">{r.full_name.clone()}</div>
                            <p class="line-clamp-3 text-xs text-muted-foreground">
                                {r.description.clone().unwrap_or_else(|| "No description.".to_string())}
                            </p>
                            <div class="flex flex-wrap items-center gap-3 text-xs text-muted-foreground">
                                <span class="inline-flex items-center gap-1">
                                    <Star class="size-3" />
                                    {r.stargazers_count}
                                </span>
                                <span class="inline-flex items-center gap-1">
                                    <GitFork class="size-3" />
                                    {r.forks_count}
                                </span>
                                {r.language.clone().map(|l| view! { <span>{l}</span> })}
                                {updated.map(|u| view! { <span>{format!("Updated {u}")}</span> })}
                            </div>
                        }
                    })
            }}
            <ExternalLinkButton href=link label="View on GitHub" />
        </div>
    }
}

/// One saved item; the body depends on its source.
#[component]
pub fn ContentCard(
    content: Content,
    /// Owner view: shows delete and summary actions.
    #[prop(optional)]
    delete_option: bool,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let toasts = use_toasts();
    let deleting: RwSignal<bool> = RwSignal::new(false);

    let id = StoredValue::new(content.id.clone());
    let link = StoredValue::new(content.link.clone());

    let on_share = move |_: leptos::ev::MouseEvent| {
        let link = link.get_value();
        spawn_local(async move {
            match copy_to_clipboard(&link).await {
                Ok(()) => toasts.success("Link copied to clipboard!"),
                Err(e) => toasts.error(e),
            }
        });
    };

    let on_delete = move |_: leptos::ev::MouseEvent| {
        if deleting.get_untracked() {
            return;
        }
        deleting.set(true);
        let id = id.get_value();
        let mut api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.delete_content(&id).await;
            app_state.0.adopt_client(&api_client);
            match result {
                Ok(_) => {
                    toasts.success("Content deleted.");
                    app_state.0.invalidate_content();
                }
                Err(e) => {
                    log::warn!("delete {id} failed: {e}");
                    toasts.error(format!("Failed to delete: {e}"));
                }
            }
            let _ = deleting.try_set(false);
        });
    };

    let body = match content.source {
        Source::Youtube => view! { <YoutubeEmbed link=content.link.clone() /> }.into_any(),
        Source::Twitter => view! { <TwitterEmbed link=content.link.clone() /> }.into_any(),
        Source::Facebook => view! { <FacebookEmbed link=content.link.clone() /> }.into_any(),
        Source::Github => view! { <GithubPreview link=content.link.clone() /> }.into_any(),
    };

    let summary_href = format!("/summary/{}", urlencoding::encode(&content.id));

    view! {
        <article
            data-source=content.source.as_ref().to_string()
            class="flex w-80 flex-col gap-3 rounded-xl border bg-card p-3 text-card-foreground shadow-sm transition-shadow hover:shadow-md"
        >
            <header class="flex items-center justify-between gap-3">
                <div class="min-w-0 flex-1">
                    <h4 class="truncate font-semibold" title=content.title.clone()>
                        {content.title.clone()}
                    </h4>
                    <span class="text-xs text-muted-foreground">{content.source.label()}</span>
                </div>
                <div class="flex items-center gap-1">
                    {delete_option.then(|| view! {
                        <a class=ICON_LINK_CLASS href=summary_href aria-label="View summary">
                            <FileText />
                        </a>
                    })}
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:aria-label="Copy link"
                        on:click=on_share
                    >
                        <Share2 />
                    </Button>
                    {delete_option.then(|| view! {
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:aria-label="Delete"
                            attr:disabled=move || deleting.get()
                            on:click=on_delete
                        >
                            {move || if deleting.get() {
                                view! { <Spinner /> }.into_any()
                            } else {
                                view! { <Trash2 /> }.into_any()
                            }}
                        </Button>
                    })}
                </div>
            </header>
            <div>{body}</div>
        </article>
    }
}
