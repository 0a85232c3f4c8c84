use crate::api::AddContentRequest;
use crate::components::toast::use_toasts;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, ErrorAlert, Input, Label, NativeSelect, SelectOption,
    Spinner,
};
use crate::embed::{detect_source, is_http_url};
use crate::models::{ContentType, Source};
use crate::state::AppContext;
use icons::X;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;

pub(crate) fn validate_add_content(
    title: &str,
    link: &str,
    content_type: &str,
    source: &str,
) -> Result<AddContentRequest, String> {
    let title = title.trim();
    let link = link.trim();

    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    if link.is_empty() {
        return Err("Link is required".to_string());
    }
    if !is_http_url(link) {
        return Err("Link must start with http:// or https://".to_string());
    }
    let content_type: ContentType = content_type
        .parse()
        .map_err(|_| "Select a content type".to_string())?;
    let source = Source::parse(source).ok_or_else(|| "Select a source".to_string())?;

    if let Some(detected) = detect_source(link) {
        if detected != source {
            return Err(format!(
                "This looks like a {} link, not {}",
                detected.label(),
                source.label()
            ));
        }
    }

    Ok(AddContentRequest {
        title: title.to_string(),
        link: link.to_string(),
        content_type,
        source,
    })
}

fn type_options() -> Vec<SelectOption> {
    std::iter::once((String::new(), "Select type".to_string()))
        .chain(
            ContentType::ALL
                .iter()
                .map(|t| (t.to_string(), t.label().to_string())),
        )
        .collect()
}

fn source_options() -> Vec<SelectOption> {
    std::iter::once((String::new(), "Select source".to_string()))
        .chain(
            Source::ALL
                .iter()
                .map(|s| (s.to_string(), s.label().to_string())),
        )
        .collect()
}

/// Controlled add-content form; posts and invalidates the content list on success.
#[component]
pub fn AddContentModal(open: RwSignal<bool>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let toasts = use_toasts();

    let title: RwSignal<String> = RwSignal::new(String::new());
    let link: RwSignal<String> = RwSignal::new(String::new());
    let content_type: RwSignal<String> = RwSignal::new(String::new());
    let source: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let title_ref: NodeRef<html::Input> = NodeRef::new();

    let reset = move || {
        title.set(String::new());
        link.set(String::new());
        content_type.set(String::new());
        source.set(String::new());
        error.set(None);
    };

    let close = move || {
        if loading.get_untracked() {
            return;
        }
        open.set(false);
        reset();
    };

    // Focus the title once the dialog is mounted.
    Effect::new(move |_| {
        if open.get() {
            if let Some(el) = title_ref.get() {
                let _ = el.focus();
            }
        }
    });

    // Fill in the source from the link when the user has not picked one.
    Effect::new(move |_| {
        let l = link.get();
        if source.get_untracked().is_empty() {
            if let Some(s) = detect_source(&l) {
                source.set(s.to_string());
            }
        }
    });

    let escape_handle = window_event_listener(ev::keydown, move |e: web_sys::KeyboardEvent| {
        if e.key() == "Escape" && open.get_untracked() {
            close();
        }
    });
    on_cleanup(move || escape_handle.remove());

    let submit = move || {
        if loading.get_untracked() {
            return;
        }
        let req = match validate_add_content(
            &title.get_untracked(),
            &link.get_untracked(),
            &content_type.get_untracked(),
            &source.get_untracked(),
        ) {
            Ok(req) => req,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        loading.set(true);
        error.set(None);

        let mut api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.add_content(req).await;
            app_state.0.adopt_client(&api_client);
            loading.set(false);
            match result {
                Ok(content) => {
                    log::info!("added content {}", content.id);
                    toasts.success("Content added!");
                    app_state.0.invalidate_content();
                    open.set(false);
                    reset();
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                class="fixed inset-0 z-50 flex items-center justify-center bg-black/70 px-4"
                on:click=move |_| close()
            >
                <div
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby="add-content-title"
                    class="w-full max-w-lg rounded-lg border bg-background p-4 shadow-lg"
                    on:click=|e| e.stop_propagation()
                >
                    <div class="mb-3 flex items-center justify-between">
                        <h3 id="add-content-title" class="text-base font-semibold">"Add content"</h3>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:aria-label="Close"
                            on:click=move |_| close()
                        >
                            <X />
                        </Button>
                    </div>

                    <form
                        class="flex flex-col gap-3"
                        on:submit=move |e: ev::SubmitEvent| {
                            e.prevent_default();
                            submit();
                        }
                    >
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="content-title" class="text-xs">"Title"</Label>
                            <Input
                                id="content-title"
                                placeholder="Add title"
                                bind_value=title
                                node_ref=title_ref
                                class="h-8 text-sm"
                            />
                        </div>

                        <div class="flex flex-wrap items-center gap-3">
                            <NativeSelect
                                id="content-type"
                                aria_label="Content type"
                                options=type_options()
                                bind_value=content_type
                            />
                            <NativeSelect
                                id="content-source"
                                aria_label="Content source"
                                options=source_options()
                                bind_value=source
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="content-link" class="text-xs">"Link"</Label>
                            <Input
                                id="content-link"
                                r#type="url"
                                placeholder="https://"
                                bind_value=link
                                class="h-8 text-sm"
                            />
                        </div>

                        <ErrorAlert message=error />

                        <div class="flex items-center justify-end gap-2 pt-1">
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                attr:r#type="button"
                                attr:disabled=move || loading.get()
                                on:click=move |_| close()
                            >
                                "Cancel"
                            </Button>
                            <Button size=ButtonSize::Sm attr:disabled=move || loading.get()>
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Saving..." } else { "Submit" }}
                            </Button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_add_content_ok() {
        let req = validate_add_content(
            "  Talk ",
            "https://www.youtube.com/watch?v=6t6ZYsLXMWU",
            "video",
            "youtube",
        )
        .expect("valid input");
        assert_eq!(req.title, "Talk");
        assert_eq!(req.content_type, ContentType::Video);
        assert_eq!(req.source, Source::Youtube);
    }

    #[test]
    fn test_validate_add_content_required_fields() {
        assert_eq!(
            validate_add_content("", "https://a.b", "video", "youtube").unwrap_err(),
            "Title is required"
        );
        assert_eq!(
            validate_add_content("t", " ", "video", "youtube").unwrap_err(),
            "Link is required"
        );
        assert_eq!(
            validate_add_content("t", "https://github.com/a/b", "", "github").unwrap_err(),
            "Select a content type"
        );
        assert_eq!(
            validate_add_content("t", "https://github.com/a/b", "article", "").unwrap_err(),
            "Select a source"
        );
    }

    #[test]
    fn test_validate_add_content_rejects_non_http_links() {
        assert!(validate_add_content("t", "javascript:alert(1)", "video", "youtube").is_err());
    }

    #[test]
    fn test_validate_add_content_source_must_match_host() {
        let err = validate_add_content("t", "https://github.com/a/b", "article", "youtube")
            .unwrap_err();
        assert_eq!(err, "This looks like a GitHub link, not YouTube");

        // Unknown hosts are left to the user's choice.
        assert!(validate_add_content("t", "https://example.com/v", "video", "facebook").is_ok());
    }
}
