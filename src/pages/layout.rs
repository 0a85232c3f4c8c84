use crate::components::toast::use_toasts;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, NativeSelect, SelectOption, Spinner};
use crate::components::AddContentModal;
use crate::models::Source;
use crate::state::AppContext;
use crate::util::copy_to_clipboard;
use icons::{Brain, LogOut, Moon, Plus, Share2, Sun};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

fn source_filter_options() -> Vec<SelectOption> {
    std::iter::once((String::new(), "All".to_string()))
        .chain(
            Source::ALL
                .iter()
                .map(|s| (s.to_string(), s.label().to_string())),
        )
        .collect()
}

#[component]
fn Brand() -> impl IntoView {
    view! {
        <a href="/" class="flex items-center gap-2 text-foreground">
            <Brain class="size-6" />
            <span class="text-lg font-bold md:text-2xl">
                <span class="italic text-orange-300">"Second"</span>
                " Brain"
            </span>
        </a>
    }
}

#[component]
fn ThemeToggle() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let dark_mode = app_state.0.dark_mode;

    view! {
        <Button
            variant=ButtonVariant::Ghost
            size=ButtonSize::Icon
            attr:aria-label="Toggle theme"
            on:click=move |_| app_state.0.toggle_theme()
        >
            {move || if dark_mode.get() {
                view! { <Sun /> }.into_any()
            } else {
                view! { <Moon /> }.into_any()
            }}
        </Button>
    }
}

/// Chrome for the signed-out pages: brand, theme toggle, centered content.
#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    view! {
        <div class="flex min-h-screen flex-col bg-muted/40">
            <header class="flex items-center justify-between border-b bg-background px-4 py-3 shadow-sm">
                <Brand />
                <ThemeToggle />
            </header>
            <main class="mx-auto flex w-full max-w-md flex-1 flex-col justify-center px-4 py-12">
                {children()}
            </main>
        </div>
    }
}

/// Chrome for the content pages.
///
/// `private` turns on the owner actions (share brain, add content); public
/// shared views only get the filter and theme toggle.
#[component]
pub fn AppLayout(#[prop(optional)] private: bool, children: Children) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let toasts = use_toasts();
    let navigate = StoredValue::new(use_navigate());

    let modal_open: RwSignal<bool> = RwSignal::new(false);
    let sharing: RwSignal<bool> = RwSignal::new(false);

    let source_value: RwSignal<String> = RwSignal::new(
        app_state
            .0
            .get_source()
            .map(|s| s.to_string())
            .unwrap_or_default(),
    );

    let on_source_change = Callback::new(move |value: String| match Source::parse(&value) {
        Some(source) => app_state.0.set_source(source),
        None => app_state.0.clear_source(),
    });

    let is_authenticated = move || app_state.0.api_client.with(|c| c.is_authenticated());

    let on_share_brain = move |_: leptos::ev::MouseEvent| {
        if sharing.get_untracked() {
            return;
        }
        sharing.set(true);
        let mut api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.create_brain_link().await;
            app_state.0.adopt_client(&api_client);
            match result {
                Ok(link) => match copy_to_clipboard(&link).await {
                    Ok(()) => toasts.success("Brain link copied to clipboard!"),
                    Err(e) => {
                        log::warn!("clipboard write failed: {e}");
                        toasts.error(format!("Share link: {link}"));
                    }
                },
                Err(e) => {
                    log::error!("brain link failed: {e}");
                    toasts.error(e.share_link_message());
                }
            }
            let _ = sharing.try_set(false);
        });
    };

    let on_logout = move |_: leptos::ev::MouseEvent| {
        app_state.0.clear_token();
        log::info!("logged out");
        navigate.with_value(|nav| nav("/login", Default::default()));
    };

    view! {
        <div class="flex min-h-screen flex-col bg-muted/40">
            <header class="sticky top-0 z-30 flex flex-wrap items-center justify-between gap-3 border-b bg-background/95 px-4 py-3 shadow-sm backdrop-blur">
                <Brand />
                <div class="flex flex-wrap items-center gap-2">
                    <ThemeToggle />
                    <NativeSelect
                        id="source-filter"
                        aria_label="Filter by source"
                        options=source_filter_options()
                        bind_value=source_value
                        on_change=on_source_change
                    />
                    {private.then(|| view! {
                        <Button
                            variant=ButtonVariant::Secondary
                            size=ButtonSize::Sm
                            attr:disabled=move || sharing.get()
                            on:click=on_share_brain
                        >
                            {move || if sharing.get() {
                                view! { <Spinner /> }.into_any()
                            } else {
                                view! { <Share2 /> }.into_any()
                            }}
                            "Share brain"
                        </Button>
                        <Button size=ButtonSize::Sm on:click=move |_| modal_open.set(true)>
                            <Plus />
                            "Add content"
                        </Button>
                    })}
                    <Show
                        when=is_authenticated
                        fallback=|| view! {
                            <a
                                href="/login"
                                class="text-sm font-medium text-primary underline underline-offset-4"
                            >
                                "Log in"
                            </a>
                        }
                    >
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=on_logout
                        >
                            <LogOut />
                            "Logout"
                        </Button>
                    </Show>
                </div>
            </header>

            {private.then(|| view! { <AddContentModal open=modal_open /> })}

            <main class="flex flex-1 flex-col gap-2 p-3 pb-16">{children()}</main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_filter_options_start_with_all() {
        let options = source_filter_options();
        assert_eq!(options.len(), Source::ALL.len() + 1);
        assert_eq!(options[0], (String::new(), "All".to_string()));
        assert!(options.iter().any(|(v, _)| v == "github"));
    }
}
