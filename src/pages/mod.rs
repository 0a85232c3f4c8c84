mod auth;
mod dashboard;
mod layout;
mod shared;
mod summary;

pub use auth::{
    ForgotPasswordPage, LoginPage, RegistrationPage, ResetPasswordPage, VerifyEmailPage,
};
pub use dashboard::DashboardPage;
pub use layout::{AppLayout, AuthLayout};
pub use shared::{SharedBrainPage, SharedSummaryPage};
pub use summary::SummaryPage;

use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct VerifyRouteParams {
    pub hash_code: Option<String>,
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct ResetRouteParams {
    pub id: Option<String>,
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct SummaryRouteParams {
    pub id: Option<String>,
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct SharedSummaryRouteParams {
    pub hash: Option<String>,
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct SharedBrainRouteParams {
    pub hash_code: Option<String>,
}

/// Renders `children` inside the app chrome only with a token; otherwise sends the user to `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.api_client.with(|c| c.is_authenticated());

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show
            when=is_authenticated
            fallback=|| {
                log::debug!("no token, redirecting to /login");
                view! { <Redirect path="/login" /> }
            }
        >
            <AppLayout private=true>
                {move || children.with_value(|c| c())}
            </AppLayout>
        </Show>
    }
}

/// Public auth pages bounce to the dashboard when a token is already present.
#[component]
pub fn RedirectIfAuthed(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.api_client.with(|c| c.is_authenticated());
    let children = StoredValue::new(children);

    view! {
        <Show
            when=move || !is_authenticated()
            fallback=|| {
                log::debug!("already signed in, redirecting to /dashboard");
                view! { <Redirect path="/dashboard" /> }
            }
        >
            {move || children.with_value(|c| c())}
        </Show>
    }
}

#[component]
pub fn RootPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let target = if app_state.0.get_token().is_some() {
        "/dashboard"
    } else {
        "/login"
    };

    view! { <Redirect path=target /> }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    crate::util::set_page_title("Not Found");

    view! {
        <div class="flex min-h-screen flex-col items-center justify-center gap-2 text-sm text-muted-foreground">
            <div>"Not found"</div>
            <a class="text-primary underline underline-offset-4" href="/">"Go home"</a>
        </div>
    }
}
