use crate::components::toast::Toasts;
use crate::components::Toaster;
use crate::pages::{
    AppLayout, DashboardPage, ForgotPasswordPage, LoginPage, NotFoundPage, RedirectIfAuthed,
    RegistrationPage, RequireAuth, ResetPasswordPage, RootPage, SharedBrainPage,
    SharedSummaryPage, SummaryPage, VerifyEmailPage,
};
use crate::state::{AppContext, AppState};
use crate::util::theme;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    theme::apply(state.dark_mode.get_untracked());
    provide_context(AppContext(state));
    provide_context(Toasts::new());

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <ErrorBoundary fallback=|errors| {
                errors.with(|e| {
                    for (_, err) in e.iter() {
                        log::error!("render error: {err}");
                    }
                });
                view! {
                    <div class="px-4 py-8 text-sm text-destructive">"Something went wrong."</div>
                }
            }>
                <Routes fallback=NotFoundPage>
                    <Route path=path!("") view=RootPage />
                    <Route path=path!("login") view=move || view! {
                        <RedirectIfAuthed>
                            <LoginPage />
                        </RedirectIfAuthed>
                    } />
                    <Route path=path!("register") view=move || view! {
                        <RedirectIfAuthed>
                            <RegistrationPage />
                        </RedirectIfAuthed>
                    } />
                    <Route path=path!("verify-email/:hash_code") view=VerifyEmailPage />
                    <Route path=path!("forgot-password") view=ForgotPasswordPage />
                    <Route path=path!("reset-password/:id") view=ResetPasswordPage />
                    <Route path=path!("dashboard") view=move || view! {
                        <RequireAuth>
                            <DashboardPage />
                        </RequireAuth>
                    } />
                    <Route path=path!("summary/:id") view=move || view! {
                        <RequireAuth>
                            <SummaryPage />
                        </RequireAuth>
                    } />
                    <Route path=path!("shared-summary/:hash") view=move || view! {
                        <AppLayout>
                            <SharedSummaryPage />
                        </AppLayout>
                    } />
                    <Route path=path!("shared-brain/:hash_code") view=move || view! {
                        <AppLayout>
                            <SharedBrainPage />
                        </AppLayout>
                    } />
                </Routes>
            </ErrorBoundary>
        </Router>
        <Toaster />
    }
}
