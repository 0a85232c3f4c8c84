use super::{AuthLayout, ResetRouteParams, VerifyRouteParams};
use crate::api::{ApiError, LoginOutcome};
use crate::components::otp_input::is_valid_otp;
use crate::components::toast::use_toasts;
use crate::components::ui::{
    Button, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, ErrorAlert,
    Input, Label, Spinner, SuccessAlert,
};
use crate::components::OtpInput;
use crate::state::AppContext;
use crate::util::set_page_title;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params};

const MIN_PASSWORD_LEN: usize = 6;
const RESET_REDIRECT_DELAY_MS: u32 = 2_000;

pub(crate) fn validate_signup(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), String> {
    if username.trim().is_empty()
        || email.trim().is_empty()
        || password.is_empty()
        || confirm_password.is_empty()
    {
        return Err("All fields are required".to_string());
    }
    if !email.contains('@') {
        return Err("Please enter a valid email address".to_string());
    }
    validate_new_password(password, confirm_password)
}

/// Shared by signup and password reset.
pub(crate) fn validate_new_password(password: &str, confirm_password: &str) -> Result<(), String> {
    if password.is_empty() || confirm_password.is_empty() {
        return Err("Both fields are required".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    if password != confirm_password {
        return Err("Passwords do not match".to_string());
    }
    Ok(())
}

fn verify_path(hash: &str) -> String {
    format!("/verify-email/{}", urlencoding::encode(hash))
}

#[component]
fn SubmitButton(
    loading: RwSignal<bool>,
    idle: &'static str,
    busy: &'static str,
) -> impl IntoView {
    view! {
        <Button class="w-full" attr:disabled=move || loading.get()>
            <span class="inline-flex items-center gap-2">
                <Show when=move || loading.get() fallback=|| ().into_view()>
                    <Spinner />
                </Show>
                {move || if loading.get() { busy } else { idle }}
            </span>
        </Button>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    set_page_title("Login");

    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        if email_val.trim().is_empty() || password_val.is_empty() {
            error.set(Some("Email and password are required".to_string()));
            return;
        }

        let mut api_client = app_state.0.api_client.get_untracked();
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = api_client.login(&email_val, &password_val).await;
            loading.set(false);
            match result {
                Ok(LoginOutcome::Authenticated(token)) => {
                    log::info!("login succeeded");
                    app_state.0.set_token(token);
                    navigate.with_value(|nav| nav("/dashboard", Default::default()));
                }
                Ok(LoginOutcome::VerificationRequired(hash)) => {
                    log::info!("login requires email verification");
                    navigate.with_value(|nav| nav(&verify_path(&hash), Default::default()));
                }
                Err(ApiError::Unauthorized) => {
                    error.set(Some("Invalid email or password".to_string()));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <AuthLayout>
            <Card>
                <CardHeader>
                    <CardTitle class="text-xl">"Sign in"</CardTitle>
                    <CardDescription>"Welcome back to your second brain."</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <div class="flex flex-col gap-2">
                            <Label html_for="email">"Email"</Label>
                            <Input
                                id="email"
                                r#type="email"
                                autocomplete="email"
                                placeholder="you@example.com"
                                bind_value=email
                                required=true
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <div class="flex items-center justify-between">
                                <Label html_for="password">"Password"</Label>
                                <a
                                    class="text-xs text-muted-foreground underline underline-offset-4"
                                    href="/forgot-password"
                                >
                                    "Forgot password?"
                                </a>
                            </div>
                            <Input
                                id="password"
                                r#type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                bind_value=password
                                required=true
                            />
                        </div>

                        <ErrorAlert message=error />

                        <SubmitButton loading=loading idle="Login" busy="Signing in..." />
                    </form>
                </CardContent>

                <CardFooter>
                    <div class="text-xs text-muted-foreground">
                        "No account? "
                        <a class="text-primary underline underline-offset-4" href="/register">
                            "Register"
                        </a>
                    </div>
                </CardFooter>
            </Card>
        </AuthLayout>
    }
}

#[component]
pub fn RegistrationPage() -> impl IntoView {
    set_page_title("Register");

    let username: RwSignal<String> = RwSignal::new(String::new());
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let confirm_password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let toasts = use_toasts();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked();
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();

        if let Err(e) = validate_signup(
            &username_val,
            &email_val,
            &password_val,
            &confirm_password.get_untracked(),
        ) {
            error.set(Some(e));
            return;
        }

        let mut api_client = app_state.0.api_client.get_untracked();
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = api_client
                .register(&username_val, &email_val, &password_val)
                .await;
            loading.set(false);
            match result {
                Ok(hash) => {
                    toasts.success("Account created. Check your email for the code.");
                    navigate.with_value(|nav| nav(&verify_path(&hash), Default::default()));
                }
                Err(e) => {
                    log::warn!("registration failed: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <AuthLayout>
            <Card>
                <CardHeader>
                    <CardTitle class="text-xl">"Create an account"</CardTitle>
                    <CardDescription>"Save links from anywhere and find them again."</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <div class="flex flex-col gap-2">
                            <Label html_for="username">"Username"</Label>
                            <Input id="username" autocomplete="username" bind_value=username required=true />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="email">"Email"</Label>
                            <Input
                                id="email"
                                r#type="email"
                                autocomplete="email"
                                placeholder="you@example.com"
                                bind_value=email
                                required=true
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="password">"Password"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                autocomplete="new-password"
                                bind_value=password
                                required=true
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="confirm_password">"Confirm password"</Label>
                            <Input
                                id="confirm_password"
                                r#type="password"
                                autocomplete="new-password"
                                bind_value=confirm_password
                                required=true
                            />
                        </div>

                        <ErrorAlert message=error />

                        <SubmitButton loading=loading idle="Register" busy="Creating account..." />
                    </form>
                </CardContent>

                <CardFooter>
                    <div class="text-xs text-muted-foreground">
                        "Already registered? "
                        <a class="text-primary underline underline-offset-4" href="/login">"Login"</a>
                    </div>
                </CardFooter>
            </Card>
        </AuthLayout>
    }
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    set_page_title("Verify Email");

    let app_state = expect_context::<AppContext>();
    let toasts = use_toasts();
    let navigate = StoredValue::new(use_navigate());
    let params = use_params::<VerifyRouteParams>();

    let hash_code = move || {
        params
            .get()
            .ok()
            .and_then(|p| p.hash_code)
            .unwrap_or_default()
    };

    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let success: RwSignal<Option<String>> = RwSignal::new(None);
    let verifying: RwSignal<bool> = RwSignal::new(false);
    let resending: RwSignal<bool> = RwSignal::new(false);

    let on_complete = Callback::new(move |code: String| {
        if verifying.get_untracked() {
            return;
        }
        if !is_valid_otp(&code) {
            error.set(Some("Enter the 6 character code from your email".to_string()));
            return;
        }
        let hash = hash_code();
        if hash.is_empty() {
            error.set(Some("Verification link is incomplete".to_string()));
            return;
        }

        let mut api_client = app_state.0.api_client.get_untracked();
        verifying.set(true);
        error.set(None);

        spawn_local(async move {
            let result = api_client.verify_otp(&hash, &code).await;
            let _ = verifying.try_set(false);
            match result {
                Ok(res) => {
                    let _ = success.try_set(Some("Email verified successfully!".to_string()));
                    toasts.success("OTP verified successfully!");
                    match res.token.filter(|_| res.user.is_email_verified) {
                        Some(token) => {
                            app_state.0.set_token(token);
                            navigate.with_value(|nav| nav("/dashboard", Default::default()));
                        }
                        None => {
                            navigate.with_value(|nav| nav("/login", Default::default()));
                        }
                    }
                }
                Err(e) => {
                    log::warn!("otp verification failed: {e}");
                    let _ = error.try_set(Some("OTP verification failed. Please try again.".to_string()));
                }
            }
        });
    });

    let on_change = Callback::new(move |_code: String| {
        error.set(None);
    });

    let on_resend = move |_: leptos::ev::MouseEvent| {
        if resending.get_untracked() {
            return;
        }
        let hash = hash_code();
        let mut api_client = app_state.0.api_client.get_untracked();
        resending.set(true);
        spawn_local(async move {
            match api_client.resend_otp(&hash).await {
                Ok(_) => toasts.success("A new code is on its way."),
                Err(e) => toasts.error(format!("Could not resend code: {e}")),
            }
            let _ = resending.try_set(false);
        });
    };

    view! {
        <AuthLayout>
            <Card>
                <CardHeader class="text-center">
                    <CardTitle class="text-xl">"Verify your email"</CardTitle>
                    <CardDescription>
                        "Enter the 6 character code we sent to your inbox."
                    </CardDescription>
                </CardHeader>

                <CardContent class="flex flex-col gap-4">
                    <OtpInput
                        on_complete=on_complete
                        on_change=on_change
                        disabled=Signal::derive(move || verifying.get())
                    />

                    <Show when=move || verifying.get() fallback=|| ().into_view()>
                        <div class="flex items-center justify-center gap-2 text-sm text-muted-foreground">
                            <Spinner />
                            "Verifying..."
                        </div>
                    </Show>

                    <ErrorAlert message=error />
                    <SuccessAlert message=success />
                </CardContent>

                <CardFooter class="justify-center">
                    <div class="text-xs text-muted-foreground">
                        "Didn't get a code? "
                        <button
                            type="button"
                            class="text-primary underline underline-offset-4 disabled:opacity-50"
                            disabled=move || resending.get()
                            on:click=on_resend
                        >
                            {move || if resending.get() { "Sending..." } else { "Resend" }}
                        </button>
                    </div>
                </CardFooter>
            </Card>
        </AuthLayout>
    }
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    set_page_title("Forgot Password");

    let email: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let success: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let email_val = email.get_untracked();
        if email_val.trim().is_empty() {
            error.set(Some("Email is required".to_string()));
            return;
        }

        let mut api_client = app_state.0.api_client.get_untracked();
        loading.set(true);
        error.set(None);
        success.set(None);

        spawn_local(async move {
            let result = api_client.send_reset_password_email(&email_val).await;
            loading.set(false);
            match result {
                Ok(_) => success.set(Some(
                    "Reset link sent. Check your email for further instructions.".to_string(),
                )),
                Err(e) => {
                    log::warn!("reset email failed: {e}");
                    error.set(Some(format!("Failed to send reset link. {e}")));
                }
            }
        });
    };

    view! {
        <AuthLayout>
            <Card>
                <CardHeader>
                    <CardTitle class="text-xl">"Forgot password"</CardTitle>
                    <CardDescription>"We'll email you a link to choose a new one."</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <div class="flex flex-col gap-2">
                            <Label html_for="email">"Email"</Label>
                            <Input
                                id="email"
                                r#type="email"
                                autocomplete="email"
                                placeholder="you@example.com"
                                bind_value=email
                            />
                        </div>

                        <ErrorAlert message=error />
                        <SuccessAlert message=success />

                        <SubmitButton loading=loading idle="Send Reset Link" busy="Sending..." />
                    </form>
                </CardContent>

                <CardFooter>
                    <a class="text-xs text-primary underline underline-offset-4" href="/login">
                        "Back to login"
                    </a>
                </CardFooter>
            </Card>
        </AuthLayout>
    }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    set_page_title("Reset Password");

    let password: RwSignal<String> = RwSignal::new(String::new());
    let confirm_password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let success: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());
    let params = use_params::<ResetRouteParams>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let password_val = password.get_untracked();
        if let Err(e) = validate_new_password(&password_val, &confirm_password.get_untracked()) {
            error.set(Some(e));
            return;
        }
        let Some(user_id) = params.get_untracked().ok().and_then(|p| p.id) else {
            error.set(Some("Reset link is incomplete".to_string()));
            return;
        };

        let mut api_client = app_state.0.api_client.get_untracked();
        loading.set(true);
        error.set(None);
        success.set(None);

        spawn_local(async move {
            let result = api_client.reset_password(&user_id, &password_val).await;
            loading.set(false);
            match result {
                Ok(_) => {
                    success.set(Some(
                        "Password changed successfully! Redirecting to login...".to_string(),
                    ));
                    TimeoutFuture::new(RESET_REDIRECT_DELAY_MS).await;
                    navigate.with_value(|nav| nav("/login", Default::default()));
                }
                Err(e) => {
                    log::warn!("password reset failed: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <AuthLayout>
            <Card>
                <CardHeader>
                    <CardTitle class="text-xl">"Choose a new password"</CardTitle>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <div class="flex flex-col gap-2">
                            <Label html_for="password">"New password"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                autocomplete="new-password"
                                bind_value=password
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="confirm_password">"Confirm password"</Label>
                            <Input
                                id="confirm_password"
                                r#type="password"
                                autocomplete="new-password"
                                bind_value=confirm_password
                            />
                        </div>

                        <ErrorAlert message=error />
                        <SuccessAlert message=success />

                        <SubmitButton loading=loading idle="Change Password" busy="Saving..." />
                    </form>
                </CardContent>
            </Card>
        </AuthLayout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_signup_requires_every_field() {
        assert_eq!(
            validate_signup("", "a@b.c", "secret1", "secret1").unwrap_err(),
            "All fields are required"
        );
        assert_eq!(
            validate_signup("ann", "a@b.c", "secret1", "").unwrap_err(),
            "All fields are required"
        );
    }

    #[test]
    fn test_validate_signup_checks_email_and_password() {
        assert_eq!(
            validate_signup("ann", "ann.example.com", "secret1", "secret1").unwrap_err(),
            "Please enter a valid email address"
        );
        assert_eq!(
            validate_signup("ann", "ann@example.com", "abc", "abc").unwrap_err(),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            validate_signup("ann", "ann@example.com", "secret1", "secret2").unwrap_err(),
            "Passwords do not match"
        );
        assert!(validate_signup("ann", "ann@example.com", "secret1", "secret1").is_ok());
    }

    #[test]
    fn test_validate_new_password() {
        assert_eq!(
            validate_new_password("", "").unwrap_err(),
            "Both fields are required"
        );
        assert!(validate_new_password("123456", "123456").is_ok());
        assert!(validate_new_password("12345", "12345").is_err());
    }

    #[test]
    fn test_verify_path_encodes_hash() {
        assert_eq!(verify_path("a/b c"), "/verify-email/a%2Fb%20c");
    }
}
