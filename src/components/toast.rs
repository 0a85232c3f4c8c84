use gloo_timers::future::TimeoutFuture;
use icons::X;
use leptos::prelude::*;
use leptos::task::spawn_local;

const TOAST_TTL_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Transient notifications shown in the top-right corner.
#[derive(Clone, Copy)]
pub(crate) struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(vec![]),
            next_id: StoredValue::new(1),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        let _ = self.items.try_update(|v| v.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        self.items.update(|v| v.push(Toast { id, kind, message }));

        let toasts = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TTL_MS).await;
            toasts.dismiss(id);
        });
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="pointer-events-none fixed top-4 right-4 z-[100] flex w-80 flex-col gap-2">
            <For
                each=move || toasts.items.get()
                key=|t| t.id
                children=move |toast: Toast| {
                    let tone = match toast.kind {
                        ToastKind::Success => "border-green-500/40 bg-green-50 text-green-700 dark:bg-green-900/40 dark:text-green-300",
                        ToastKind::Error => "border-destructive/40 bg-red-50 text-destructive dark:bg-red-900/40",
                    };
                    let id = toast.id;
                    view! {
                        <div
                            role="status"
                            class=format!("pointer-events-auto flex items-start gap-2 rounded-md border px-3 py-2 text-sm shadow-lg {tone}")
                        >
                            <span class="flex-1">{toast.message}</span>
                            <button
                                type="button"
                                aria-label="Dismiss"
                                class="opacity-70 hover:opacity-100"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                <X class="size-4" />
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
