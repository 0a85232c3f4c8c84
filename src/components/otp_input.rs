use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub(crate) const OTP_LENGTH: usize = 6;

/// Fixed-length one-character-per-slot buffer behind [`OtpInput`].
///
/// Mutators return the slot that should receive focus next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OtpBuffer {
    slots: Vec<Option<char>>,
}

impl OtpBuffer {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Stores the last alphanumeric character typed into `index`.
    /// Returns `None` (and changes nothing) for invalid input.
    pub fn input(&mut self, index: usize, value: &str) -> Option<usize> {
        let c = value.chars().last()?;
        if !c.is_ascii_alphanumeric() || index >= self.slots.len() {
            return None;
        }
        self.slots[index] = Some(c);
        Some((index + 1).min(self.slots.len() - 1))
    }

    /// Clears `index`, or the previous slot when `index` is already empty.
    pub fn backspace(&mut self, index: usize) -> usize {
        if index >= self.slots.len() {
            return index;
        }
        if self.slots[index].is_some() {
            self.slots[index] = None;
            index
        } else if index > 0 {
            self.slots[index - 1] = None;
            index - 1
        } else {
            0
        }
    }

    /// Replaces the whole buffer with the alphanumeric prefix of `text`.
    /// Returns `None` when nothing usable was pasted.
    pub fn paste(&mut self, text: &str) -> Option<usize> {
        let chars: Vec<char> = text
            .trim()
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .take(self.slots.len())
            .collect();
        if chars.is_empty() {
            return None;
        }
        self.clear();
        for (slot, c) in self.slots.iter_mut().zip(chars.iter()) {
            *slot = Some(*c);
        }
        Some(chars.len().min(self.slots.len() - 1))
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
}

/// `^[A-Za-z0-9]{6}$`
pub(crate) fn is_valid_otp(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.chars().all(|c| c.is_ascii_alphanumeric())
}

#[component]
pub fn OtpInput(
    /// Fired with the full code once every slot is filled.
    on_complete: Callback<String>,
    /// Fired with the current partial code on every change.
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    #[prop(default = false.into(), into)] disabled: Signal<bool>,
) -> impl IntoView {
    let buffer = RwSignal::new(OtpBuffer::new(OTP_LENGTH));
    let refs: Vec<NodeRef<html::Input>> = (0..OTP_LENGTH).map(|_| NodeRef::new()).collect();
    let refs = StoredValue::new(refs);

    let focus = move |index: usize| {
        refs.with_value(|r| {
            if let Some(el) = r.get(index).and_then(|n| n.get_untracked()) {
                let _ = el.focus();
                el.select();
            }
        });
    };

    let notify = move || {
        let b = buffer.get_untracked();
        if let Some(cb) = on_change {
            cb.run(b.code());
        }
        if b.is_complete() {
            on_complete.run(b.code());
        }
    };

    Effect::new(move |_| {
        if !disabled.get_untracked() {
            focus(0);
        }
    });

    let slot = move |index: usize| {
        let node_ref = refs.with_value(|r| r[index]);

        let on_input = move |ev: web_sys::Event| {
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let mut next = None;
            buffer.update(|b| next = b.input(index, &input.value()));
            match next {
                Some(n) => {
                    notify();
                    if n != index {
                        focus(n);
                    }
                }
                // Reject invalid characters by restoring the slot.
                None => input.set_value(
                    &buffer
                        .get_untracked()
                        .get(index)
                        .map(String::from)
                        .unwrap_or_default(),
                ),
            }
        };

        let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
            "Backspace" => {
                ev.prevent_default();
                let mut target = index;
                buffer.update(|b| target = b.backspace(index));
                notify();
                focus(target);
            }
            "ArrowLeft" if index > 0 => focus(index - 1),
            "ArrowRight" if index + 1 < OTP_LENGTH => focus(index + 1),
            _ => {}
        };

        let on_paste = move |ev: web_sys::ClipboardEvent| {
            ev.prevent_default();
            let text = ev
                .clipboard_data()
                .and_then(|d| d.get_data("text/plain").ok())
                .unwrap_or_default();
            let mut next = None;
            buffer.update(|b| next = b.paste(&text));
            if let Some(n) = next {
                notify();
                focus(n);
            }
        };

        view! {
            <input
                type="text"
                inputmode="text"
                maxlength="1"
                autocomplete="one-time-code"
                aria-label=format!("OTP digit {}", index + 1)
                class=move || {
                    let filled = buffer.with(|b| b.get(index).is_some());
                    format!(
                        "h-12 w-11 rounded-lg border-2 text-center text-lg font-semibold outline-none transition-all focus:border-ring focus:ring-2 focus:ring-ring/50 disabled:cursor-not-allowed disabled:opacity-50 {}",
                        if filled { "border-green-500 bg-green-50 dark:bg-green-900/30" } else { "border-input bg-background" },
                    )
                }
                disabled=move || disabled.get()
                prop:value=move || buffer.with(|b| b.get(index).map(String::from).unwrap_or_default())
                on:input=on_input
                on:keydown=on_keydown
                on:paste=on_paste
                on:focus=move |_| focus(index)
                node_ref=node_ref
            />
        }
    };

    let on_clear = move |_: leptos::ev::MouseEvent| {
        buffer.update(OtpBuffer::clear);
        if let Some(cb) = on_change {
            cb.run(String::new());
        }
        focus(0);
    };

    view! {
        <div class="flex flex-col items-center gap-3">
            <div class="flex gap-2">{(0..OTP_LENGTH).map(slot).collect_view()}</div>
            <Show when=move || !disabled.get() fallback=|| ().into_view()>
                <button
                    type="button"
                    class="text-xs text-muted-foreground underline hover:text-foreground"
                    on:click=on_clear
                >
                    "Clear"
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_advances_and_completes() {
        let mut b = OtpBuffer::new(3);
        assert_eq!(b.input(0, "a"), Some(1));
        assert_eq!(b.input(1, "7"), Some(2));
        assert!(!b.is_complete());
        // Last slot keeps focus.
        assert_eq!(b.input(2, "Z"), Some(2));
        assert!(b.is_complete());
        assert_eq!(b.code(), "a7Z");
    }

    #[test]
    fn test_input_rejects_non_alphanumeric() {
        let mut b = OtpBuffer::new(6);
        assert_eq!(b.input(0, "-"), None);
        assert_eq!(b.input(0, ""), None);
        assert_eq!(b.get(0), None);
        // Typing over a filled slot keeps the newest character.
        b.input(0, "1");
        assert_eq!(b.input(0, "12"), Some(1));
        assert_eq!(b.get(0), Some('2'));
    }

    #[test]
    fn test_backspace_clears_current_then_previous() {
        let mut b = OtpBuffer::new(4);
        b.input(0, "1");
        b.input(1, "2");
        assert_eq!(b.backspace(1), 1);
        assert_eq!(b.code(), "1");
        assert_eq!(b.backspace(1), 0);
        assert_eq!(b.code(), "");
        assert_eq!(b.backspace(0), 0);
    }

    #[test]
    fn test_paste_fills_from_start() {
        let mut b = OtpBuffer::new(6);
        b.input(3, "x");
        assert_eq!(b.paste(" ab12 "), Some(4));
        assert_eq!(b.code(), "ab12");
        assert_eq!(b.get(3), Some('2'));
        assert!(!b.is_complete());

        assert_eq!(b.paste("ABC123999"), Some(5));
        assert_eq!(b.code(), "ABC123");
        assert!(b.is_complete());

        assert_eq!(b.paste("!!"), None);
        assert_eq!(b.code(), "ABC123");
    }

    #[test]
    fn test_is_valid_otp() {
        assert!(is_valid_otp("a1B2c3"));
        assert!(!is_valid_otp("a1B2c"));
        assert!(!is_valid_otp("a1B2c3d"));
        assert!(!is_valid_otp("a1 2c3"));
    }
}
