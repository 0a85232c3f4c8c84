use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// `(value, label)` pair rendered as an `<option>`.
pub type SelectOption = (String, String);

/// Native `<select>` styled like [`Input`](super::Input), bound to a string signal.
///
/// An empty value stands for "nothing selected"; pass it as the first option
/// to get a placeholder entry.
#[component]
pub fn NativeSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] aria_label: String,
    options: Vec<SelectOption>,
    #[prop(into)] bind_value: RwSignal<String>,
    #[prop(optional)] on_change: Option<Callback<String>>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "border-input dark:bg-input/30 h-9 rounded-md border bg-background px-2 text-sm shadow-xs outline-none focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50 hover:cursor-pointer",
        class
    );

    let on_select = move |ev: web_sys::Event| {
        if let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        {
            let value = select.value();
            bind_value.set(value.clone());
            if let Some(cb) = on_change {
                cb.run(value);
            }
        }
    };

    view! {
        <select
            data-name="NativeSelect"
            id=id
            aria-label=aria_label
            class=merged_class
            prop:value=move || bind_value.get()
            on:change=on_select
        >
            {options
                .into_iter()
                .map(|(value, label)| {
                    let v = value.clone();
                    view! {
                        <option value=value selected=move || bind_value.get() == v>
                            {label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
