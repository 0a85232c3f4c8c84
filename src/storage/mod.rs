use crate::models::Source;

pub(crate) const TOKEN_KEY: &str = "second_brain_token";
pub(crate) const SOURCE_KEY: &str = "second_brain_source";
pub(crate) const THEME_KEY: &str = "theme";

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

// No browser storage outside wasm; native test builds see an empty store.
#[cfg(not(target_arch = "wasm32"))]
fn local_storage() -> Option<web_sys::Storage> {
    None
}

pub(crate) fn load_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub(crate) fn save_item(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

pub(crate) fn remove_item(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub(crate) fn load_token() -> Option<String> {
    load_item(TOKEN_KEY).filter(|t| !t.trim().is_empty())
}

pub(crate) fn save_token(token: &str) {
    save_item(TOKEN_KEY, token);
}

pub(crate) fn clear_token() {
    remove_item(TOKEN_KEY);
}

/// Unknown or empty values are treated as "all sources".
pub(crate) fn load_source() -> Option<Source> {
    load_item(SOURCE_KEY).and_then(|s| Source::parse(&s))
}

pub(crate) fn save_source(source: Source) {
    save_item(SOURCE_KEY, source.as_ref());
}

pub(crate) fn clear_source() {
    remove_item(SOURCE_KEY);
}
