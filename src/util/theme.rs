//! Dark mode preference.
//!
//! Stored in `localStorage["theme"]` as `dark` / `light` and applied as the
//! `dark` class on `<html>`. Without a stored value the system
//! `prefers-color-scheme` decides.

use crate::storage::{load_item, save_item, THEME_KEY};

pub(crate) fn read_preference() -> bool {
    if let Some(val) = load_item(THEME_KEY) {
        return val == "dark";
    }

    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map_or(false, |mq| mq.matches())
}

pub(crate) fn apply(enabled: bool) {
    if let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let class_list = el.class_list();
        if enabled {
            let _ = class_list.add_1("dark");
        } else {
            let _ = class_list.remove_1("dark");
        }
    }
}

/// Flips the theme, applies it and persists the new preference.
pub(crate) fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    save_item(THEME_KEY, if next { "dark" } else { "light" });
    next
}
