mod api;
mod app;
mod components;
mod embed;
mod models;
mod pages;
mod state;
mod storage;
mod util;

pub use app::App;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::api::ApiClient;
    use crate::models::Source;
    use crate::storage;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_api_client_storage_roundtrip_token() {
        storage::clear_token();

        let mut c = ApiClient::load_from_storage();
        assert!(!c.is_authenticated());

        c.set_token("t1".to_string());

        let c2 = ApiClient::load_from_storage();
        assert_eq!(c2.token.as_deref(), Some("t1"));

        c.clear_token();
        let c3 = ApiClient::load_from_storage();
        assert!(c3.token.is_none());
    }

    #[wasm_bindgen_test]
    fn test_empty_token_is_not_a_session() {
        storage::save_item(storage::TOKEN_KEY, "");
        assert!(storage::load_token().is_none());
        storage::clear_token();
    }

    #[wasm_bindgen_test]
    fn test_source_storage_roundtrip() {
        storage::clear_source();
        assert_eq!(storage::load_source(), None);

        storage::save_source(Source::Github);
        assert_eq!(storage::load_source(), Some(Source::Github));

        storage::clear_source();
        assert_eq!(storage::load_source(), None);
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("api base url: {}", api::EnvConfig::new().api_url);
    mount_to_body(App);
}
