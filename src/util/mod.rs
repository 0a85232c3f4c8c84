pub(crate) mod theme;

use wasm_bindgen_futures::JsFuture;

pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

pub(crate) fn set_page_title(page: &str) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        doc.set_title(&format!("{page} | Second Brain"));
    }
}

pub(crate) async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "No window".to_string())?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|_| "Clipboard write failed".to_string())
}

pub(crate) fn current_href() -> Option<String> {
    web_sys::window().and_then(|w| w.location().href().ok())
}

pub(crate) fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Keeps a 1-based page number inside `1..=total` (page 1 when there are no pages).
pub(crate) fn clamp_page(page: u32, total: u32) -> u32 {
    page.clamp(1, total.max(1))
}

pub(crate) fn format_relative_time(then_ms: i64, now_ms: i64) -> String {
    let secs = ((now_ms - then_ms) / 1000).max(0);

    let (n, unit) = if secs < 60 {
        (secs, "second")
    } else if secs < 3_600 {
        (secs / 60, "minute")
    } else if secs < 86_400 {
        (secs / 3_600, "hour")
    } else if secs < 2_592_000 {
        (secs / 86_400, "day")
    } else if secs < 31_536_000 {
        (secs / 2_592_000, "month")
    } else {
        (secs / 31_536_000, "year")
    };

    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

pub(crate) fn relative_time_from_iso(iso: &str, now_ms: i64) -> Option<String> {
    let then = chrono::DateTime::parse_from_rfc3339(iso.trim()).ok()?;
    Some(format_relative_time(then.timestamp_millis(), now_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(2, 0), 1);
    }

    #[test]
    fn test_format_relative_time_units() {
        let now = 1_700_000_000_000;
        assert_eq!(format_relative_time(now - 30_000, now), "30 seconds ago");
        assert_eq!(format_relative_time(now - 60_000, now), "1 minute ago");
        assert_eq!(format_relative_time(now - 3 * 3_600_000, now), "3 hours ago");
        assert_eq!(format_relative_time(now - 2 * 86_400_000, now), "2 days ago");
        assert_eq!(
            format_relative_time(now - 400 * 86_400_000, now),
            "1 year ago"
        );
    }

    #[test]
    fn test_format_relative_time_future_is_zero() {
        assert_eq!(format_relative_time(2_000, 1_000), "0 seconds ago");
    }

    #[test]
    fn test_relative_time_from_iso() {
        let then = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .expect("valid timestamp")
            .timestamp_millis();
        let now = then + 5 * 86_400_000;
        assert_eq!(
            relative_time_from_iso("2024-01-01T00:00:00Z", now).as_deref(),
            Some("5 days ago")
        );
        assert!(relative_time_from_iso("yesterday", now).is_none());
    }
}
