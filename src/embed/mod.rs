//! Link helpers for rendering saved items per source.
//!
//! Everything here is string-level parsing so it can run (and be tested)
//! without a browser.

use crate::models::Source;
use regex::Regex;
use std::sync::LazyLock;

static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?|shorts)/|.*[?&]v=)|youtu\.be/)([^"&?/ ]{11})"#,
    )
    .expect("static regex is valid")
});

pub(crate) struct UrlParts<'a> {
    pub scheme: &'a str,
    pub host: &'a str,
    /// Path, query and fragment, starting with `/` when present.
    pub rest: &'a str,
}

pub(crate) fn split_url(url: &str) -> Option<UrlParts<'_>> {
    let url = url.trim();
    let (scheme, after) = url.split_once("://")?;
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return None;
    }
    let end = after.find(['/', '?', '#']).unwrap_or(after.len());
    let host = &after[..end];
    if host.is_empty() {
        return None;
    }
    Some(UrlParts {
        scheme,
        host,
        rest: &after[end..],
    })
}

pub(crate) fn is_http_url(url: &str) -> bool {
    split_url(url).is_some()
}

/// `url` trimmed, when it is safe to render as a link target.
pub(crate) fn external_href(url: &str) -> Option<&str> {
    is_http_url(url).then(|| url.trim())
}

fn bare_host(host: &str) -> String {
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    let host = host.split(':').next().unwrap_or(host).to_ascii_lowercase();
    host.strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .map(str::to_string)
        .unwrap_or(host)
}

/// Guesses the source from the link host.
pub(crate) fn detect_source(url: &str) -> Option<Source> {
    let parts = split_url(url)?;
    match bare_host(parts.host).as_str() {
        "youtube.com" | "youtu.be" | "music.youtube.com" => Some(Source::Youtube),
        "x.com" | "twitter.com" | "mobile.twitter.com" => Some(Source::Twitter),
        "facebook.com" | "fb.watch" | "web.facebook.com" => Some(Source::Facebook),
        "github.com" => Some(Source::Github),
        _ => None,
    }
}

pub(crate) fn youtube_video_id(url: &str) -> Option<String> {
    YOUTUBE_ID_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

pub(crate) fn youtube_embed_url(url: &str) -> Option<String> {
    youtube_video_id(url).map(|id| format!("https://www.youtube.com/embed/{id}"))
}

/// The twitter.com widget script only recognises twitter.com permalinks.
/// `None` for anything that is not an http(s) link.
pub(crate) fn twitter_embed_url(url: &str) -> Option<String> {
    let parts = split_url(url)?;
    if bare_host(parts.host) == "x.com" {
        Some(format!("https://twitter.com{}", parts.rest))
    } else {
        Some(url.trim().to_string())
    }
}

fn is_facebook_plugin_url(url: &str) -> bool {
    split_url(url).is_some_and(|parts| {
        matches!(bare_host(parts.host).as_str(), "facebook.com" | "web.facebook.com")
            && parts.rest.starts_with("/plugins/")
    })
}

/// Iframe `src` for a Facebook link. Only facebook.com plugin URLs pass
/// through; everything else is wrapped as the plugin's `href` parameter.
pub(crate) fn facebook_embed_url(url: &str) -> String {
    let url = url.trim();
    if is_facebook_plugin_url(url) {
        return url.to_string();
    }
    let plugin = if url.contains("/videos/") || url.contains("/watch") || url.contains("fb.watch") {
        "video.php"
    } else {
        "post.php"
    };
    format!(
        "https://www.facebook.com/plugins/{plugin}?href={}&show_text=true&width=300",
        urlencoding::encode(url)
    )
}

/// `(owner, repo)` for `https://github.com/<owner>/<repo>[/...]`.
pub(crate) fn parse_github_repo(url: &str) -> Option<(String, String)> {
    let parts = split_url(url)?;
    if bare_host(parts.host) != "github.com" {
        return None;
    }
    let path = parts.rest.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_video_id_variants() {
        let id = Some("6t6ZYsLXMWU".to_string());
        assert_eq!(youtube_video_id("https://www.youtube.com/watch?v=6t6ZYsLXMWU"), id);
        assert_eq!(youtube_video_id("https://youtu.be/6t6ZYsLXMWU?t=42"), id);
        assert_eq!(youtube_video_id("https://www.youtube.com/embed/6t6ZYsLXMWU"), id);
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?feature=share&v=6t6ZYsLXMWU"),
            id
        );
        assert_eq!(youtube_video_id("https://www.youtube.com/shorts/6t6ZYsLXMWU"), id);
        assert_eq!(youtube_video_id("https://vimeo.com/123"), None);
    }

    #[test]
    fn test_youtube_embed_url() {
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/watch?v=6t6ZYsLXMWU").as_deref(),
            Some("https://www.youtube.com/embed/6t6ZYsLXMWU")
        );
    }

    #[test]
    fn test_twitter_embed_url_rewrites_only_the_host() {
        assert_eq!(
            twitter_embed_url("https://x.com/someone/status/1921174163848401313").as_deref(),
            Some("https://twitter.com/someone/status/1921174163848401313")
        );
        // Paths containing an "x" stay untouched.
        assert_eq!(
            twitter_embed_url("https://twitter.com/xavier/status/1").as_deref(),
            Some("https://twitter.com/xavier/status/1")
        );
        assert_eq!(twitter_embed_url("javascript:alert(1)//x.com/"), None);
    }

    #[test]
    fn test_facebook_embed_url() {
        let plugin = "https://www.facebook.com/plugins/video.php?height=476&href=x";
        assert_eq!(facebook_embed_url(plugin), plugin);

        let post = facebook_embed_url("https://www.facebook.com/photo/?fbid=308");
        assert!(post.starts_with("https://www.facebook.com/plugins/post.php?href=https%3A%2F%2F"));

        let video = facebook_embed_url("https://www.facebook.com/Girliyapa/videos/937/");
        assert!(video.contains("/plugins/video.php"));
    }

    #[test]
    fn test_facebook_embed_url_only_trusts_facebook_plugins() {
        let script = "javascript:alert(document.cookie)//plugins/";
        let wrapped = facebook_embed_url(script);
        assert!(wrapped.starts_with("https://www.facebook.com/plugins/post.php?href=javascript%3A"));

        let other_host = facebook_embed_url("https://evil.example/plugins/x.html");
        assert!(other_host.starts_with("https://www.facebook.com/plugins/post.php?href=https%3A"));

        let userinfo = facebook_embed_url("https://facebook.com@evil.example/plugins/x.html");
        assert!(userinfo.starts_with("https://www.facebook.com/plugins/"));
        assert_ne!(userinfo, "https://facebook.com@evil.example/plugins/x.html");

        // A plugin path must start the path, not merely appear in it.
        let nested = facebook_embed_url("https://www.facebook.com/x/plugins/video.php");
        assert!(nested.starts_with("https://www.facebook.com/plugins/post.php?href="));
    }

    #[test]
    fn test_parse_github_repo() {
        assert_eq!(
            parse_github_repo("https://github.com/SMGhulam29091993/Second-Brain"),
            Some(("SMGhulam29091993".to_string(), "Second-Brain".to_string()))
        );
        assert_eq!(
            parse_github_repo("https://github.com/rust-lang/rust.git"),
            Some(("rust-lang".to_string(), "rust".to_string()))
        );
        assert_eq!(
            parse_github_repo("https://github.com/leptos-rs/leptos/tree/main?tab=readme"),
            Some(("leptos-rs".to_string(), "leptos".to_string()))
        );
        assert_eq!(parse_github_repo("https://github.com/only-owner"), None);
        assert_eq!(parse_github_repo("https://gitlab.com/a/b"), None);
    }

    #[test]
    fn test_detect_source() {
        assert_eq!(detect_source("https://youtu.be/abc"), Some(Source::Youtube));
        assert_eq!(detect_source("https://x.com/a/status/1"), Some(Source::Twitter));
        assert_eq!(detect_source("https://m.facebook.com/p"), Some(Source::Facebook));
        assert_eq!(detect_source("https://GitHub.com/a/b"), Some(Source::Github));
        assert_eq!(detect_source("https://example.com"), None);
        assert_eq!(detect_source("not a url"), None);
    }

    #[test]
    fn test_external_href_rejects_script_links() {
        assert_eq!(
            external_href(" https://github.com/a/b "),
            Some("https://github.com/a/b")
        );
        assert_eq!(external_href("javascript:alert(1)"), None);
        assert_eq!(external_href("data:text/html,hi"), None);
        assert_eq!(external_href("//evil.example"), None);
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://example.com"));
        assert!(is_http_url("http://example.com/path"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("example.com"));
    }
}
