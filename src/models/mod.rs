use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Platform a saved link comes from.
///
/// The backend stores the lowercase tag (`"youtube"`, `"twitter"`, ...).
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(crate) enum Source {
    Youtube,
    #[strum(to_string = "twitter", serialize = "x")]
    Twitter,
    Facebook,
    Github,
}

impl Source {
    pub const ALL: [Source; 4] = [
        Source::Youtube,
        Source::Twitter,
        Source::Facebook,
        Source::Github,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse().ok()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Source::Youtube => "YouTube",
            Source::Twitter => "Twitter/X",
            Source::Facebook => "Facebook",
            Source::Github => "GitHub",
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(crate) enum ContentType {
    Video,
    Image,
    Audio,
    Article,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Video,
        ContentType::Image,
        ContentType::Audio,
        ContentType::Article,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Video => "Video",
            ContentType::Image => "Image",
            ContentType::Audio => "Audio",
            ContentType::Article => "Article",
        }
    }
}

/// One saved item.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Content {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub link: String,
    pub source: Source,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One page of saved items plus the total number of matching items.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub(crate) struct ContentPage {
    #[serde(default)]
    pub content: Vec<Content>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_email_verified: bool,
}

/// Subset of the GitHub `GET /repos/{owner}/{repo}` payload shown on cards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct GithubRepo {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub html_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse_accepts_x_alias_and_case() {
        assert_eq!(Source::parse("youtube"), Some(Source::Youtube));
        assert_eq!(Source::parse("GitHub"), Some(Source::Github));
        assert_eq!(Source::parse("x"), Some(Source::Twitter));
        assert_eq!(Source::parse(" twitter "), Some(Source::Twitter));
        assert_eq!(Source::parse("none"), None);
        assert_eq!(Source::parse(""), None);
    }

    #[test]
    fn test_source_display_is_wire_tag() {
        assert_eq!(Source::Twitter.to_string(), "twitter");
        assert_eq!(Source::Facebook.as_ref(), "facebook");
    }

    #[test]
    fn test_content_deserialize_backend_shape() {
        let json = r#"{
            "_id": "665f1c",
            "title": "Talk",
            "link": "https://www.youtube.com/watch?v=6t6ZYsLXMWU",
            "source": "youtube",
            "type": "video",
            "userId": "u1"
        }"#;
        let c: Content = serde_json::from_str(json).expect("content should parse");
        assert_eq!(c.id, "665f1c");
        assert_eq!(c.source, Source::Youtube);
        assert_eq!(c.content_type, Some(ContentType::Video));
        assert!(c.summary.is_none());
    }

    #[test]
    fn test_content_page_defaults_when_fields_missing() {
        let page: ContentPage = serde_json::from_str("{}").expect("empty page should parse");
        assert!(page.content.is_empty());
        assert_eq!(page.count, 0);
    }

    #[test]
    fn test_user_camel_case_fields() {
        let json = r#"{"_id":"1","username":"u","email":"u@example.com","isEmailVerified":true}"#;
        let u: User = serde_json::from_str(json).expect("user should parse");
        assert!(u.is_email_verified);
        assert_eq!(u.email, "u@example.com");
    }
}
