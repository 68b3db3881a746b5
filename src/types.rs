//! JF2 input model and LinkedIn REST wire types.

use serde::{Deserialize, Deserializer, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// JF2 input
// ─────────────────────────────────────────────────────────────────────────────

/// Normalized post properties, as produced by an IndieWeb publishing
/// pipeline. Read-only input; nothing in this crate mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostProperties {
    /// Post kind (default: note)
    #[serde(default, rename = "post-type")]
    pub post_type: PostType,

    /// Canonical permalink of the post
    #[serde(default)]
    pub url: Option<String>,

    /// Title
    #[serde(default)]
    pub name: Option<String>,

    /// Teaser text
    #[serde(default)]
    pub summary: Option<String>,

    /// Post content, pre-rendered markup or plain text
    #[serde(default)]
    pub content: Option<Content>,

    /// Attached photo(s)
    #[serde(default)]
    pub photo: Option<Photo>,
}

impl PostProperties {
    /// URL of the first attached photo, regardless of which of the loose
    /// JF2 shapes (`string`, `{url}`, or a sequence of either) it arrived in.
    #[must_use]
    pub fn first_photo_url(&self) -> Option<&str> {
        match self.photo.as_ref()? {
            Photo::Many(refs) => refs.first().map(PhotoRef::url),
            Photo::One(photo) => Some(photo.url()),
        }
    }
}

/// Post kind. Anything that is not `article` syndicates as a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Article,
    #[default]
    Note,
}

impl<'de> Deserialize<'de> for PostType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let kind = String::deserialize(deserializer)?;
        Ok(match kind.as_str() {
            "article" => Self::Article,
            _ => Self::Note,
        })
    }
}

/// JF2 content: either a plain string or a record with rendered markup
/// and/or a plain-text rendition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Rich {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        html: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Plain(String),
}

impl Content {
    /// Rendered markup, when present.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        match self {
            Self::Rich { html, .. } => html.as_deref(),
            Self::Plain(_) => None,
        }
    }

    /// Plain-text content, when present.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Rich { text, .. } => text.as_deref(),
            Self::Plain(text) => Some(text),
        }
    }
}

/// JF2 photo property: one reference or an ordered sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Photo {
    Many(Vec<PhotoRef>),
    One(PhotoRef),
}

/// A single photo reference: a bare URL or a record carrying one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhotoRef {
    Object {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    Url(String),
}

impl PhotoRef {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Object { url, .. } | Self::Url(url) => url,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Derived content
// ─────────────────────────────────────────────────────────────────────────────

/// The authenticated posting identity, resolved once per post operation.
#[derive(Debug, Clone)]
pub struct Author {
    /// Subject identifier from the identity endpoint
    pub id: String,

    /// Display name
    pub display_name: String,

    /// Member URN used as the post author
    pub urn: String,
}

/// Opaque handle for an uploaded image, referenced from an article embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageUrn(pub String);

impl std::fmt::Display for ImageUrn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Article card embedded in an article post. Serializes directly as the
/// `content.article` object of the post envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleContent {
    /// Source URL of the article
    pub source: String,

    /// Article title
    pub title: String,

    /// Description, at most 256 characters
    pub description: String,

    /// Uploaded thumbnail, attached after resolution succeeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageUrn>,
}

// ─────────────────────────────────────────────────────────────────────────────
// LinkedIn REST wire types
// ─────────────────────────────────────────────────────────────────────────────

/// Identity endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    /// Subject identifier
    #[serde(default)]
    pub sub: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Post creation envelope for `POST /rest/posts`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost<'a> {
    pub author: &'a str,
    pub commentary: &'a str,
    pub visibility: &'static str,
    pub distribution: Distribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PostContent<'a>>,
    pub lifecycle_state: &'static str,
    pub is_reshare_disabled_by_author: bool,
}

impl<'a> CreatePost<'a> {
    /// Standard public main-feed envelope, with an article embed when given.
    #[must_use]
    pub fn published(
        author: &'a str,
        commentary: &'a str,
        article: Option<&'a ArticleContent>,
    ) -> Self {
        Self {
            author,
            commentary,
            visibility: "PUBLIC",
            distribution: Distribution::main_feed(),
            content: article.map(|article| PostContent { article }),
            lifecycle_state: "PUBLISHED",
            is_reshare_disabled_by_author: false,
        }
    }
}

/// Post distribution settings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub feed_distribution: &'static str,
    pub target_entities: Vec<serde_json::Value>,
    pub third_party_distribution_channels: Vec<serde_json::Value>,
}

impl Distribution {
    #[must_use]
    pub fn main_feed() -> Self {
        Self {
            feed_distribution: "MAIN_FEED",
            target_entities: Vec::new(),
            third_party_distribution_channels: Vec::new(),
        }
    }
}

/// `content` member of the post envelope.
#[derive(Debug, Serialize)]
pub struct PostContent<'a> {
    pub article: &'a ArticleContent,
}

/// Request body for `POST /rest/images?action=initializeUpload`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeUploadRequest<'a> {
    pub initialize_upload_request: UploadOwner<'a>,
}

#[derive(Debug, Serialize)]
pub struct UploadOwner<'a> {
    pub owner: &'a str,
}

impl<'a> InitializeUploadRequest<'a> {
    #[must_use]
    pub fn owned_by(owner: &'a str) -> Self {
        Self {
            initialize_upload_request: UploadOwner { owner },
        }
    }
}

/// Response from upload initialization: a one-time upload target and the
/// image handle to reference from the post.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeUploadResponse {
    pub value: InitializeUploadValue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeUploadValue {
    pub upload_url: String,
    pub image: String,
}
