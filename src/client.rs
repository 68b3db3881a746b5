//! LinkedIn REST API client.

use bytes::Bytes;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::{
    config::LinkedInConfig,
    error::{LinkedInError, LinkedInResult},
    types::{
        ArticleContent, Author, CreatePost, ImageUrn, InitializeUploadRequest,
        InitializeUploadResponse, UserInfo,
    },
};

/// LinkedIn REST API client.
///
/// Holds two HTTP clients: one for the bearer-authenticated API and one
/// for public fetches (image bytes, Open Graph pages), which follows
/// redirects and identifies itself as a bot.
#[derive(Debug)]
pub struct LinkedInApiClient {
    api: Client,
    fetch: Client,
    base_url: String,
    token: String,
    api_version: String,
    og_fetch_timeout: std::time::Duration,
    image_fetch_timeout: std::time::Duration,
}

impl LinkedInApiClient {
    /// Create a new API client from configuration.
    ///
    /// # Errors
    /// Returns `NotConfigured` when no access token resolves, or an HTTP
    /// error if a client fails to build.
    pub fn new(config: &LinkedInConfig) -> LinkedInResult<Self> {
        let token = config.resolved_token().ok_or(LinkedInError::NotConfigured)?;

        let api = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("linkedin-syndicator/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let fetch = Client::builder()
            .user_agent(format!(
                "linkedin-syndicator/{} (bot)",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            api,
            fetch,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token,
            api_version: config.api_version.clone(),
            og_fetch_timeout: config.og_fetch_timeout,
            image_fetch_timeout: config.image_fetch_timeout,
        })
    }

    /// Set a custom base URL (for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────────────────

    /// Fetch the authenticated member's identity. This is the one remote
    /// call whose failure aborts the whole post operation; it commonly
    /// surfaces as an authorization failure when the token has expired.
    #[instrument(skip(self))]
    pub async fn get_identity(&self) -> LinkedInResult<Author> {
        let response = self
            .api
            .get(format!("{}/v2/userinfo", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let info: UserInfo = Self::handle_response(response).await?;
        if info.sub.is_empty() {
            return Err(LinkedInError::Api {
                status: 401,
                message: "identity response carried no subject identifier".into(),
            });
        }

        debug!(sub = %info.sub, "resolved posting identity");
        Ok(Author {
            urn: format!("urn:li:person:{}", info.sub),
            display_name: info.name.unwrap_or_default(),
            id: info.sub,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Post creation
    // ─────────────────────────────────────────────────────────────────────

    /// Create a post, text-only or with an article embed, and return its
    /// permalink. Exactly one creation call per syndication request.
    #[instrument(skip_all, fields(author = %author_urn, article = article.is_some()))]
    pub async fn create_post(
        &self,
        author_urn: &str,
        commentary: &str,
        article: Option<&ArticleContent>,
    ) -> LinkedInResult<String> {
        let envelope = CreatePost::published(author_urn, commentary, article);

        let response = self
            .api
            .post(format!("{}/rest/posts", self.base_url))
            .bearer_auth(&self.token)
            .header("LinkedIn-Version", &self.api_version)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .json(&envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(response).await);
        }

        // The created entity id arrives in the x-restli-id header; fall
        // back to an id field in the body for older responses.
        let id = response
            .headers()
            .get("x-restli-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let id = match id {
            Some(id) => id,
            None => {
                let body: serde_json::Value = response.json().await.unwrap_or_default();
                body.get("id")
                    .and_then(|id| id.as_str())
                    .map(str::to_owned)
                    .ok_or_else(|| LinkedInError::Api {
                        status: status.as_u16(),
                        message: "post creation response carried no entity identifier".into(),
                    })?
            }
        };

        debug!(%id, "created post");
        Ok(format!("https://www.linkedin.com/feed/update/{id}/"))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Image upload
    // ─────────────────────────────────────────────────────────────────────

    /// Upload an image by URL via the two-phase protocol: initialize to
    /// get a one-time upload target and handle, then PUT the raw bytes.
    ///
    /// Best effort: every failure path degrades to `None`, never an error.
    #[instrument(skip(self, owner_urn))]
    pub async fn upload_image(&self, owner_urn: &str, image_url: &str) -> Option<ImageUrn> {
        match self.try_upload(owner_urn, image_url).await {
            Ok(handle) => Some(handle),
            Err(error) => {
                warn!(image_url, %error, "image upload failed, continuing without it");
                None
            }
        }
    }

    async fn try_upload(&self, owner_urn: &str, image_url: &str) -> LinkedInResult<ImageUrn> {
        let fetched = self
            .fetch
            .get(image_url)
            .timeout(self.image_fetch_timeout)
            .send()
            .await?;

        let fetch_status = fetched.status();
        if !fetch_status.is_success() {
            return Err(LinkedInError::Api {
                status: fetch_status.as_u16(),
                message: format!("image fetch returned {fetch_status}"),
            });
        }
        let bytes: Bytes = fetched.bytes().await?;

        let response = self
            .api
            .post(format!(
                "{}/rest/images?action=initializeUpload",
                self.base_url
            ))
            .bearer_auth(&self.token)
            .header("LinkedIn-Version", &self.api_version)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .json(&InitializeUploadRequest::owned_by(owner_urn))
            .send()
            .await?;

        let init: InitializeUploadResponse = Self::handle_response(response).await?;

        // Binary PUT to the one-time upload URL, same bearer credential.
        // The response body is not used.
        let put = self
            .fetch
            .put(&init.value.upload_url)
            .bearer_auth(&self.token)
            .timeout(self.image_fetch_timeout)
            .body(bytes)
            .send()
            .await?;

        let put_status = put.status();
        if !put_status.is_success() {
            return Err(LinkedInError::Api {
                status: put_status.as_u16(),
                message: format!("image upload PUT returned {put_status}"),
            });
        }

        debug!(handle = %init.value.image, "uploaded image");
        Ok(ImageUrn(init.value.image))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Page fetch (Open Graph scraping)
    // ─────────────────────────────────────────────────────────────────────

    /// Fetch a page body for meta-tag scraping, within the OG timeout.
    ///
    /// # Errors
    /// Returns an error for transport failures or non-success statuses;
    /// the thumbnail resolver swallows them.
    pub(crate) async fn fetch_page_text(&self, url: &str) -> LinkedInResult<String> {
        let response = self
            .fetch
            .get(url)
            .timeout(self.og_fetch_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LinkedInError::Api {
                status: status.as_u16(),
                message: format!("page fetch returned {status}"),
            });
        }

        Ok(response.text().await?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Response handling
    // ─────────────────────────────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(response: Response) -> LinkedInResult<T> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            serde_json::from_slice(&bytes).map_err(LinkedInError::from)
        } else {
            Err(Self::api_error(response).await)
        }
    }

    async fn api_error(response: Response) -> LinkedInError {
        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_default();

        #[derive(serde::Deserialize)]
        struct PlatformError {
            #[serde(default)]
            message: Option<String>,
        }

        let message = serde_json::from_slice::<PlatformError>(&bytes)
            .ok()
            .and_then(|error| error.message)
            .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());

        LinkedInError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
