//! Top-level dispatch: decide the post kind, build content, resolve the
//! thumbnail when relevant, and make exactly one creation call.

use tracing::{info, instrument};

use crate::{
    client::LinkedInApiClient,
    config::LinkedInConfig,
    content::{build_article, build_commentary},
    error::{LinkedInError, LinkedInResult},
    thumbnail,
    types::{PostProperties, PostType},
};

/// Syndicates JF2 posts to LinkedIn.
#[derive(Debug)]
pub struct Syndicator {
    client: LinkedInApiClient,
    character_limit: usize,
}

impl Syndicator {
    /// Create a syndicator from configuration.
    ///
    /// # Errors
    /// Returns `NotConfigured` when no access token resolves.
    pub fn new(config: &LinkedInConfig) -> LinkedInResult<Self> {
        Ok(Self {
            client: LinkedInApiClient::new(config)?,
            character_limit: config.character_limit,
        })
    }

    /// Syndicate one post and return its LinkedIn permalink.
    ///
    /// The identity lookup is the only remote failure that aborts before
    /// post creation; thumbnail resolution degrades silently. Each call
    /// resolves identity afresh, nothing is cached across posts.
    ///
    /// # Errors
    /// Identity or post-creation failures propagate; callers surface
    /// [`LinkedInError::status`] where one applies.
    #[instrument(skip_all, fields(post_type = ?properties.post_type, url = properties.url.as_deref()))]
    pub async fn post(&self, properties: &PostProperties) -> LinkedInResult<String> {
        let author = self.client.get_identity().await?;
        info!(author = %author.display_name, "posting as");

        let permalink = match properties.post_type {
            PostType::Article => {
                let mut article = build_article(properties).ok_or_else(|| {
                    LinkedInError::InvalidInput("article post requires a url property".into())
                })?;
                let commentary = build_commentary(properties, self.character_limit, true);

                article.thumbnail = thumbnail::resolve(&self.client, &author.urn, properties).await;

                self.client
                    .create_post(&author.urn, &commentary, Some(&article))
                    .await?
            }
            PostType::Note => {
                let commentary = build_commentary(properties, self.character_limit, false);
                self.client
                    .create_post(&author.urn, &commentary, None)
                    .await?
            }
        };

        info!(%permalink, "post created");
        Ok(permalink)
    }
}
