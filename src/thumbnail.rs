//! Thumbnail resolution for article posts.
//!
//! Tries the post's own photo first, then scrapes the article's source
//! page for an `og:image` (or `twitter:image`) meta tag. Every failure
//! path degrades to "no thumbnail"; nothing here can fail the post.

use scraper::{Html, Selector};
use tracing::debug;

use crate::{
    client::LinkedInApiClient,
    types::{ImageUrn, PostProperties},
};

/// Resolve the image backing an article card, if any.
///
/// The photo attempt short-circuits on success; the scrape fallback only
/// runs when there is no photo or its upload yielded no handle.
pub async fn resolve(
    client: &LinkedInApiClient,
    owner_urn: &str,
    properties: &PostProperties,
) -> Option<ImageUrn> {
    if let Some(photo_url) = properties.first_photo_url() {
        if let Some(handle) = client.upload_image(owner_urn, photo_url).await {
            return Some(handle);
        }
    }

    let page_url = properties.url.as_deref()?;
    let image_url = match client.fetch_page_text(page_url).await {
        Ok(html) => page_image_url(&html)?,
        Err(error) => {
            debug!(page_url, %error, "page fetch for thumbnail scraping failed");
            return None;
        }
    };

    debug!(page_url, image_url, "scraped page image");
    client.upload_image(owner_urn, &image_url).await
}

/// Extract the preview image URL from a page: `og:image` meta tags first,
/// then `twitter:image`.
fn page_image_url(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let og = Selector::parse(r#"meta[property="og:image"]"#).expect("valid og selector");
    let twitter = Selector::parse(r#"meta[name="twitter:image"]"#).expect("valid twitter selector");

    document
        .select(&og)
        .chain(document.select(&twitter))
        .find_map(|element| {
            element
                .value()
                .attr("content")
                .filter(|content| !content.is_empty())
        })
        .map(str::to_owned)
}
