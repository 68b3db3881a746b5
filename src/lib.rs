//! LinkedIn syndication connector.
//!
//! Takes a normalized JF2 post (the property bag produced by an IndieWeb
//! publishing pipeline) and republishes it to LinkedIn via the REST API,
//! returning the permalink of the created post.
//!
//! ## Post kinds
//!
//! - `note` (default) - plain-text commentary built from the post content,
//!   truncated to the configured character limit with the canonical
//!   permalink appended.
//! - `article` - an article card carrying source URL, title and a bounded
//!   description, with a teaser commentary and a best-effort thumbnail
//!   (the post's own photo first, then an `og:image`/`twitter:image`
//!   scrape of the source page).
//!
//! Thumbnail resolution and image upload degrade silently; the only fatal
//! remote failures are the identity lookup and post creation itself.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod client;
mod config;
mod content;
mod error;
mod syndicator;
mod thumbnail;
mod types;

pub use client::LinkedInApiClient;
pub use config::LinkedInConfig;
pub use error::{LinkedInError, LinkedInResult};
pub use syndicator::Syndicator;
pub use types::{ArticleContent, Author, Content, ImageUrn, Photo, PhotoRef, PostProperties, PostType};
