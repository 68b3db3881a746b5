//! Content pipeline: markup normalization, truncation, and the builders
//! that turn post properties into commentary and article content.

use scraper::Html;

use crate::types::{ArticleContent, PostProperties};

/// Ellipsis marker appended when text is cut.
const ELLIPSIS: char = '\u{2026}';

/// Maximum length of an article description, in characters.
const DESCRIPTION_LIMIT: usize = 256;

/// Reduce rendered markup to plain text. Tags are dropped, anchors
/// contribute their text content only, images contribute nothing.
/// Malformed markup degrades to best-effort extraction.
#[must_use]
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Enforce the character budget on outgoing text, appending the canonical
/// permalink when it is not already embedded.
///
/// When truncation is needed the text is cut to one character short of the
/// remaining budget before the ellipsis is appended. That arithmetic is
/// load-bearing for downstream formatting; keep it as is.
#[must_use]
pub fn truncate(text: &str, permalink: Option<&str>, limit: usize) -> String {
    if text.is_empty() {
        return permalink.unwrap_or_default().to_string();
    }

    match permalink {
        Some(link) if !text.contains(link) => {
            let suffix = format!("\n\n{link}");
            let available = limit.saturating_sub(suffix.chars().count());
            if text.chars().count() > available {
                let head: String = text.chars().take(available.saturating_sub(1)).collect();
                format!("{}{ELLIPSIS}{suffix}", head.trim_end())
            } else {
                format!("{text}{suffix}")
            }
        }
        None if text.chars().count() > limit => {
            let head: String = text.chars().take(limit.saturating_sub(1)).collect();
            format!("{}{ELLIPSIS}", head.trim_end())
        }
        _ => text.to_string(),
    }
}

/// Build the post commentary.
///
/// Teaser mode (article posts) prefers the summary, then the post content.
/// Note mode prefers the post content, then the title. Either way the
/// result goes through [`truncate`] with the post permalink.
#[must_use]
pub fn build_commentary(properties: &PostProperties, limit: usize, teaser: bool) -> String {
    let text = if teaser {
        properties
            .summary
            .clone()
            .or_else(|| rendered_content(properties))
    } else {
        rendered_content(properties).or_else(|| properties.name.clone())
    };

    truncate(
        text.as_deref().unwrap_or_default(),
        properties.url.as_deref(),
        limit,
    )
}

/// Build the article card for an article post. Returns `None` when the
/// properties carry no URL, since the embed requires a source. The
/// thumbnail starts absent; the dispatcher attaches one after resolution.
#[must_use]
pub fn build_article(properties: &PostProperties) -> Option<ArticleContent> {
    let source = properties.url.clone()?;
    let description = properties
        .summary
        .clone()
        .or_else(|| rendered_content(properties))
        .unwrap_or_default();

    Some(ArticleContent {
        source,
        title: properties.name.clone().unwrap_or_else(|| "Untitled".into()),
        description: cap_description(&description),
        thumbnail: None,
    })
}

/// Normalized post content: rendered markup stripped to plain text, else
/// the plain-text content field as is.
fn rendered_content(properties: &PostProperties) -> Option<String> {
    let content = properties.content.as_ref()?;
    content
        .html()
        .map(plain_text)
        .or_else(|| content.text().map(str::to_owned))
}

/// Hard cap for article descriptions: 255 characters plus the ellipsis.
fn cap_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_LIMIT {
        let head: String = text.chars().take(DESCRIPTION_LIMIT - 1).collect();
        format!("{head}{ELLIPSIS}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, PostType};
    use serde_json::json;

    fn properties(value: serde_json::Value) -> PostProperties {
        serde_json::from_value(value).unwrap()
    }

    // ── plain_text ───────────────────────────────────────────────────────

    #[test]
    fn strips_markup_to_text() {
        assert_eq!(
            plain_text("<p>I ate a <i>cheese</i> sandwich.</p>"),
            "I ate a cheese sandwich."
        );
    }

    #[test]
    fn anchors_keep_text_and_drop_href() {
        let text = plain_text(r#"<p>Read <a href="https://e.x/more">the rest</a> here.</p>"#);
        assert_eq!(text, "Read the rest here.");
        assert!(!text.contains("https://e.x/more"));
    }

    #[test]
    fn images_contribute_nothing() {
        assert_eq!(
            plain_text(r#"<p>Before<img src="https://e.x/a.jpg" alt="a photo">after</p>"#),
            "Before after"
        );
    }

    #[test]
    fn malformed_markup_degrades_gracefully() {
        assert_eq!(plain_text("<p>unclosed <b>bold"), "unclosed bold");
        assert_eq!(plain_text(""), "");
    }

    // ── truncate ─────────────────────────────────────────────────────────

    #[test]
    fn short_text_without_permalink_is_unchanged() {
        assert_eq!(truncate("short", None, 100), "short");
    }

    #[test]
    fn empty_text_yields_permalink() {
        assert_eq!(truncate("", Some("https://e.x/p"), 100), "https://e.x/p");
        assert_eq!(truncate("", None, 100), "");
    }

    #[test]
    fn permalink_appended_when_under_budget() {
        assert_eq!(
            truncate("Hello world", Some("https://x.example/p/1"), 3000),
            "Hello world\n\nhttps://x.example/p/1"
        );
    }

    #[test]
    fn embedded_permalink_is_not_appended_twice() {
        let text = "See https://e.x/p for details";
        assert_eq!(truncate(text, Some("https://e.x/p"), 100), text);
    }

    #[test]
    fn truncation_with_permalink_respects_limit() {
        let text = "a".repeat(50);
        let out = truncate(&text, Some("https://e.x/p"), 30);
        assert!(out.ends_with("https://e.x/p"));
        assert!(out.contains('\u{2026}'));
        assert!(out.chars().count() <= 30, "got {} chars", out.chars().count());
    }

    #[test]
    fn truncation_without_permalink_trims_and_marks() {
        let out = truncate("word and more words", None, 10);
        // 9-character head "word and " loses its trailing space before the marker
        assert_eq!(out, "word and\u{2026}");
        assert!(out.chars().count() <= 10);
    }

    #[test]
    fn oversized_text_over_limit_with_embedded_permalink_is_left_alone() {
        let text = format!("{} https://e.x/p", "a".repeat(200));
        assert_eq!(truncate(&text, Some("https://e.x/p"), 100), text);
    }

    // ── build_commentary ─────────────────────────────────────────────────

    #[test]
    fn note_prefers_rendered_content() {
        let properties = properties(json!({
            "name": "Title",
            "content": { "html": "<p>From <b>markup</b></p>", "text": "from text" },
            "url": "https://e.x/p"
        }));
        assert_eq!(
            build_commentary(&properties, 3000, false),
            "From markup\n\nhttps://e.x/p"
        );
    }

    #[test]
    fn note_falls_back_to_text_then_name() {
        let with_text = properties(json!({
            "name": "Title",
            "content": { "text": "plain words" },
            "url": "https://e.x/p"
        }));
        assert_eq!(
            build_commentary(&with_text, 3000, false),
            "plain words\n\nhttps://e.x/p"
        );

        let name_only = properties(json!({ "name": "Title", "url": "https://e.x/p" }));
        assert_eq!(
            build_commentary(&name_only, 3000, false),
            "Title\n\nhttps://e.x/p"
        );
    }

    #[test]
    fn empty_note_degrades_to_permalink() {
        let bare = properties(json!({ "url": "https://e.x/p" }));
        assert_eq!(build_commentary(&bare, 3000, false), "https://e.x/p");
    }

    #[test]
    fn teaser_prefers_summary_over_content() {
        let properties = properties(json!({
            "summary": "A teaser.",
            "content": "Full body",
            "url": "https://e.x/a/1"
        }));
        assert_eq!(
            build_commentary(&properties, 3000, true),
            "A teaser.\n\nhttps://e.x/a/1"
        );
    }

    #[test]
    fn teaser_falls_back_to_content() {
        let properties = properties(json!({
            "content": { "html": "<p>Body text</p>" },
            "url": "https://e.x/a/1"
        }));
        assert_eq!(
            build_commentary(&properties, 3000, true),
            "Body text\n\nhttps://e.x/a/1"
        );
    }

    // ── build_article ────────────────────────────────────────────────────

    #[test]
    fn article_requires_a_source_url() {
        assert!(build_article(&PostProperties::default()).is_none());
    }

    #[test]
    fn article_defaults_title_and_starts_without_thumbnail() {
        let article = build_article(&properties(json!({ "url": "https://e.x/a/1" }))).unwrap();
        assert_eq!(article.source, "https://e.x/a/1");
        assert_eq!(article.title, "Untitled");
        assert_eq!(article.description, "");
        assert!(article.thumbnail.is_none());
    }

    #[test]
    fn long_description_caps_at_256_characters() {
        let article = build_article(&properties(json!({
            "url": "https://e.x/a/1",
            "name": "Title",
            "summary": "x".repeat(300)
        })))
        .unwrap();
        assert_eq!(article.description.chars().count(), 256);
        assert!(article.description.ends_with('\u{2026}'));
    }

    #[test]
    fn boundary_description_is_untouched() {
        let article = build_article(&properties(json!({
            "url": "https://e.x/a/1",
            "summary": "x".repeat(256)
        })))
        .unwrap();
        assert_eq!(article.description.chars().count(), 256);
        assert!(!article.description.ends_with('\u{2026}'));
    }

    #[test]
    fn description_falls_back_to_rendered_content() {
        let article = build_article(&properties(json!({
            "url": "https://e.x/a/1",
            "content": { "html": "<p>Body <i>text</i></p>" }
        })))
        .unwrap();
        assert_eq!(article.description, "Body text");
    }

    #[test]
    fn unknown_post_type_reads_as_note() {
        let properties = properties(json!({ "post-type": "bookmark" }));
        assert_eq!(properties.post_type, PostType::Note);
    }

    #[test]
    fn plain_string_content_flows_through() {
        let properties = PostProperties {
            content: Some(Content::Plain("just words".into())),
            ..Default::default()
        };
        assert_eq!(build_commentary(&properties, 3000, false), "just words");
    }
}
