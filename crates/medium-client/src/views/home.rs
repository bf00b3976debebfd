use medium_types::Post;
use tracing::warn;

use crate::api::ApiClient;
use crate::examples::{EXAMPLE_POSTS, ExamplePost, RECOMMENDED_TAGS};
use crate::route::Route;
use crate::views::display_date;

const EXCERPT_CHARS: usize = 140;

/// One row of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: i64,
    pub title: String,
    pub tag: String,
    pub author: String,
    pub date: String,
    pub excerpt: String,
    pub image: Option<String>,
    pub href: String,
    /// Bundled with the client rather than served by the backend.
    pub example: bool,
}

impl PostCard {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            tag: "General".to_string(),
            author: post.author.clone(),
            date: display_date(&post.created_at),
            excerpt: excerpt(&post.content, EXCERPT_CHARS),
            image: post.images.first().cloned(),
            href: Route::PostDetail(post.id).path(),
            example: false,
        }
    }

    pub fn from_example(post: &ExamplePost) -> Self {
        Self {
            id: post.id,
            title: post.title.to_string(),
            tag: post.tag.to_string(),
            author: post.author.to_string(),
            date: display_date(post.date),
            excerpt: excerpt(post.content, EXCERPT_CHARS),
            image: Some(post.image.to_string()),
            href: Route::PostDetail(post.id).path(),
            example: true,
        }
    }
}

/// What the backend said about the feed. An empty feed and an unreachable
/// backend are different states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Loaded(Vec<PostCard>),
    Empty,
    Unavailable { error: String },
}

#[derive(Debug, Clone)]
pub struct HomeView {
    pub feed: FeedState,
    pub staff_picks: Vec<PostCard>,
    pub tags: &'static [&'static str],
}

impl HomeView {
    pub async fn load(api: &ApiClient) -> Self {
        let feed = match api.list_posts().await {
            Ok(posts) if posts.is_empty() => FeedState::Empty,
            Ok(posts) => FeedState::Loaded(posts.iter().map(PostCard::from_post).collect()),
            Err(e) => {
                warn!("Failed to load posts: {}", e);
                FeedState::Unavailable { error: e.to_string() }
            }
        };
        Self::with_feed(feed)
    }

    pub fn with_feed(feed: FeedState) -> Self {
        Self {
            feed,
            staff_picks: EXAMPLE_POSTS.iter().map(PostCard::from_example).collect(),
            tags: &RECOMMENDED_TAGS,
        }
    }

    /// Cards in display order: the bundled examples, then whatever the backend returned.
    pub fn cards(&self) -> Vec<PostCard> {
        let mut cards = self.staff_picks.clone();
        if let FeedState::Loaded(posts) = &self.feed {
            cards.extend(posts.iter().cloned());
        }
        cards
    }

    /// Error banner text, present only when the backend could not be loaded.
    pub fn banner(&self) -> Option<String> {
        match &self.feed {
            FeedState::Unavailable { error } => {
                Some(format!("Could not load posts from the server: {}", error))
            }
            _ => None,
        }
    }
}

/// Plain-text preview of an HTML body: tags dropped, whitespace collapsed,
/// cut to `max_chars` characters.
pub fn excerpt(html: &str, max_chars: usize) -> String {
    let mut text = String::with_capacity(html.len().min(max_chars.saturating_mul(2)));
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: "<p>Hello <strong>world</strong></p>".to_string(),
            images: vec![],
            author: "a".to_string(),
            created_at: "2025-07-17T08:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn excerpt_strips_markup_and_truncates() {
        assert_eq!(excerpt("<p>Hello <b>world</b></p>", 140), "Hello world");
        assert_eq!(excerpt("<p>a &amp; b</p>", 140), "a & b");
        assert_eq!(excerpt("<p>abcdef ghij</p>", 6), "abcdef…");
        assert_eq!(excerpt("", 10), "");
        assert_eq!(excerpt("<p>no limit</p>", usize::MAX), "no limit");
    }

    #[test]
    fn card_from_backend_post() {
        let card = PostCard::from_post(&post(42, "T"));
        assert_eq!(card.href, "/post/42");
        assert_eq!(card.tag, "General");
        assert_eq!(card.date, "July 17, 2025");
        assert_eq!(card.excerpt, "Hello world");
        assert!(!card.example);
    }

    #[test]
    fn examples_always_lead_the_feed() {
        let loaded = HomeView::with_feed(FeedState::Loaded(vec![PostCard::from_post(&post(42, "T"))]));
        let cards = loaded.cards();
        assert_eq!(cards.len(), EXAMPLE_POSTS.len() + 1);
        assert!(cards[..EXAMPLE_POSTS.len()].iter().all(|c| c.example));
        assert_eq!(cards.last().map(|c| c.id), Some(42));
        assert_eq!(loaded.banner(), None);
    }

    #[test]
    fn empty_and_unavailable_are_distinguishable() {
        let empty = HomeView::with_feed(FeedState::Empty);
        let down = HomeView::with_feed(FeedState::Unavailable { error: "connection refused".into() });

        assert_eq!(empty.cards(), down.cards());
        assert_eq!(empty.banner(), None);
        assert!(down.banner().unwrap().contains("connection refused"));
    }
}
