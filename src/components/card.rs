//! Post summary card for listing pages.

use maud::{html, Markup, Render};

use crate::store::Post;

/// Maximum characters of content shown in a summary card.
const EXCERPT_LEN: usize = 240;

/// A post rendered as a summary card linking to its detail page.
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    post: &'a Post,
}

impl<'a> PostCard<'a> {
    #[must_use]
    pub const fn new(post: &'a Post) -> Self {
        Self { post }
    }

    fn excerpt(&self) -> &str {
        let content = self.post.content.as_str();
        match content.char_indices().nth(EXCERPT_LEN) {
            Some((idx, _)) => &content[..idx],
            None => content,
        }
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let truncated = post.content.chars().count() > EXCERPT_LEN;
        html! {
            article class="post-card" {
                header {
                    h3 {
                        a href=(format!("/post/{}", post.id)) { (post.title) }
                    }
                    p class="meta" {
                        (post.author) " · " (post.date)
                        @if !post.files.is_empty() {
                            " · " (post.files.len()) " file(s)"
                        }
                    }
                }
                p {
                    (self.excerpt())
                    @if truncated { "…" }
                }
            }
        }
    }
}
