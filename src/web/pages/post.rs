//! Post detail page.

use maud::{html, Markup};

use crate::auth::CurrentUser;
use crate::components::BaseLayout;
use crate::store::Post;

/// Parameters for the post detail page.
#[derive(Debug, Clone)]
pub struct PostDetailParams<'a> {
    pub post: &'a Post,
    pub user: Option<&'a CurrentUser>,
    pub admin_enabled: bool,
}

/// Render the post detail page.
#[must_use]
pub fn render_post_page(params: &PostDetailParams<'_>) -> Markup {
    let post = params.post;

    let content = html! {
        article {
            header {
                h1 { (post.title) }
                p class="meta" {
                    strong { "Author:" } " " (post.author)
                    br;
                    strong { "Date:" } " " (post.date)
                }
            }

            div class="post-content" {
                @for paragraph in post.content.split("\n\n") {
                    p { (paragraph) }
                }
            }

            @if !post.files.is_empty() {
                section {
                    h2 { "Attached files" }
                    // Names only; the site stores no file content.
                    ul class="file-list" {
                        @for name in &post.files {
                            li { (name) }
                        }
                    }
                }
            }
        }

        p { a href="/" { "← All case files" } }
    };

    let layout = BaseLayout::new(&post.title, params.user);
    if params.admin_enabled {
        layout.render(content)
    } else {
        layout.without_admin_nav().render(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: 4,
            title: "Checked claim".to_string(),
            author: "editor".to_string(),
            content: "First paragraph.\n\nSecond paragraph.".to_string(),
            date: "2026-02-11".to_string(),
            files: vec!["sources.pdf".to_string(), "photo.png".to_string()],
        }
    }

    #[test]
    fn test_post_page_renders_fields() {
        let post = sample_post();
        let params = PostDetailParams {
            post: &post,
            user: None,
            admin_enabled: true,
        };
        let html = render_post_page(&params).into_string();

        assert!(html.contains("Checked claim"));
        assert!(html.contains("editor"));
        assert!(html.contains("2026-02-11"));
        assert!(html.contains("<p>First paragraph.</p>"));
        assert!(html.contains("<p>Second paragraph.</p>"));
    }

    #[test]
    fn test_post_page_lists_file_names() {
        let post = sample_post();
        let params = PostDetailParams {
            post: &post,
            user: None,
            admin_enabled: true,
        };
        let html = render_post_page(&params).into_string();

        assert!(html.contains("Attached files"));
        assert!(html.contains("sources.pdf"));
        assert!(html.contains("photo.png"));
    }

    #[test]
    fn test_post_page_without_files_hides_section() {
        let mut post = sample_post();
        post.files.clear();
        let params = PostDetailParams {
            post: &post,
            user: None,
            admin_enabled: true,
        };
        let html = render_post_page(&params).into_string();
        assert!(!html.contains("Attached files"));
    }
}
