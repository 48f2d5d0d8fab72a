//! Front page: the full post listing, newest first.

use maud::{html, Markup};

use crate::auth::CurrentUser;
use crate::components::{Alert, BaseLayout, PostCard};
use crate::store::Post;
use crate::web::{FlashLevel, FlashMessage};

/// Parameters for the front page.
#[derive(Debug, Clone)]
pub struct HomeParams<'a> {
    pub posts: &'a [Post],
    pub user: Option<&'a CurrentUser>,
    pub flash: Option<&'a FlashMessage>,
    /// Transient backend failure to surface; the page still renders.
    pub load_error: Option<&'a str>,
    /// Whether login/admin navigation is offered at all.
    pub admin_enabled: bool,
}

/// Render the front page.
#[must_use]
pub fn render_home_page(params: &HomeParams<'_>) -> Markup {
    let content = html! {
        @if let Some(flash) = params.flash {
            @match flash.level {
                FlashLevel::Success => { (Alert::success(&flash.message)) }
                FlashLevel::Error => { (Alert::error(&flash.message)) }
            }
        }
        @if let Some(error) = params.load_error {
            (Alert::error(error))
        }

        h1 { "Case files" }

        @if params.posts.is_empty() {
            p class="empty" { "No case files published yet." }
        } @else {
            section class="post-list" {
                @for post in params.posts {
                    (PostCard::new(post))
                }
            }
        }
    };

    let layout = BaseLayout::new("Home", params.user);
    if params.admin_enabled {
        layout.render(content)
    } else {
        layout.without_admin_nav().render(content)
    }
}
