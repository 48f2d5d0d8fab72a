//! Admin dashboard: create form plus the managed post list.

use maud::{html, Markup};

use crate::auth::CurrentUser;
use crate::components::{Alert, BaseLayout};
use crate::store::Post;
use crate::web::{FlashLevel, FlashMessage};

/// Parameters for the admin dashboard.
#[derive(Debug, Clone)]
pub struct AdminParams<'a> {
    pub posts: &'a [Post],
    pub user: &'a CurrentUser,
    pub flash: Option<&'a FlashMessage>,
    pub load_error: Option<&'a str>,
}

/// Render the admin dashboard.
#[must_use]
pub fn render_admin_page(params: &AdminParams<'_>) -> Markup {
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

        h1 { "Admin dashboard" }

        section {
            h2 { "New case file" }
            form method="post" action="/admin" {
                label for="title" { "Title" }
                input type="text" id="title" name="title" required;

                label for="author" { "Author" }
                input type="text" id="author" name="author" required;

                label for="content" { "Content" }
                textarea id="content" name="content" rows="8" required {}

                label for="files" { "Attached file names (one per line, names only)" }
                textarea id="files" name="files" rows="3" {}

                button type="submit" { "Add case file" }
            }
        }

        section {
            h2 { "Published case files" }
            @if params.posts.is_empty() {
                p class="empty" { "Nothing published yet." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Title" }
                            th { "Author" }
                            th { "Date" }
                            th { "Files" }
                            th { "" }
                        }
                    }
                    tbody {
                        @for post in params.posts {
                            tr {
                                td { a href=(format!("/post/{}", post.id)) { (post.title) } }
                                td { (post.author) }
                                td { (post.date) }
                                td { (post.files.len()) }
                                td {
                                    form method="post" action=(format!("/admin/delete/{}", post.id)) {
                                        button type="submit" class="danger" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    BaseLayout::new("Admin", Some(params.user)).render(content)
}
