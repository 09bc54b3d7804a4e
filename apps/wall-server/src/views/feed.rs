//! Post feed: skeletons, empty state, post cards, inline edit form and delete confirmation.

use chrono::{DateTime, Utc};
use wall_core::WallSnapshot;
use wall_core::domain::Post;
use wall_core::feed::EditDraft;
use wall_core::time::time_ago;

use crate::config::Profile;

use super::{avatar, escape};

pub const EMPTY_STATE: &str = "No posts yet. Be the first to share!";

const SKELETONS: usize = 3;

const RETRY: &str = r#"<div class="retry" role="alert"><span>Posts could not be loaded.</span>
<form method="post" action="/posts/reload"><button class="secondary" type="submit">Retry</button></form></div>"#;

pub fn render(snapshot: &WallSnapshot, profile: &Profile, now: DateTime<Utc>) -> String {
    if snapshot.posts_loading {
        let skeletons = r#"<div class="skeleton"></div>"#.repeat(SKELETONS);
        return format!(r#"<div class="feed" aria-busy="true">{skeletons}</div>"#);
    }
    let retry = if snapshot.load_failed { RETRY } else { "" };
    if snapshot.posts.is_empty() {
        return format!(r#"{retry}<div class="empty">{EMPTY_STATE}</div>"#);
    }

    let cards: String = snapshot
        .posts
        .iter()
        .map(|post| {
            let header = card_header(post, profile, now);
            match snapshot.edit.draft() {
                Some(draft) if snapshot.edit.is_editing(&post.id) => {
                    edit_card(post, &header, draft, snapshot.busy)
                }
                _ => {
                    let confirming = snapshot.pending_delete.as_ref() == Some(&post.id);
                    post_card(post, &header, confirming, snapshot.busy)
                }
            }
        })
        .collect();
    format!(r#"{retry}<div class="feed">{cards}</div>"#)
}

fn card_header(post: &Post, profile: &Profile, now: DateTime<Utc>) -> String {
    format!(
        r#"{avatar}<span class="post-name">{name}</span><span class="age">{age}</span>"#,
        avatar = avatar(profile, "size-sm"),
        name = escape(&profile.name),
        age = time_ago(post.created_at, now),
    )
}

fn post_card(post: &Post, header: &str, confirming: bool, busy: bool) -> String {
    let id = escape(post.id.as_str());
    let image = post
        .image
        .as_deref()
        .map(|src| format!(r#"<img class="post-image" src="{}" alt="Post">"#, escape(src)))
        .unwrap_or_default();
    let dialog = if confirming {
        confirm_dialog(busy)
    } else {
        String::new()
    };

    format!(
        r#"<article class="card" id="post-{id}">
<div class="row">{header}
<details class="menu"><summary aria-label="Post actions">⋯</summary><div class="menu-items">
<form method="post" action="/posts/{id}/edit"><button type="submit">Edit</button></form>
<form method="post" action="/posts/{id}/delete"><button class="delete" type="submit">Delete</button></form>
</div></details>
</div>
<div class="message">{message}</div>
{image}
{dialog}
</article>"#,
        message = escape(&post.message),
    )
}

fn confirm_dialog(busy: bool) -> String {
    let disabled = if busy { " disabled" } else { "" };
    format!(
        r#"<div class="overlay" role="alertdialog" aria-modal="true"><div class="dialog">
<h2>Delete post?</h2>
<p class="muted">This action cannot be undone. Are you sure you want to delete this post?</p>
<div class="actions">
<form method="post" action="/delete/cancel"><button class="secondary" type="submit"{disabled}>Cancel</button></form>
<form method="post" action="/delete/confirm"><button class="danger" type="submit"{disabled}>Delete</button></form>
</div>
</div></div>"#
    )
}

fn edit_card(post: &Post, header: &str, draft: &EditDraft, busy: bool) -> String {
    let id = escape(post.id.as_str());
    let disabled = if busy { " disabled" } else { "" };
    let preview = draft
        .image
        .as_deref()
        .map(|src| format!(r#"<img class="preview" src="{}" alt="Preview">"#, escape(src)))
        .unwrap_or_default();

    format!(
        r#"<article class="card" id="post-{id}">
<form class="edit-form" method="post" action="/posts/{id}/save" enctype="multipart/form-data">
<div class="row">{header}</div>
<textarea name="message" maxlength="280" required data-counter="edit-counter"{disabled}>{message}</textarea>
<div class="row"><input type="file" name="image" accept="image/*"{disabled}>{preview}</div>
<div class="counter" id="edit-counter">{remaining} characters remaining</div>
<div class="actions">
<button class="secondary" type="submit" formaction="/edit/cancel" formnovalidate{disabled}>Cancel</button>
<button class="primary" type="submit"{disabled}>Save</button>
</div>
</form>
</article>"#,
        message = escape(&draft.message),
        remaining = draft.remaining(),
    )
}
