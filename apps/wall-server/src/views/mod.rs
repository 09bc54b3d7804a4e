//! HTML views - the wall page is rendered server-side from a `WallSnapshot`.

mod composer;
mod feed;
mod layout;
mod sidebar;

use chrono::{DateTime, Utc};
use wall_core::WallSnapshot;
use wall_core::notice::Notice;

use crate::config::Profile;

/// Render the whole wall page.
pub fn render_page(
    snapshot: &WallSnapshot,
    notices: &[Notice],
    profile: &Profile,
    now: DateTime<Utc>,
) -> String {
    let body = format!(
        r##"<div class="wall">
{sidebar}
<main class="main">
{composer}
<div class="divider"></div>
{feed}
</main>
<a class="fab" href="#composer" aria-label="New Post">+</a>
</div>"##,
        sidebar = sidebar::render(profile, snapshot.sidebar_open),
        composer = composer::render(&snapshot.composer, snapshot.busy, profile),
        feed = feed::render(snapshot, profile, now),
    );
    layout::render(&profile.name, &body, notices)
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Profile picture, or a lettered fallback when no avatar is configured.
fn avatar(profile: &Profile, class: &str) -> String {
    match &profile.avatar_url {
        Some(url) => format!(
            r#"<img class="avatar {class}" src="{}" alt="Profile">"#,
            escape(url)
        ),
        None => format!(
            r#"<span class="avatar {class} avatar-fallback">{}</span>"#,
            escape(&profile.initial().to_string())
        ),
    }
}
