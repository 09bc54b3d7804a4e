//! Profile sidebar: a side panel on wide screens, a top bar plus drawer on narrow ones.

use crate::config::Profile;

use super::{avatar, escape};

pub fn render(profile: &Profile, drawer_open: bool) -> String {
    let info = profile_info(profile);
    let drawer = if drawer_open {
        format!(
            r#"<div class="overlay drawer-overlay">
<div class="drawer" role="dialog" aria-label="Profile Info">
<h2>Profile Info</h2>
{info}
<form method="post" action="/sidebar/close" class="actions"><button class="secondary" type="submit">Close</button></form>
</div>
</div>"#
        )
    } else {
        String::new()
    };

    format!(
        r#"<header class="topbar">
<div class="row">{avatar}<span class="post-name">{name}</span></div>
<form method="post" action="/sidebar/open"><button class="secondary" type="submit">Info</button></form>
</header>
{drawer}
<aside class="sidebar panel">{info}</aside>"#,
        avatar = avatar(profile, "size-sm"),
        name = escape(&profile.name),
    )
}

fn profile_info(profile: &Profile) -> String {
    format!(
        r#"<div class="profile">
{avatar}
<div class="row" style="flex-direction:column;gap:.1rem"><span class="name">{name}</span><span class="muted">{tagline}</span></div>
<section><span class="label">Networks</span><div>{network}</div></section>
<section><span class="label">Current City</span><div>{city}</div></section>
<div class="divider"></div>
<section><span class="label">About</span><div class="about">{about}</div></section>
</div>"#,
        avatar = avatar(profile, "size-lg"),
        name = escape(&profile.name),
        tagline = escape(&profile.tagline),
        network = escape(&profile.network),
        city = escape(&profile.city),
        about = escape(&profile.about),
    )
}
