//! Post composer form.

use wall_core::composer::Composer;

use crate::config::Profile;

use super::{avatar, escape};

pub fn render(composer: &Composer, busy: bool, profile: &Profile) -> String {
    let preview = composer
        .image()
        .map(|src| format!(r#"<img class="preview" src="{}" alt="Preview">"#, escape(src)))
        .unwrap_or_default();
    let busy_attrs = if busy { " disabled data-busy" } else { "" };

    format!(
        r#"<div class="panel composer" id="composer">
<form method="post" action="/posts" enctype="multipart/form-data" autocomplete="off">
<div class="row" style="align-items:flex-start">{avatar}<textarea name="message" maxlength="280" placeholder="What's on your mind?" required data-counter="composer-counter">{text}</textarea></div>
<div class="row">
<input type="file" name="image" accept="image/*">
{preview}
<button class="primary" type="submit" data-submit{busy_attrs}>Share</button>
</div>
<div class="counter" id="composer-counter">{remaining} characters remaining</div>
</form>
</div>"#,
        avatar = avatar(profile, "size-md"),
        text = escape(composer.text()),
        remaining = composer.remaining(),
    )
}
