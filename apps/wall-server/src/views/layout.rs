//! Page shell: head, stylesheet, notifications.

use wall_core::notice::Notice;

use super::escape;

const STYLESHEET: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,"Segoe UI",Roboto,sans-serif;background:#f0f2f5;color:#111827}
button{font:inherit;cursor:pointer}
button:disabled{opacity:.5;cursor:not-allowed}
.wall{display:flex;gap:2rem;padding:0 2rem;min-height:100vh}
.main{flex:1;display:flex;flex-direction:column;align-items:center;gap:1rem;padding:2rem 0;max-width:640px}
.panel,.card{width:100%;background:#fff;border:1px solid #e4e6eb;border-radius:.5rem;box-shadow:0 1px 2px rgba(0,0,0,.05)}
.card:hover{box-shadow:0 4px 8px rgba(0,0,0,.08)}
.divider{width:100%;height:1px;background:#e4e6eb;margin:.5rem 0}
.avatar{display:inline-flex;align-items:center;justify-content:center;border-radius:50%;object-fit:cover;background:#d1d5db;font-weight:600;flex-shrink:0}
.size-sm{width:2.5rem;height:2.5rem}.size-md{width:3rem;height:3rem}.size-lg{width:6rem;height:6rem;border:4px solid #fff;font-size:2rem}
.sidebar{width:260px;flex-shrink:0;align-self:flex-start;position:sticky;top:2rem;margin-top:2rem;padding:1rem}
.profile{display:flex;flex-direction:column;align-items:center;gap:1rem;font-size:.75rem}
.profile .name{font-weight:600;font-size:1rem}
.profile section{width:100%}
.muted{color:#6b7280}
.label{font-weight:500;color:#6b7280}
.about{font-size:.8rem;color:#374151;line-height:1.35}
.topbar{display:none}
.composer{padding:1rem}
.composer form,.edit-form{display:flex;flex-direction:column;gap:.5rem}
.row{display:flex;align-items:center;gap:.75rem}
textarea{flex:1;width:100%;min-height:4rem;resize:none;background:#f0f2f5;border:1px solid #e4e6eb;border-radius:.5rem;padding:.5rem;font:inherit}
.preview{width:2.5rem;height:2.5rem;object-fit:cover;border-radius:.25rem;border:1px solid #e4e6eb}
.primary{margin-left:auto;background:#2563eb;color:#fff;border:0;border-radius:.375rem;padding:.4rem 1.25rem}
.secondary{background:#fff;border:1px solid #e4e6eb;border-radius:.375rem;padding:.4rem 1rem}
.danger{background:#dc2626;color:#fff;border:0;border-radius:.375rem;padding:.4rem 1rem}
.counter{font-size:.75rem;color:#6b7280;text-align:right}
.feed{width:100%;display:flex;flex-direction:column;gap:.75rem}
.card{padding:1rem;display:flex;flex-direction:column;gap:.5rem}
.post-name{font-weight:600;font-size:15px}
.age{font-size:.75rem;color:#6b7280}
.message{white-space:pre-line;overflow-wrap:anywhere;font-size:15px;line-height:1.5}
.post-image{margin-top:.5rem;max-height:24rem;width:100%;object-fit:contain;border-radius:.375rem;border:1px solid #e4e6eb}
.menu{margin-left:auto;position:relative}
.menu summary{list-style:none;cursor:pointer;padding:0 .5rem;font-size:1.25rem}
.menu summary::-webkit-details-marker{display:none}
.menu-items{position:absolute;right:0;z-index:5;background:#fff;border:1px solid #e4e6eb;border-radius:.375rem;min-width:7rem;box-shadow:0 4px 8px rgba(0,0,0,.1)}
.menu-items button{display:block;width:100%;text-align:left;background:none;border:0;padding:.4rem .75rem}
.menu-items .delete{color:#dc2626}
.empty{width:100%;text-align:center;color:#6b7280;padding:2rem 0;background:#fff;border:1px solid #e4e6eb;border-radius:.5rem}
.retry{width:100%;display:flex;justify-content:space-between;align-items:center;color:#991b1b;background:#fef2f2;border:1px solid #fecaca;border-radius:.5rem;padding:.6rem 1rem}
.skeleton{width:100%;height:140px;border-radius:.5rem;background:linear-gradient(90deg,#e5e7eb,#f3f4f6,#e5e7eb);margin-bottom:.5rem}
.overlay{position:fixed;inset:0;z-index:40;background:rgba(0,0,0,.4);display:flex;align-items:center;justify-content:center}
.dialog{background:#fff;border-radius:.5rem;padding:1.5rem;max-width:28rem;width:90%}
.dialog h2{margin:0 0 .5rem;font-size:1.1rem}
.actions{display:flex;justify-content:flex-end;gap:.5rem;margin-top:1rem}
.toast{position:fixed;top:1rem;left:50%;transform:translateX(-50%);z-index:50;background:#ecfdf5;color:#065f46;border:1px solid #a7f3d0;border-radius:.5rem;padding:.6rem 1rem;display:flex;gap:1rem}
.toast a{color:inherit;text-decoration:none}
.drawer{position:fixed;left:0;right:0;bottom:0;z-index:40;background:#fff;border-radius:1rem 1rem 0 0;padding:2rem 1rem;box-shadow:0 -4px 16px rgba(0,0,0,.15)}
.drawer h2{text-align:center;margin:0;font-size:1rem}
.fab{display:none}
@media (max-width:639px){
.wall{flex-direction:column;gap:0;padding:0}
.sidebar{display:none}
.main{padding-top:5rem;max-width:none}
.topbar{display:flex;align-items:center;justify-content:space-between;position:fixed;top:0;left:0;right:0;z-index:20;padding:.75rem 1rem;background:#fff;border-bottom:1px solid #e4e6eb}
.fab{display:flex;position:fixed;right:1.5rem;bottom:1.5rem;z-index:30;width:3.5rem;height:3.5rem;border-radius:50%;align-items:center;justify-content:center;background:#2563eb;color:#fff;font-size:1.75rem;text-decoration:none}
}
@media (min-width:640px){.drawer-overlay{display:none}}
"#;

/// Keeps the composer counter and Share button in step with the textarea.
const SCRIPT: &str = r#"
document.querySelectorAll("textarea[data-counter]").forEach(function (area) {
  var counter = document.getElementById(area.dataset.counter);
  var submit = area.form.querySelector("button[data-submit]");
  function sync() {
    counter.textContent = (280 - area.value.length) + " characters remaining";
    if (submit && !submit.hasAttribute("data-busy")) submit.disabled = area.value.trim() === "";
  }
  area.addEventListener("input", sync);
  sync();
});
"#;

pub fn render(title: &str, body: &str, notices: &[Notice]) -> String {
    let notices: String = notices.iter().map(notice).collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Wall</title>
<style>{STYLESHEET}</style>
</head>
<body>
{body}
{notices}
<script>{SCRIPT}</script>
</body>
</html>"#,
        title = escape(title),
    )
}

fn notice(notice: &Notice) -> String {
    match notice {
        Notice::Toast(message) => format!(
            r#"<div class="toast" role="status"><span>{}</span><a href="/" aria-label="Close">×</a></div>"#,
            escape(message)
        ),
        Notice::Alert(message) => format!(
            r#"<div class="overlay" role="alertdialog" aria-modal="true"><div class="dialog"><p>{}</p><div class="actions"><a class="secondary" href="/">OK</a></div></div></div>"#,
            escape(message)
        ),
    }
}
