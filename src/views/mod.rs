//! Server-rendered HTML for the two top-level views.
//!
//! Templates live under `templates/` and are filled with `{{KEY}}`
//! placeholders. Substitution is a single pass, so a value that happens to
//! contain a placeholder is never expanded again. Every visitor-supplied or
//! remote-supplied value is escaped before it is inserted.

use std::fmt::Write;

use crate::pages::{NAV_SECTION, Page};
use crate::services::Notice;
use crate::services::auth::OAuthLink;
use crate::session::Session;

pub const PAGE_TITLE: &str = "GURU • Sidebar Dashboard";
pub const PAGE_ICON: &str = "🧠";
pub const UNKNOWN_USER: &str = "Unknown user";

const LAYOUT_TEMPLATE: &str = include_str!("../../templates/layout.html");
const AUTH_TEMPLATE: &str = include_str!("../../templates/auth.html");
const APP_TEMPLATE: &str = include_str!("../../templates/app.html");
const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");
const REPORTS_TEMPLATE: &str = include_str!("../../templates/reports.html");
const OAUTH_CALLBACK_TEMPLATE: &str = include_str!("../../templates/oauth_callback.html");

/// Which auth tab is open when the screen renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    SignIn,
    SignUp,
}

/// Everything the auth screen shows besides its fixed copy.
#[derive(Debug, Default)]
pub struct AuthScreen<'a> {
    pub tab: AuthTab,
    pub notice: Option<&'a Notice>,
    pub oauth_link: Option<&'a OAuthLink>,
    pub sign_in_email: &'a str,
    pub sign_up_email: &'a str,
}

#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Replace `{{KEY}}` placeholders in one pass. Unknown keys are left as-is.
pub(crate) fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn layout(body_class: &str, body: &str) -> String {
    fill(LAYOUT_TEMPLATE, &[
        ("TITLE", escape_html(PAGE_TITLE).as_str()),
        ("ICON", PAGE_ICON),
        ("BODY_CLASS", body_class),
        ("BODY", body),
    ])
}

fn notice_html(notice: Option<&Notice>) -> String {
    notice.map_or_else(String::new, |n| {
        format!(
            "<div class=\"notice notice-{}\" role=\"status\">{}</div>",
            n.level(),
            escape_html(n.text())
        )
    })
}

fn oauth_link_html(link: Option<&OAuthLink>) -> String {
    link.map_or_else(String::new, |l| {
        let url = escape_html(&l.url);
        format!(
            "<div class=\"notice notice-info\">{}<br><a href=\"{url}\">{url}</a></div>",
            escape_html(l.prompt)
        )
    })
}

/// The unauthenticated view: tabs for sign-in and sign-up.
#[must_use]
pub fn auth_screen(screen: &AuthScreen<'_>) -> String {
    let (sign_in_checked, sign_up_checked) = match screen.tab {
        AuthTab::SignIn => ("checked", ""),
        AuthTab::SignUp => ("", "checked"),
    };
    let body = fill(AUTH_TEMPLATE, &[
        ("NOTICE", notice_html(screen.notice).as_str()),
        ("SIGN_IN_CHECKED", sign_in_checked),
        ("SIGN_UP_CHECKED", sign_up_checked),
        ("SIGN_IN_EMAIL", escape_html(screen.sign_in_email).as_str()),
        ("SIGN_UP_EMAIL", escape_html(screen.sign_up_email).as_str()),
        ("OAUTH_LINK", oauth_link_html(screen.oauth_link).as_str()),
    ]);
    layout("auth", &body)
}

fn nav_html(active: Page) -> String {
    let mut nav = String::new();
    for page in Page::ALL {
        let class = if page == active { " class=\"active\" aria-current=\"page\"" } else { "" };
        let _ = writeln!(nav, "      <li><a href=\"{}\"{class}>{}</a></li>", page.path(), escape_html(page.title()));
    }
    nav
}

fn page_body(session: &Session, page: Page, notice: Option<&Notice>) -> String {
    let subtitle = escape_html(&page.subtitle(session));
    let notice = notice_html(notice);
    match page {
        Page::Reports => fill(REPORTS_TEMPLATE, &[("SUBTITLE", subtitle.as_str()), ("NOTICE", notice.as_str())]),
        other => fill(PAGE_TEMPLATE, &[
            ("TITLE", escape_html(other.title()).as_str()),
            ("SUBTITLE", subtitle.as_str()),
            ("NOTICE", notice.as_str()),
        ]),
    }
}

/// The authenticated view: sidebar plus the selected page.
#[must_use]
pub fn navigated_app(session: &Session, page: Page, notice: Option<&Notice>) -> String {
    let email = escape_html(session.email().unwrap_or(UNKNOWN_USER));
    let body = fill(APP_TEMPLATE, &[
        ("EMAIL", email.as_str()),
        ("NAV_SECTION", NAV_SECTION),
        ("NAV", nav_html(page).as_str()),
        ("PAGE", page_body(session, page, notice).as_str()),
    ]);
    layout("app", &body)
}

/// Landing page for the OAuth provider redirect. The token arrives in the
/// URL fragment, which only the browser can read, so the page posts it back.
#[must_use]
pub fn oauth_callback() -> String {
    layout("auth", OAUTH_CALLBACK_TEMPLATE)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
