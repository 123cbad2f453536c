use super::*;
use crate::session::gate;
use crate::supabase::AuthUser;

fn signed_in(email: Option<&str>) -> Session {
    let mut session = Session::new();
    let user = AuthUser { id: Some("u1".into()), email: email.map(Into::into) };
    let _ = gate::establish_session(&mut session, &user, "tok");
    session
}

#[test]
fn escape_html_covers_markup_characters() {
    assert_eq!(escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
    assert_eq!(escape_html("plain"), "plain");
}

#[test]
fn fill_is_single_pass() {
    let out = fill("<p>{{A}}</p><p>{{B}}</p>", &[("A", "{{B}}"), ("B", "b")]);
    assert_eq!(out, "<p>{{B}}</p><p>b</p>");
}

#[test]
fn fill_leaves_unknown_and_unterminated_placeholders() {
    assert_eq!(fill("{{X}} and {{open", &[]), "{{X}} and {{open");
}

#[test]
fn every_view_carries_title_and_icon() {
    for html in [auth_screen(&AuthScreen::default()), navigated_app(&signed_in(Some("a@b.com")), Page::default(), None)] {
        assert!(html.contains("<title>GURU • Sidebar Dashboard</title>"));
        assert!(html.contains(PAGE_ICON));
    }
}

// =============================================================================
// auth screen
// =============================================================================

#[test]
fn auth_screen_has_both_forms_and_google_button() {
    let html = auth_screen(&AuthScreen::default());
    assert!(html.contains("Welcome to GURU"));
    assert!(html.contains("Sign in to access your analytics dashboard."));
    assert!(html.contains("action=\"/auth/sign-in\""));
    assert!(html.contains("action=\"/auth/sign-up\""));
    assert!(html.contains("Create Account"));
    assert!(html.contains("Or use your Google account:"));
    assert!(html.contains("Continue with Google"));
    assert!(!html.contains("{{"));
}

#[test]
fn auth_screen_selects_requested_tab() {
    let html = auth_screen(&AuthScreen { tab: AuthTab::SignUp, ..AuthScreen::default() });
    assert!(html.contains("id=\"tab-sign-up\" checked"));
    assert!(!html.contains("id=\"tab-sign-in\" checked"));
}

#[test]
fn auth_screen_escapes_notice_and_prefill() {
    let notice = Notice::Error("Sign-in error: <script>".into());
    let html = auth_screen(&AuthScreen {
        notice: Some(&notice),
        sign_in_email: "\"x\"@y.com",
        ..AuthScreen::default()
    });
    assert!(html.contains("notice-error"));
    assert!(html.contains("Sign-in error: &lt;script&gt;"));
    assert!(html.contains("value=\"&quot;x&quot;@y.com\""));
}

#[test]
fn auth_screen_shows_oauth_link() {
    let link = OAuthLink { prompt: "Open this link to continue Google sign-in:", url: "https://x.test/authorize?provider=google&a=b".into() };
    let html = auth_screen(&AuthScreen { oauth_link: Some(&link), ..AuthScreen::default() });
    assert!(html.contains("Open this link to continue Google sign-in:"));
    assert!(html.contains("href=\"https://x.test/authorize?provider=google&amp;a=b\""));
}

#[test]
fn auth_screen_forwards_fragment_token_to_callback() {
    // The provider may land on the site root when no redirect is configured.
    let html = auth_screen(&AuthScreen::default());
    assert!(html.contains("window.location.hash.indexOf(\"access_token=\")"));
    assert!(html.contains("window.location.replace(\"/auth/callback\" + window.location.hash)"));
}

// =============================================================================
// navigated app
// =============================================================================

#[test]
fn sidebar_shows_email_and_nav_section() {
    let html = navigated_app(&signed_in(Some("a@b.com")), Page::DashboardHome, None);
    assert!(html.contains("Signed in as: a@b.com"));
    assert!(html.contains("Navigation Bar"));
    assert!(html.contains("action=\"/auth/logout\""));
    for page in Page::ALL {
        assert!(html.contains(&format!("href=\"{}\"", page.path())));
    }
}

#[test]
fn sidebar_falls_back_to_unknown_user() {
    let html = navigated_app(&signed_in(None), Page::DashboardHome, None);
    assert!(html.contains("Signed in as: Unknown user"));
}

#[test]
fn active_page_is_marked_once() {
    let html = navigated_app(&signed_in(Some("a@b.com")), Page::AiInsights, None);
    assert_eq!(html.matches("aria-current=\"page\"").count(), 1);
    assert!(html.contains("<a href=\"/pages/ai-insights\" class=\"active\""));
    assert!(html.contains("<h1>AI Insights</h1>"));
}

#[test]
fn reports_page_has_generate_button_and_notice() {
    let notice = Notice::Error("GOOGLE_API_KEY not found. Please set it in your .env file.".into());
    let html = navigated_app(&signed_in(Some("a@b.com")), Page::Reports, Some(&notice));
    assert!(html.contains("📄 Welcome to Reports!"));
    assert!(html.contains("action=\"/pages/reports/generate\""));
    assert!(html.contains("Generate PDF Report"));
    assert!(html.contains("GOOGLE_API_KEY not found. Please set it in your .env file."));
}

#[test]
fn oauth_callback_posts_fragment_token() {
    let html = oauth_callback();
    assert!(html.contains("action=\"/auth/callback\""));
    assert!(html.contains("name=\"access_token\""));
    assert!(html.contains("window.location.hash"));
}
