use super::*;
use crate::session::gate;
use crate::supabase::AuthUser;

#[test]
fn eight_pages_in_navigation_order() {
    let titles: Vec<&str> = Page::ALL.iter().map(|p| p.title()).collect();
    assert_eq!(titles, vec![
        "Dashboard Home",
        "Sales and Analytics",
        "Trends and Analysis",
        "Inventory Overview",
        "Transactions and Inventory",
        "AI Insights",
        "Reports",
        "Another Agent",
    ]);
}

#[test]
fn slugs_are_unique_and_round_trip() {
    for page in Page::ALL {
        assert_eq!(Page::from_slug(page.slug()), Some(page));
    }
    let mut slugs: Vec<&str> = Page::ALL.iter().map(|p| p.slug()).collect();
    slugs.sort_unstable();
    slugs.dedup();
    assert_eq!(slugs.len(), 8);
}

#[test]
fn unknown_slug_is_none() {
    assert_eq!(Page::from_slug("admin"), None);
}

#[test]
fn default_page_is_dashboard_at_root() {
    assert_eq!(Page::default(), Page::DashboardHome);
    assert_eq!(Page::DashboardHome.path(), "/");
    assert_eq!(Page::Reports.path(), "/pages/reports");
}

#[test]
fn dashboard_subtitle_reads_session_email() {
    let mut session = Session::new();
    let user = AuthUser { id: Some("u1".into()), email: Some("a@b.com".into()) };
    let _ = gate::establish_session(&mut session, &user, "tok");
    let before = session.clone();

    assert_eq!(Page::DashboardHome.subtitle(&session), "Welcome back, a@b.com.");
    assert_eq!(session, before);
}
