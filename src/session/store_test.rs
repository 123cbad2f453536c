use super::*;
use crate::session::gate;
use crate::supabase::AuthUser;

fn store() -> SessionStore {
    SessionStore::new(Duration::from_secs(3600), false)
}

fn visitor_id(jar: &CookieJar) -> String {
    jar.get(VISITOR_COOKIE).unwrap().value().to_owned()
}

fn user(email: &str) -> AuthUser {
    AuthUser { id: Some("u1".into()), email: Some(email.into()) }
}

/// Sign a cookie-less visitor in and return the jar carrying their cookie.
async fn signed_in(store: &SessionStore, email: &str) -> CookieJar {
    let mut visit = store.visit(&CookieJar::new()).await;
    let _ = gate::establish_session(&mut visit, &user(email), "tok");
    store.keep(CookieJar::new(), visit).await
}

// =============================================================================
// bytes_to_hex / generate_visitor_id
// =============================================================================

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a, 0xff]), "0aff");
}

#[test]
fn visitor_id_is_64_hex_chars() {
    let id = generate_visitor_id();
    assert_eq!(id.len(), 64);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn visitor_ids_are_unique() {
    assert_ne!(generate_visitor_id(), generate_visitor_id());
}

// =============================================================================
// visit / keep
// =============================================================================

#[tokio::test]
async fn cookieless_logged_out_cycles_store_nothing() {
    let store = store();
    for _ in 0..5000 {
        let visit = store.visit(&CookieJar::new()).await;
        assert!(matches!(visit, Visit::Anonymous(_)));
        assert!(!visit.is_logged_in());
        let jar = store.keep(CookieJar::new(), visit).await;
        assert!(jar.get(VISITOR_COOKIE).is_none());
    }
    assert_eq!(store.visitor_count().await, 0);
}

#[tokio::test]
async fn sign_in_admits_context_and_sets_cookie() {
    let store = store();
    let jar = signed_in(&store, "a@b.com").await;
    assert_eq!(visitor_id(&jar).len(), 64);
    assert_eq!(store.visitor_count().await, 1);

    let visit = store.visit(&jar).await;
    assert!(matches!(visit, Visit::Known { .. }));
    assert_eq!(visit.email(), Some("a@b.com"));
}

#[tokio::test]
async fn returning_visitor_keeps_context_without_new_cookie() {
    let store = store();
    let jar = signed_in(&store, "a@b.com").await;

    let visit = store.visit(&jar).await;
    let after = store.keep(CookieJar::new(), visit).await;
    assert!(after.get(VISITOR_COOKIE).is_none());
    assert_eq!(store.visitor_count().await, 1);
}

#[tokio::test]
async fn sign_out_drops_context() {
    let store = store();
    let jar = signed_in(&store, "a@b.com").await;

    let mut visit = store.visit(&jar).await;
    let _ = gate::terminate_session(&mut visit);
    let _ = store.keep(jar.clone(), visit).await;
    assert_eq!(store.visitor_count().await, 0);
    assert!(matches!(store.visit(&jar).await, Visit::Anonymous(_)));
}

#[tokio::test]
async fn visitors_are_isolated() {
    let store = store();
    let a = signed_in(&store, "a@b.com").await;
    let b = signed_in(&store, "b@b.com").await;
    assert_ne!(visitor_id(&a), visitor_id(&b));
    assert_eq!(store.visit(&a).await.email(), Some("a@b.com"));
    assert_eq!(store.visit(&b).await.email(), Some("b@b.com"));
    assert_eq!(store.visitor_count().await, 2);
}

#[tokio::test]
async fn unknown_cookie_is_anonymous() {
    let store = store();
    let jar = CookieJar::new().add(Cookie::new(VISITOR_COOKIE, "stale"));
    let visit = store.visit(&jar).await;
    assert!(matches!(visit, Visit::Anonymous(_)));
    assert!(!visit.is_logged_in());
    assert_eq!(store.visitor_count().await, 0);
}

#[tokio::test]
async fn idle_context_expires_on_visit() {
    let store = SessionStore::new(Duration::ZERO, false);
    let jar = signed_in(&store, "a@b.com").await;
    assert!(matches!(store.visit(&jar).await, Visit::Anonymous(_)));
    assert_eq!(store.visitor_count().await, 0);
}

#[tokio::test]
async fn cap_evicts_least_recently_seen() {
    let store = store().with_max_contexts(2);
    let first = signed_in(&store, "1@b.com").await;
    let second = signed_in(&store, "2@b.com").await;
    // Touch the first so the second becomes the oldest.
    tokio::time::sleep(Duration::from_millis(5)).await;
    drop(store.visit(&first).await);

    let third = signed_in(&store, "3@b.com").await;
    assert_eq!(store.visitor_count().await, 2);
    assert!(matches!(store.visit(&first).await, Visit::Known { .. }));
    assert!(matches!(store.visit(&second).await, Visit::Anonymous(_)));
    assert!(matches!(store.visit(&third).await, Visit::Known { .. }));
}

#[tokio::test]
async fn cookie_flags() {
    let store = SessionStore::new(Duration::from_secs(60), true);
    let jar = signed_in(&store, "a@b.com").await;
    let cookie = jar.get(VISITOR_COOKIE).unwrap();
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
    assert!(cookie.max_age().is_none());
}
