use super::*;

#[test]
fn new_session_is_logged_out() {
    let session = Session::new();
    assert!(!session.is_logged_in());
    assert!(session.user().is_none());
    assert!(session.access_token().is_none());
    assert!(session.email().is_none());
    assert!(session.invariant_holds());
}

#[test]
fn default_equals_new() {
    assert_eq!(Session::default(), Session::new());
}

#[test]
fn invariant_detects_half_populated_state() {
    let broken = Session { is_logged_in: true, user: None, access_token: Some("tok".into()) };
    assert!(!broken.invariant_holds());

    let broken = Session { is_logged_in: false, user: Some(SessionUser::default()), access_token: Some("tok".into()) };
    assert!(!broken.invariant_holds());
}

#[test]
fn email_reads_through_user() {
    let session = Session {
        is_logged_in: true,
        user: Some(SessionUser { id: Some("u1".into()), email: Some("a@b.com".into()) }),
        access_token: Some("tok".into()),
    };
    assert_eq!(session.email(), Some("a@b.com"));
    assert!(session.invariant_holds());
}
