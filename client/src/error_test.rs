use super::*;

#[test]
fn from_status_maps_auth_codes() {
    assert_eq!(ApiError::from_status(401, String::new()), ApiError::Unauthorized);
    assert_eq!(ApiError::from_status(403, String::new()), ApiError::Forbidden);
}

#[test]
fn from_status_keeps_body_for_other_codes() {
    let err = ApiError::from_status(500, "boom".to_owned());
    assert_eq!(err, ApiError::Status { status: 500, body: "boom".to_owned() });
    assert_eq!(err.status(), Some(500));
}

#[test]
fn is_auth_failure_only_for_401_and_403() {
    assert!(ApiError::Unauthorized.is_auth_failure());
    assert!(ApiError::Forbidden.is_auth_failure());
    assert!(!ApiError::from_status(404, String::new()).is_auth_failure());
    assert!(!ApiError::Transport("offline".to_owned()).is_auth_failure());
}

#[test]
fn transport_errors_have_no_status() {
    assert_eq!(ApiError::Transport("offline".to_owned()).status(), None);
    assert_eq!(ApiError::Unavailable.status(), None);
}
