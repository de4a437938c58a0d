use super::*;

#[test]
fn auth_failures_read_as_bad_credentials() {
    assert_eq!(login_failure_message(&ApiError::Unauthorized), BAD_CREDENTIALS);
    assert_eq!(login_failure_message(&ApiError::Forbidden), BAD_CREDENTIALS);
}

#[test]
fn other_failures_read_as_generic_error() {
    assert_eq!(login_failure_message(&ApiError::Transport("offline".to_owned())), LOGIN_FAILED);
    assert_eq!(login_failure_message(&ApiError::from_status(500, String::new())), LOGIN_FAILED);
}
