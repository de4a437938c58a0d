use super::*;

#[test]
fn conflict_mentions_existing_account() {
    let message = registration_failure_message(&ApiError::from_status(409, String::new()));
    assert!(message.contains("Já existe"));
}

#[test]
fn validation_statuses_ask_to_review_fields() {
    assert_eq!(
        registration_failure_message(&ApiError::from_status(422, String::new())),
        "Confira os dados informados."
    );
}

#[test]
fn network_errors_fall_back_to_generic_message() {
    let message = registration_failure_message(&ApiError::Transport("offline".to_owned()));
    assert!(message.starts_with("Não foi possível"));
}
