use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::http::Method;
use crate::net::testing::{ScriptedTransport, client, client_with_handler};
use crate::util::validate::{COMMENT_REQUIRED, COMMENT_TOO_LONG};

#[test]
fn empty_comment_never_reaches_the_network() {
    let transport = ScriptedTransport::new();
    let api = client(&transport);

    let result = block_on(submit_comment(&api, 7, "   \n"));

    assert!(matches!(result, Err(CommentError::Invalid(COMMENT_REQUIRED))));
    assert!(transport.requests().is_empty());
}

#[test]
fn oversized_comment_never_reaches_the_network() {
    let transport = ScriptedTransport::new();
    let api = client(&transport);
    let long = "a".repeat(1_001);

    let result = block_on(submit_comment(&api, 7, &long));

    assert!(matches!(result, Err(CommentError::Invalid(COMMENT_TOO_LONG))));
    assert!(transport.requests().is_empty());
}

#[test]
fn accepted_comment_posts_then_reloads_list() {
    let transport = ScriptedTransport::new();
    transport.push_status(200, "");
    transport.push_json(&json!([{ "id": 1, "commentText": "Ótimo curso", "username": "ana" }]));
    let api = client(&transport);

    let list = block_on(submit_comment(&api, 7, "  Ótimo curso ")).unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list[0].text, "Ótimo curso");
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[1].method, Method::Get);
    assert!(transport.urls()[0].contains("commentText="));
}

#[test]
fn expired_session_on_post_escalates_and_skips_reload() {
    let transport = ScriptedTransport::new();
    transport.push_status(401, "");
    let (api, handler) = client_with_handler(&transport);

    let result = block_on(submit_comment(&api, 7, "oi"));

    assert!(matches!(result, Err(CommentError::Api(ApiError::Unauthorized))));
    assert_eq!(handler.calls(), 1);
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn course_facts_skip_blank_attributes() {
    let course = Course {
        id: 1,
        name: "Direito".to_owned(),
        area: Some("Humanas".to_owned()),
        modality: Some("  ".to_owned()),
        duration: Some("5 anos".to_owned()),
        ..Course::default()
    };

    assert_eq!(
        course_facts(&course),
        vec![("Área", "Humanas".to_owned()), ("Duração", "5 anos".to_owned())]
    );
}
