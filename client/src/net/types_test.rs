use super::*;

fn identity(value: serde_json::Value) -> Identity {
    serde_json::from_value(value).unwrap()
}

// =============================================================
// Identity
// =============================================================

#[test]
fn identity_keeps_unknown_attributes() {
    let id = identity(serde_json::json!({ "id": 9, "username": "ana", "favoriteColor": "blue" }));
    assert_eq!(id.attr("favoriteColor").as_deref(), Some("blue"));
    assert_eq!(id.id().as_deref(), Some("9"));
}

#[test]
fn identity_display_name_prefers_username_then_name_then_email() {
    assert_eq!(identity(serde_json::json!({ "username": "ana", "email": "a@b" })).display_name(), "ana");
    assert_eq!(identity(serde_json::json!({ "name": "Ana", "email": "a@b" })).display_name(), "Ana");
    assert_eq!(identity(serde_json::json!({ "username": "", "email": "a@b" })).display_name(), "a@b");
    assert_eq!(identity(serde_json::json!({})).display_name(), "Usuário");
}

#[test]
fn identity_is_admin_accepts_spring_style_roles() {
    assert!(identity(serde_json::json!({ "role": "ADMIN" })).is_admin());
    assert!(identity(serde_json::json!({ "role": "ROLE_ADMIN" })).is_admin());
    assert!(!identity(serde_json::json!({ "role": "USER" })).is_admin());
    assert!(!identity(serde_json::json!({})).is_admin());
}

#[test]
fn identity_serializes_back_to_the_same_object() {
    let raw = serde_json::json!({ "id": 1, "role": "USER" });
    assert_eq!(serde_json::to_value(identity(raw.clone())).unwrap(), raw);
}

// =============================================================
// Catalogue
// =============================================================

#[test]
fn course_tolerates_missing_optional_fields() {
    let course: Course = serde_json::from_value(serde_json::json!({ "id": 3, "name": "Medicina" })).unwrap();
    assert_eq!(course.id, 3);
    assert_eq!(course.institution_name, None);
}

#[test]
fn course_reads_camel_case_fields() {
    let course: Course = serde_json::from_value(serde_json::json!({
        "id": 3,
        "name": "Medicina",
        "institutionId": 4,
        "institutionName": "UFPE"
    }))
    .unwrap();
    assert_eq!(course.institution_id, Some(4));
    assert_eq!(course.institution_name.as_deref(), Some("UFPE"));
}

#[test]
fn institution_location_formats_available_parts() {
    let mut inst = Institution { id: 1, name: "UFPE".to_owned(), ..Institution::default() };
    assert_eq!(inst.location(), None);
    inst.city = Some("Recife".to_owned());
    assert_eq!(inst.location().as_deref(), Some("Recife"));
    inst.state = Some("PE".to_owned());
    assert_eq!(inst.location().as_deref(), Some("Recife - PE"));
}

#[test]
fn comment_accepts_comment_text_alias() {
    let comment: Comment =
        serde_json::from_value(serde_json::json!({ "commentText": "Ótimo curso", "username": "ana" })).unwrap();
    assert_eq!(comment.text, "Ótimo curso");
    assert_eq!(comment.author.as_deref(), Some("ana"));
}

// =============================================================
// Users
// =============================================================

#[test]
fn role_wire_format_is_uppercase() {
    assert_eq!(serde_json::to_value(Role::Admin).unwrap(), serde_json::json!("ADMIN"));
    assert_eq!(Role::User.as_str(), "USER");
    assert_eq!(Role::User.toggled(), Role::Admin);
}

#[test]
fn user_summary_defaults_role_to_user() {
    let user: UserSummary = serde_json::from_value(serde_json::json!({ "id": 2, "username": "bia" })).unwrap();
    assert_eq!(user.role, Role::User);
}

#[test]
fn new_course_omits_empty_optionals() {
    let body = NewCourse { name: "Direito".to_owned(), institution_id: 5, ..NewCourse::default() };
    assert_eq!(
        serde_json::to_value(body).unwrap(),
        serde_json::json!({ "name": "Direito", "institutionId": 5 })
    );
}
