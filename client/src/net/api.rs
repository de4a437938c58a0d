//! Typed REST operations over [`ApiClient`].
//!
//! Each function maps one backend endpoint. They all go through the client's
//! interceptor, so a rejected session is handled before the caller sees the
//! error.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>` and decide how to surface it; nothing
//! here retries or shows notices.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{ApiClient, ApiRequest, IDENTITY_PATH, LOGIN_PATH, LOGOUT_PATH};
use super::types::{Comment, Course, Identity, Institution, LoginForm, NewCourse, RegistrationForm, Role, UserSummary};
use crate::error::ApiError;

const REGISTER_PATH: &str = "/users";
const COURSES_PATH: &str = "/api/courses";
const INSTITUTIONS_PATH: &str = "/api/institutions";
const SAVED_COURSES_PATH: &str = "/api/user/saved-courses";
const USERS_PATH: &str = "/api/users";
const PROFILE_IMAGE_PATH: &str = "/api/user/image";

fn course_endpoint(course_id: i64) -> String {
    format!("{COURSES_PATH}/{course_id}")
}

fn course_comments_endpoint(course_id: i64) -> String {
    format!("{COURSES_PATH}/{course_id}/comments")
}

fn institution_endpoint(institution_id: i64) -> String {
    format!("{INSTITUTIONS_PATH}/{institution_id}")
}

fn institution_courses_endpoint(institution_id: i64) -> String {
    format!("{INSTITUTIONS_PATH}/{institution_id}/courses")
}

fn saved_course_endpoint(course_id: i64) -> String {
    format!("{SAVED_COURSES_PATH}/{course_id}")
}

fn user_role_endpoint(user_id: i64) -> String {
    format!("{USERS_PATH}/{user_id}/role")
}

fn image_endpoint(image_id: &str) -> String {
    format!("/api/images/{image_id}")
}

// =============================================================================
// AUTH
// =============================================================================

/// Submit credentials to `POST /login` (form-encoded).
///
/// # Errors
///
/// `ApiError::Unauthorized` for bad credentials; other variants as usual.
pub async fn login(api: &ApiClient, form: &LoginForm) -> Result<(), ApiError> {
    let request = ApiRequest::post(LOGIN_PATH).form(&[("email", form.email.as_str()), ("password", form.password.as_str())]);
    api.send_unit(request).await
}

/// Ask `GET /api/user/logged` for the current identity.
///
/// An empty or `null` body and a 401/403 all mean nobody is signed in.
///
/// # Errors
///
/// Transport and server failures other than auth rejections.
pub async fn fetch_identity(api: &ApiClient) -> Result<Option<Identity>, ApiError> {
    match api.send(ApiRequest::get(IDENTITY_PATH)).await {
        Ok(response) => parse_identity(&response.body),
        Err(e) if e.is_auth_failure() => Ok(None),
        Err(e) => Err(e),
    }
}

fn parse_identity(body: &str) -> Result<Option<Identity>, ApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => Ok(Some(Identity(map))),
        Ok(serde_json::Value::Null) => Ok(None),
        Ok(other) => Err(ApiError::Decode(format!("identity is not an object: {other}"))),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

/// End the backend session via `GET /logout`.
///
/// # Errors
///
/// Any failure; callers clear local state regardless.
pub async fn logout(api: &ApiClient) -> Result<(), ApiError> {
    api.send_unit(ApiRequest::get(LOGOUT_PATH)).await
}

/// Create an account via `POST /users` (form-encoded).
///
/// # Errors
///
/// `ApiError::Status` when the backend refuses the registration (e.g. 409).
pub async fn register(api: &ApiClient, form: &RegistrationForm) -> Result<(), ApiError> {
    let request = ApiRequest::post(REGISTER_PATH).form(&[
        ("username", form.username.as_str()),
        ("email", form.email.as_str()),
        ("password", form.password.as_str()),
    ]);
    api.send_unit(request).await
}

// =============================================================================
// COURSES
// =============================================================================

/// # Errors
///
/// Propagates client failures.
pub async fn list_courses(api: &ApiClient) -> Result<Vec<Course>, ApiError> {
    api.fetch_json(ApiRequest::get(COURSES_PATH)).await
}

/// Name search backing the autocomplete box.
///
/// # Errors
///
/// Propagates client failures.
pub async fn search_courses(api: &ApiClient, query: &str) -> Result<Vec<Course>, ApiError> {
    api.fetch_json(ApiRequest::get(format!("{COURSES_PATH}/search")).query("q", query.trim()))
        .await
}

/// # Errors
///
/// Propagates client failures.
pub async fn fetch_course(api: &ApiClient, course_id: i64) -> Result<Course, ApiError> {
    api.fetch_json(ApiRequest::get(course_endpoint(course_id))).await
}

/// # Errors
///
/// Propagates client failures.
pub async fn list_comments(api: &ApiClient, course_id: i64) -> Result<Vec<Comment>, ApiError> {
    api.fetch_json(ApiRequest::get(course_comments_endpoint(course_id))).await
}

/// Post a comment; the text travels as the `commentText` query parameter.
///
/// # Errors
///
/// Propagates client failures.
pub async fn add_comment(api: &ApiClient, course_id: i64, text: &str) -> Result<(), ApiError> {
    let request = ApiRequest::post(course_comments_endpoint(course_id)).query("commentText", text);
    api.send_unit(request).await
}

/// Admin: create a course.
///
/// # Errors
///
/// Propagates client failures.
pub async fn create_course(api: &ApiClient, course: &NewCourse) -> Result<(), ApiError> {
    api.send_unit(ApiRequest::post(COURSES_PATH).json(course)?).await
}

/// Admin: delete a course.
///
/// # Errors
///
/// Propagates client failures.
pub async fn delete_course(api: &ApiClient, course_id: i64) -> Result<(), ApiError> {
    api.send_unit(ApiRequest::delete(course_endpoint(course_id))).await
}

// =============================================================================
// INSTITUTIONS
// =============================================================================

/// # Errors
///
/// Propagates client failures.
pub async fn list_institutions(api: &ApiClient) -> Result<Vec<Institution>, ApiError> {
    api.fetch_json(ApiRequest::get(INSTITUTIONS_PATH)).await
}

/// # Errors
///
/// Propagates client failures.
pub async fn fetch_institution(api: &ApiClient, institution_id: i64) -> Result<Institution, ApiError> {
    api.fetch_json(ApiRequest::get(institution_endpoint(institution_id))).await
}

/// # Errors
///
/// Propagates client failures.
pub async fn institution_courses(api: &ApiClient, institution_id: i64) -> Result<Vec<Course>, ApiError> {
    api.fetch_json(ApiRequest::get(institution_courses_endpoint(institution_id)))
        .await
}

// =============================================================================
// SAVED COURSES
// =============================================================================

/// # Errors
///
/// Propagates client failures.
pub async fn saved_courses(api: &ApiClient) -> Result<Vec<Course>, ApiError> {
    api.fetch_json(ApiRequest::get(SAVED_COURSES_PATH)).await
}

/// # Errors
///
/// Propagates client failures.
pub async fn save_course(api: &ApiClient, course_id: i64) -> Result<(), ApiError> {
    api.send_unit(ApiRequest::post(saved_course_endpoint(course_id))).await
}

/// # Errors
///
/// Propagates client failures.
pub async fn unsave_course(api: &ApiClient, course_id: i64) -> Result<(), ApiError> {
    api.send_unit(ApiRequest::delete(saved_course_endpoint(course_id))).await
}

// =============================================================================
// USERS / IMAGES
// =============================================================================

/// Admin: list accounts.
///
/// # Errors
///
/// Propagates client failures.
pub async fn list_users(api: &ApiClient) -> Result<Vec<UserSummary>, ApiError> {
    api.fetch_json(ApiRequest::get(USERS_PATH)).await
}

/// Admin: change an account's role via `PUT /api/users/{id}/role?role=`.
///
/// # Errors
///
/// Propagates client failures.
pub async fn update_role(api: &ApiClient, user_id: i64, role: Role) -> Result<(), ApiError> {
    let request = ApiRequest::put(user_role_endpoint(user_id)).query("role", role.as_str());
    api.send_unit(request).await
}

/// Replace the signed-in user's profile photo.
///
/// # Errors
///
/// Propagates client failures.
pub async fn upload_profile_image(api: &ApiClient, content_type: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
    api.send_unit(ApiRequest::post(PROFILE_IMAGE_PATH).binary(content_type, bytes))
        .await
}

/// Absolute URL of a stored image, suitable for `<img src>`.
pub fn image_url(api: &ApiClient, image_id: &str) -> String {
    api.url(&image_endpoint(image_id))
}
