//! Required-field checks for every form.
//!
//! Each validator trims its input and either returns the cleaned value or a
//! localized message for a warning notice. Nothing is sent to the backend
//! when a validator fails.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::net::types::{LoginForm, NewCourse, RegistrationForm};

pub const COMMENT_MAX_CHARS: usize = 1_000;
pub const SEARCH_MIN_CHARS: usize = 2;

pub const COMMENT_REQUIRED: &str = "Escreva um comentário antes de enviar.";
pub const COMMENT_TOO_LONG: &str = "O comentário pode ter no máximo 1000 caracteres.";
pub const LOGIN_REQUIRED: &str = "Informe e-mail e senha.";
pub const REGISTRATION_REQUIRED: &str = "Preencha todos os campos.";
pub const EMAIL_INVALID: &str = "Informe um e-mail válido.";
pub const PASSWORD_MISMATCH: &str = "As senhas não conferem.";
pub const COURSE_NAME_REQUIRED: &str = "Informe o nome do curso.";
pub const COURSE_INSTITUTION_REQUIRED: &str = "Selecione a instituição do curso.";

/// # Errors
///
/// Empty or over-long comment text.
pub fn validate_comment(raw: &str) -> Result<String, &'static str> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(COMMENT_REQUIRED);
    }
    if text.chars().count() > COMMENT_MAX_CHARS {
        return Err(COMMENT_TOO_LONG);
    }
    Ok(text.to_owned())
}

/// # Errors
///
/// Missing email or password.
pub fn validate_login(email: &str, password: &str) -> Result<LoginForm, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(LOGIN_REQUIRED);
    }
    Ok(LoginForm { email: email.to_owned(), password: password.to_owned() })
}

/// # Errors
///
/// Missing field, malformed email or mismatched confirmation.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<RegistrationForm, &'static str> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(REGISTRATION_REQUIRED);
    }
    if !looks_like_email(email) {
        return Err(EMAIL_INVALID);
    }
    if password != confirmation {
        return Err(PASSWORD_MISMATCH);
    }
    Ok(RegistrationForm {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

/// Fields of the admin "new course" form, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub name: String,
    pub institution_id: String,
    pub description: String,
    pub area: String,
    pub modality: String,
    pub duration: String,
}

/// # Errors
///
/// Missing name or institution.
pub fn validate_course(draft: &CourseDraft) -> Result<NewCourse, &'static str> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(COURSE_NAME_REQUIRED);
    }
    let institution_id = draft
        .institution_id
        .trim()
        .parse::<i64>()
        .map_err(|_| COURSE_INSTITUTION_REQUIRED)?;
    Ok(NewCourse {
        name: name.to_owned(),
        institution_id,
        description: non_empty(&draft.description),
        area: non_empty(&draft.area),
        modality: non_empty(&draft.modality),
        duration: non_empty(&draft.duration),
    })
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Search text worth sending, if any.
pub fn search_query(raw: &str) -> Option<String> {
    let query = raw.trim();
    (query.chars().count() >= SEARCH_MIN_CHARS).then(|| query.to_owned())
}
