//! Route paths for every screen.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

pub const HOME: &str = "/";
pub const SIGN_IN: &str = "/entrar";
pub const REGISTER: &str = "/cadastro";
pub const INSTITUTIONS: &str = "/instituicoes";
pub const PROFILE: &str = "/perfil";
pub const ADMIN: &str = "/admin";

pub fn course(course_id: i64) -> String {
    format!("/curso/{course_id}")
}

pub fn institution(institution_id: i64) -> String {
    format!("/instituicao/{institution_id}")
}

/// Parse a numeric `:id` route parameter.
pub fn parse_id(raw: Option<String>) -> Option<i64> {
    raw?.trim().parse::<i64>().map_or(None, |id| (id > 0).then_some(id))
}
