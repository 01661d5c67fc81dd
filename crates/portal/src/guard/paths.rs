use shared::domain::{Role, STUDENT_LOGIN_PATH};

pub const RETURN_TO_PARAM: &str = "returnTo";

/// Login URL for an unauthenticated visit, carrying the original location.
///
/// Routes without a required role fall back to the student surface.
pub fn login_redirect(required_role: Option<Role>, path_and_query: &str) -> String {
    let login = required_role.map_or(STUDENT_LOGIN_PATH, Role::login_path);
    format!(
        "{login}?{RETURN_TO_PARAM}={}",
        urlencoding::encode(path_and_query)
    )
}

/// Extracts and decodes `returnTo` from a raw query string.
pub fn return_to(query: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == RETURN_TO_PARAM)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}

pub fn partner_home(partner_code: &str) -> String {
    format!("/partner/{}", urlencoding::encode(partner_code))
}

pub fn path_only(path_and_query: &str) -> &str {
    path_and_query
        .split_once('?')
        .map_or(path_and_query, |(path, _)| path)
}
