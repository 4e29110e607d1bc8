pub mod current_user;
pub mod handlers;
pub mod middleware;

pub use current_user::{current_user, CurrentUser};

pub const USER_ID_KEY: &str = "user_id";
pub const USERNAME_KEY: &str = "username";
pub const RETURN_TO_KEY: &str = "login_return_to";

/// Page an administrator lands on after logging in.
pub const DEFAULT_LOGIN_REDIRECT: &str = "/appointments";

/// Only local absolute paths may be used as a post-login redirect.
pub fn is_safe_return_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
