mod app_user;
mod role;
mod session;

pub use self::app_user::{AppUser, CachedPartnerCode};
pub use self::role::{
    ADMIN_DASHBOARD_PATH, ADMIN_LOGIN_PATH, DASHBOARD_PATH, PARTNER_DASHBOARD_PATH,
    PARTNER_LOGIN_PATH, Role, STUDENT_DASHBOARD_PATH, STUDENT_LOGIN_PATH, UnknownRole,
};
pub use self::session::{Session, SessionState};
