mod app_user;
mod partner;

pub use self::app_user::AppUserRow;
pub use self::partner::Partner;
