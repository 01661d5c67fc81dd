mod app_user;
mod partner;

pub use self::app_user::AppUserRepository;
pub use self::partner::PartnerRepository;
