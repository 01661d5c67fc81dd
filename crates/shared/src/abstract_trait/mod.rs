mod auth;
mod directory;
mod repository;

pub use self::auth::{
    AuthProviderTrait, DynAuthProvider, DynSessionRevocation, SessionRevocationTrait,
};
pub use self::directory::{AppUserDirectoryTrait, DynAppUserDirectory};
pub use self::repository::{
    AppUserRepositoryTrait, DynAppUserRepository, DynPartnerRepository, PartnerRepositoryTrait,
};
