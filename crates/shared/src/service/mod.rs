mod auth;
mod directory;

pub use self::auth::JwtAuthProvider;
pub use self::directory::DirectoryService;
