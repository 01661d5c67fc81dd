mod snapshot;
mod store;
mod tenant;

pub use self::snapshot::{FetchStatus, SessionSnapshot};
pub use self::store::SessionStore;
pub use self::tenant::TenantResolver;
