mod cache_store;
mod revocation;

pub use self::cache_store::CacheStore;
pub use self::revocation::SessionRevocationStore;
