mod database;
mod jwt;
mod redis;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::jwt::{AccessTokenClaims, DEFAULT_AUDIENCE, JwtConfig};
pub use self::redis::{RedisClient, RedisConfig};
