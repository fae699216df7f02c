//! Cache module - Redis client and refresh store

pub mod redis_client;
pub mod refresh_store;


pub use redis_client::RedisClient;
pub use refresh_store::RedisRefreshStore;
