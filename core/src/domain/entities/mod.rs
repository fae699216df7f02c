//! Domain entities representing core objects.

pub mod principal;
pub mod token;

pub use principal::Principal;
pub use token::{Claims, IssuedTokenPair, RefreshTokenRecord, REFRESH_TOKEN_BYTES};
