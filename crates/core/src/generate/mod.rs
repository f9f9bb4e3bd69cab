//! Generators. Everything random draws from a caller-supplied
//! [`RandomSource`](crate::random::RandomSource).

pub mod ascii_art;
pub mod blob;
pub mod gradient;
pub mod lorem;
pub mod palette;
pub mod password;
pub mod uuid;
