//! Authentication primitives

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use password::{generate_verification_code, hash_password, verify_password};
