//! Request and response DTOs

mod mappers;
mod requests;
mod responses;

pub use requests::*;
pub use responses::*;
