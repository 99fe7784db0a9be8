pub mod admin;
pub mod errors;
pub mod input;
pub mod limit;
pub mod session;
