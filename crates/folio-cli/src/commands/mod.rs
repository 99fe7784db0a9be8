pub mod auth;
pub mod blog;
pub mod contact;
pub mod dashboard;
pub mod dispatch;
pub mod markdown;
pub mod papers;
pub mod research;
pub mod schema;
pub mod session;
pub mod shared;
