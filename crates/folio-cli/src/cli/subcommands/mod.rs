pub mod auth;
pub mod contact;
pub mod content;
pub mod session;

pub use auth::AuthCommands;
pub use contact::ContactCommands;
pub use content::{BlogCommands, PaperCommands, ResearchCommands};
pub use session::SessionCommands;
