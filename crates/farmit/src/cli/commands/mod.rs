//! CLI commands

mod login;
mod logout;
mod release;

pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use release::ReleaseCommand;
