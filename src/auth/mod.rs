pub mod cookies;
pub mod flash;
pub mod jwt;
pub mod password;
mod principal;
pub mod session;

pub use flash::Flash;
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use principal::{CurrentUser, Principal};
pub use session::SessionManager;
