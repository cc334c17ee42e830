//! Authentication and authorization
//!
//! JWT bearer authentication (argon2 password hashing, access/refresh
//! tokens) plus the ownership/role policy that decides who may act on what.

mod jwt;
mod middleware;
mod password;
pub mod policy;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
pub use password::PasswordService;
pub use policy::{Action, Actor, Governed, Ownership};
