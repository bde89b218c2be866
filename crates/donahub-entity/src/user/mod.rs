//! User domain entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, User, VolunteerProfile};
pub use role::UserRole;
