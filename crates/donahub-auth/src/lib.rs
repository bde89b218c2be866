//! # donahub-auth
//!
//! Identity and authorization for DonaHub.
//!
//! ## Modules
//!
//! - `principal`: the authenticated actor passed into every operation
//! - `rbac`: role to permission mapping and enforcement
//! - `session`: persistence of the logged-in user between invocations
//! - `gateway`: registration, login, logout and principal resolution

pub mod gateway;
pub mod principal;
pub mod rbac;
pub mod session;

pub use gateway::{AuthGateway, RegisterRequest};
pub use principal::Principal;
pub use rbac::{Permission, RbacEnforcer, RbacPolicies};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
