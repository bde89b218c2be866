//! # donahub-entity
//!
//! Domain entity models for DonaHub. Every struct in this crate is either a
//! record held by the entity store (users, materials, requests,
//! notifications) or an input value object used to create or edit one.
//! All records derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod material;
pub mod notification;
pub mod request;
pub mod user;
