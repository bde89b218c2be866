//! Request domain entities.

pub mod model;
pub mod status;

pub use model::Request;
pub use status::RequestStatus;
