//! Request workflow: the state machine connecting NGOs, companies and
//! volunteers.

pub mod decision;
pub mod service;

pub use decision::Decision;
pub use service::WorkflowService;
