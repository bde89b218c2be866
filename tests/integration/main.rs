//! Integration tests across the store, auth gateway and services.

mod helpers;

mod auth_test;
mod catalog_test;
mod notification_test;
mod persistence_test;
mod workflow_test;
