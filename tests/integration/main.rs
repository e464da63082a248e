//! HTTP-level integration tests driving the full router against the
//! in-memory store.

mod helpers;

mod admin_test;
mod auth_test;
mod e2e_test;
mod user_test;
