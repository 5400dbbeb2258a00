//! FFI crate exposing the task list core to a Flutter host.

pub mod api;
