//! Core systems shared by the platform backends

pub mod logging;
