//! Runtime module — process startup: logging and configuration.

pub mod boot;
