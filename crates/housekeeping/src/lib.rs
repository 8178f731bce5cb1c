// Module structure for the Housekeeping log inspector.

// Core parsing
pub mod parser;

// Collaborators and admin surface
pub mod store;
pub mod service;

// Infrastructure
pub mod conf;
pub mod runtime;
