//! Orkids Learning API Library
//!
//! This library provides the core functionality for the Orkids Learning API:
//! credential handling, course and enrollment domain logic, repositories and
//! the HTTP adapter that ties them together.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
