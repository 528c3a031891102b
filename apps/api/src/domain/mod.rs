// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod course;
pub mod repositories;
pub mod services;
pub mod user;
