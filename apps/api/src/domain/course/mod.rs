// Course domain module
// Contains the course entity and its invariants

#![allow(clippy::module_inception)]

pub mod course;

pub use course::Course;
