// User domain module
// Value objects enforcing username and email invariants

pub mod value_objects;

pub use value_objects::{Email, Username};
