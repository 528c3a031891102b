// Domain services
// Orchestrate repositories and auth primitives for each use case

pub mod accounts;
pub mod catalogue;
pub mod deadline;
pub mod enrollment;

pub use accounts::{AccountError, AccountService, Session};
pub use catalogue::{CatalogueError, CatalogueService};
pub use deadline::StorageBudget;
pub use enrollment::{EnrollmentError, EnrollmentOutcome, EnrollmentService};
