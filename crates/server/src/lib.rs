pub mod bootstrap;
pub mod envelope;
pub mod errors;
pub mod extract;
pub mod kind;
pub mod routes;
pub mod startup;

pub use bootstrap::launch;
pub use kind::ServiceKind;
pub use startup::run;
