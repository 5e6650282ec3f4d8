pub mod routes;
pub mod startup;
pub mod errors;
pub mod envelope;
pub mod openapi;

pub use startup::run;
