//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Every operation takes the connection explicitly; nothing is global.

pub mod errors;
pub mod pagination;
pub mod customer_service;
pub mod address_service;
pub mod roster;
#[cfg(test)]
pub mod test_support;
