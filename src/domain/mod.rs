pub mod query;
pub mod stats;
pub mod suggestion;
pub mod ticket;
