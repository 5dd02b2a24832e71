pub mod backend;
pub mod endpoints;
