pub mod filter;
pub mod handlers;
pub mod routes;
