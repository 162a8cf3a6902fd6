pub mod handlers;
pub mod routes;
pub mod tree;
pub mod ui;
