pub mod admin;
pub mod auth_pages;
pub mod dashboard;
pub mod discussions;
pub mod home;
pub mod listing;
pub mod navigation;
pub mod profile;
pub mod session;
pub mod wishlist;
