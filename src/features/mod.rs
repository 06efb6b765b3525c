pub mod auth;
pub mod feed;
pub mod media;
pub mod notifications;
pub mod pets;
pub mod reports;
pub mod users;
