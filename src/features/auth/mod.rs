pub mod model;

pub use model::AuthenticatedUser;
