mod media_host;

pub use media_host::{HttpMediaHost, MediaHost};
