mod collection;

pub use collection::{Document, DocumentCollection};
