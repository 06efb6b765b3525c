mod identity_resolver;

pub use identity_resolver::{IdentityResolver, ResolvedIdentity, StoreUserDirectory, UserDirectory};
