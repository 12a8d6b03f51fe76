// Service exports
pub mod appwrite;

pub use appwrite::{AppwriteResolver, ResolverError};
