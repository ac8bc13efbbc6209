pub mod appwrite;

pub use appwrite::{AppwriteClient, DocumentList};
