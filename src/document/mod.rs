//! Document model and the store that owns document content.

pub mod document;
pub mod store;

pub use document::StoredDocument;
pub use store::DocumentStore;
