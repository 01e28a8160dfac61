pub mod date_types;
pub mod documents;
pub mod eastern;
pub mod phases;

// Re-export the zoned wrapper at crate root for convenience
pub use eastern::EasternDateTime;
pub use eastern::EasternNow;
