mod store_type;
mod sqlite;
mod postgres;

// Re-export only the specific items needed for the public API
pub use store_type::UserStore;
