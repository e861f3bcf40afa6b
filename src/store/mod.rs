pub mod kv;
pub mod schema;
pub mod session_store;
