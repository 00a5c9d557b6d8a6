pub mod json_backend;

pub use json_backend::{load_ledger_from_path, save_ledger_to_path, JsonStorage};
