//! Repository Layer
//!
//! Persistence and remote data access: the local JSON document store, the
//! remote row codec, and the `RemoteStore` implementations.

mod config;
mod http;
mod local;
mod memory;
pub mod row;
mod traits;


pub use config::{load_config, save_config, RemoteConfig, CONFIG_FILE};
pub use http::HttpRemote;
pub use local::{LocalStore, STATE_FILE};
pub use memory::MemoryRemote;
pub use row::{rows_to_state, state_to_rows, task_to_row, TaskRow, FALLBACK_PROJECT};
pub use traits::{ChangeEvent, RemoteStore};
