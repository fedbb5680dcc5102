pub mod config;
pub mod fd_limit;
pub mod keyscan_toml;
pub mod logger;

pub use config::*;
pub use fd_limit::{FDS_PER_WORKER, max_open_fds, max_workers_by_fd_limit, worker_count};
pub use keyscan_toml::{KeyscanToml, apply_file_to_config, load_keyscan_toml};
pub use logger::setup_logging;
