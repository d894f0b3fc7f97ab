//! Infrastructure layer for filesystem and environment interactions.
//!
//! Currently this is platform directory resolution: where the session store,
//! the trace export and the configuration file live.

pub mod paths;

pub use paths::{default_config_path, ensure_dir, expand_tilde, get_config_dir, get_data_dir};
