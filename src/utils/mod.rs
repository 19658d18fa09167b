pub mod environment;
pub mod paths;

pub use environment::{get_config_path, get_home_dir};
pub use paths::{format_path_with_tilde, resolve_root};
