//! board-registry: closed set of biosensor board identifiers and their published codes
//!
//! Every other layer (drivers, streaming, persisted sessions) names a board by its
//! integer code. Codes are a wire contract shared across language bindings and must
//! never be renumbered or reused.

mod ids;
pub use ids::BoardId;

mod error;
pub use error::{ConfigError, RegistryError, Result};

mod registry;
pub use registry::{
    board_from_code, board_from_name, board_registry, code_of, name_of_code, BoardRegistry,
};

mod config;
pub use config::{
    load_board_config_file, load_board_configs_dir, BoardConfig, BoardConfigSet, IpProtocol,
};

mod metrics;
pub use metrics::{LookupMetrics, MetricsHub};
