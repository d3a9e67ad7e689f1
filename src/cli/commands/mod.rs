mod init_config;
mod stats;

pub use init_config::cmd_init_config;
pub use stats::cmd_stats;
