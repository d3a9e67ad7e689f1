//! Init config command handler

use std::path::Path;

use crate::config::Config;

pub fn cmd_init_config(path: Option<&Path>) -> anyhow::Result<()> {
    let default_path = Config::default_config_path();
    let path = path.unwrap_or(&default_path);

    if Config::create_default_if_missing(path)? {
        println!("✓ Config file created at {}", path.display());
        println!("Edit it and run `delivery-desk serve`.");
    } else {
        println!("Config file already exists: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_once_then_leaves_file_alone() {
        let path = std::env::temp_dir().join(format!(
            "delivery-desk-init-{}/config.toml",
            uuid::Uuid::new_v4()
        ));

        cmd_init_config(Some(&path)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[server]"));

        std::fs::write(&path, "[server]\nport = 9999\n").unwrap();
        cmd_init_config(Some(&path)).unwrap();
        assert_eq!(Config::load_from_path(&path).unwrap().server.port, 9999);

        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }
}
