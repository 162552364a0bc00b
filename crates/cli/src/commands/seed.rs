use std::fs;
use std::path::Path;

use shopscout_core::catalog::Catalog;
use shopscout_core::config::{AppConfig, LoadOptions};

use crate::commands::CommandResult;

pub fn run(out: Option<&Path>, force: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let destination = out.unwrap_or(&config.catalog.path);
    if destination.exists() && !force {
        return CommandResult::failure(
            "seed",
            "destination_exists",
            format!("`{}` already exists; pass --force to overwrite", destination.display()),
            3,
        );
    }

    let catalog = Catalog::demo();
    let payload = match serde_json::to_string_pretty(catalog.products()) {
        Ok(payload) => payload,
        Err(error) => {
            return CommandResult::failure("seed", "serialization", error.to_string(), 4);
        }
    };

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(error) = fs::create_dir_all(parent) {
                return CommandResult::failure("seed", "write_failed", error.to_string(), 4);
            }
        }
    }
    if let Err(error) = fs::write(destination, payload) {
        return CommandResult::failure("seed", "write_failed", error.to_string(), 4);
    }

    CommandResult::success(
        "seed",
        format!(
            "demo catalog with {} products written to `{}`",
            catalog.len(),
            destination.display()
        ),
    )
}
