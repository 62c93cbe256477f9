//! Subcommand handlers for list-cameras and config actions.

use super::args::{Args, ConfigAction};
use crate::camera;
use crate::config::{self, Config, ConfigError};
use crate::error::AppError;

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), AppError> {
    let devices = camera::list_devices()?;
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --camera <index> to select a camera.");
    }
    Ok(())
}

/// Handle config subcommand actions.
///
/// `show` prints the effective configuration (file merged with flags);
/// `init` writes the commented template to `--config` or the default path.
pub fn handle_config_action(action: ConfigAction, args: &Args) -> Result<(), AppError> {
    let config_path = args.config.clone().unwrap_or_else(config::default_path);
    match action {
        ConfigAction::Show => {
            let mut effective = Config::load(args.config.as_deref())?;
            effective.apply_args(args);
            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found, using defaults)", config_path.display());
            }
            println!();
            print!("{}", effective.to_toml()?);
        }
        ConfigAction::Init => {
            match config::write_default(&config_path) {
                Ok(()) => println!("Created config file: {}", config_path.display()),
                Err(e @ ConfigError::AlreadyExists { .. }) => {
                    eprintln!("Use 'copter-tracker config show' to view current settings.");
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
