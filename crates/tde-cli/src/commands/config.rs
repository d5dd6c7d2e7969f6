//! `tde config` command implementation
//!
//! Shows the effective configuration after files, environment, and flags.

use crate::config::Config;
use crate::error::Result;
use crate::render::Theme;

/// Get configuration value
pub fn get(config: &Config, key: &str) -> Result<()> {
    println!("{}", config.get(key)?);
    Ok(())
}

/// Show all configuration
pub fn show(config: &Config, theme: &Theme) -> Result<()> {
    println!("{}", theme.heading("TDE CLI Configuration:"));
    println!();
    println!("{:<15} {}", "server_url:", config.server_url());
    println!("{:<15} {}", "timeout_secs:", config.timeout_secs);
    println!("{:<15} {}", "page_size:", config.page_size);
    println!("{:<15} {}", "color:", config.color);
    println!();
    println!("{}", theme.heading("Config file:"));
    match Config::config_file_path() {
        Some(path) => println!("  {}", path.display()),
        None => println!("  (no config directory on this platform)"),
    }
    println!();
    println!("{}", theme.heading("Environment Variables:"));
    println!("  TDE_API_BASE_URL      - Backend API base URL");
    println!("  TDE_API_TIMEOUT_SECS  - Request timeout in seconds");
    println!("  TDE_PAGE_SIZE         - Rows per page");
    println!("  TDE_CONFIG_FILE       - Config file location");
    println!("  NO_COLOR              - Disable colours");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_get() {
        let config = Config::default();
        assert!(get(&config, "server_url").is_ok());
        assert!(get(&config, "cache_dir").is_err());
    }

    #[test]
    fn test_config_show() {
        assert!(show(&Config::default(), &Theme::plain()).is_ok());
    }
}
