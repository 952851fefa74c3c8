//! Init command implementation

use anyhow::{bail, Result};

use studytrack::config::Config;

/// Write a default config file, refusing to clobber one unless forced
pub fn init_command(force: bool) -> Result<()> {
    let path = Config::config_path();
    if path.exists() && !force {
        bail!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to_file(&path)?;
    println!("Wrote {}", path.display());
    println!("Set default_user there to skip --user on every command.");
    Ok(())
}
