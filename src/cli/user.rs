//! Register command implementation

use anyhow::{bail, Result};

use studytrack::store::ProgressStore;
use studytrack::Error;

/// Create a new user with fresh progress
pub fn register_command(name: &str) -> Result<()> {
    let ctx = super::context()?;

    match ctx.store.create_user(name) {
        Ok(id) => {
            println!("Registered '{name}' (user #{id}). Time to hit the books.");
            Ok(())
        }
        Err(Error::Conflict(_)) => bail!("user '{name}' already exists"),
        Err(e) => Err(e.into()),
    }
}
