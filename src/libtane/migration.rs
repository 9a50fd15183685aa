use crate::libtane::error::Error;
use crate::libtane::sql::InsertStatement;
use log::{debug, error, info};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Writes `statement` to `dest`, creating parent directories and replacing any existing file.
pub fn write_migration(dest: &Path, statement: &InsertStatement) -> Result<(), Error> {
    let now = Instant::now();
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(err) = fs::create_dir_all(parent) {
            error!("[Migration] Cannot create directory {:?}: {}", parent, err);
            return Err(err.into());
        }
    }

    match fs::write(dest, statement.to_string()) {
        Ok(_) => {
            info!(
                "[Migration] Wrote {} rows into {} at {:?}",
                statement.row_count(),
                statement.table,
                dest
            );
            debug!("[Migration] Writing took {} ms.", now.elapsed().as_millis());
            Ok(())
        }
        Err(err) => {
            error!("[Migration] Cannot write {:?}: {}", dest, err);
            Err(err.into())
        }
    }
}
