//! Ownership-style permission gate for config sources
//!
//! Config files may hold passwords, so anything readable or writable by
//! group or others is refused.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::error::{WatchSyncError, WatchSyncResult};

/// Group and other permission bits.
const OPEN_BITS: u32 = 0o077;

/// Fails if `path` (file or directory) carries any group/other bits.
pub fn check_permissions(path: &Path) -> WatchSyncResult<()> {
    let mode = fs::metadata(path)?.permissions().mode() & 0o7777;
    if mode & OPEN_BITS != 0 {
        return Err(WatchSyncError::InsecurePermissions {
            path: path.to_path_buf(),
            mode,
        });
    }
    Ok(())
}
