// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("sessionwatch").join("sessionwatch.log"))
}
