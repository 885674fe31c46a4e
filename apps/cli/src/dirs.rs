use std::path::PathBuf;

use carbon_app::AppPaths;

use crate::config::{project_dirs, tracker_home};

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub matched_existing: bool,
}

/// Picks the data directory: an explicit override, then
/// `$AI_CARBON_TRACKER_HOME/data`, then the platform data dir.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<DataDirResolution, String> {
    let dir = match override_dir {
        Some(dir) => dir,
        None => match tracker_home() {
            Some(home) => home.join("data"),
            None => project_dirs()?.data_local_dir().to_path_buf(),
        },
    };
    let matched_existing = AppPaths::new(dir.clone()).db_path.exists();
    Ok(DataDirResolution {
        dir,
        matched_existing,
    })
}
