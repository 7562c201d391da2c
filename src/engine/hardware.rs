// Render device discovery for hardware backends (ordering is done by
// select_devices)

use std::fs;
use std::io;
use std::path::Path;

/// Where Linux exposes DRM card and render nodes
pub const DRI_PATH: &str = "/dev/dri";

/// Entry names in a DRI-style directory, in directory order
pub fn list_dri_devices(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Entries of `/dev/dri`; empty when the directory is missing or unreadable
pub fn detect_dri_devices() -> Vec<String> {
    match list_dri_devices(Path::new(DRI_PATH)) {
        Ok(devices) => devices,
        Err(e) => {
            tracing::debug!(path = DRI_PATH, error = %e, "no DRI devices");
            Vec::new()
        }
    }
}
