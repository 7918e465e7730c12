use std::path::{Path, PathBuf};

/// Names from `required` that are not regular files under `work_dir`, in
/// the order given.
pub(crate) fn missing_required_files(work_dir: &Path, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|name| !work_dir.join(name).is_file())
        .collect()
}

pub(crate) fn require_binary(work_dir: &Path, name: &str) -> Result<PathBuf, String> {
    let path = work_dir.join(name);
    if path.is_file() {
        return Ok(path);
    }

    Err(format!("{} not found in {}", name, work_dir.display()))
}
