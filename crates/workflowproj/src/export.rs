use crate::{ManifestObject, Project, ProjectError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

const MANIFEST_EXTENSION: &str = "yaml";

/// Temporary files start out owner-only; manifests are read by other users too.
#[cfg(unix)]
const MANIFEST_MODE: u32 = 0o644;

/// `NN-<kind>_<name>.yaml` where `NN` is the 1-based position in manifest order.
pub fn manifest_file_name(sequence: usize, object: &ManifestObject<'_>) -> String {
    format!(
        "{sequence:02}-{}_{}.{MANIFEST_EXTENSION}",
        object.kind().to_ascii_lowercase(),
        object.name()
    )
}

/// Writes one file per object of `project` into `target` and returns their paths.
///
/// Each file goes through a temporary file in `target` and is renamed into
/// place, so a failing write never leaves a truncated manifest behind. Files
/// already written for earlier objects are kept.
pub fn write_manifests(project: &Project, target: &Path) -> Result<Vec<PathBuf>, ProjectError> {
    fs::create_dir_all(target).map_err(|source| write_error(target, source))?;

    let mut written = Vec::new();
    for (index, object) in project.objects().enumerate() {
        let path = target.join(manifest_file_name(index + 1, &object));
        let encoded = object.to_yaml()?;
        persist(target, &path, encoded.as_bytes())?;
        info!(path = %path.display(), kind = object.kind(), "wrote manifest");
        written.push(path);
    }
    Ok(written)
}

fn persist(dir: &Path, path: &Path, contents: &[u8]) -> Result<(), ProjectError> {
    let mut file = NamedTempFile::new_in(dir).map_err(|source| write_error(path, source))?;
    file.write_all(contents)
        .and_then(|_| file.flush())
        .map_err(|source| write_error(path, source))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(MANIFEST_MODE))
            .map_err(|source| write_error(path, source))?;
    }
    file.persist(path)
        .map_err(|err| write_error(path, err.error))?;
    Ok(())
}

fn write_error(path: &Path, source: std::io::Error) -> ProjectError {
    ProjectError::Write {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
