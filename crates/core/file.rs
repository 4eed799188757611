use std::path::{Path, PathBuf};

use booklens::file::{CatalogFile, CATALOG_EXT};

use eyre::{Context, Result};
use log::{info, trace};

const DEFAULT_CATALOG: &str = "library";

/// Opens the catalog file to work with, creating it when it does not exist yet.
///
/// Without a path the current directory is searched for a single catalog file.
#[allow(clippy::module_name_repetitions)]
pub fn open_or_create_catalog_file(file_name: Option<PathBuf>) -> Result<CatalogFile> {
    if let Some(path) = file_name {
        trace!("opening {} as a catalog file", path.display());
        open_or_create_by_name(&path)
    } else {
        find_or_create_in_dir(Path::new("."))
    }
}

fn find_or_create_in_dir(dir: &Path) -> Result<CatalogFile> {
    trace!("Searching {} for any .{CATALOG_EXT} files", dir.display());
    let found = CatalogFile::find(dir).wrap_err_with(|| {
        format!("Cannot select a .{CATALOG_EXT} file - use the --file option to select one")
    })?;

    if let Some(file) = found {
        return Ok(file);
    }

    let path = dir.join(DEFAULT_CATALOG).with_extension(CATALOG_EXT);
    info!(
        "No .{CATALOG_EXT} file found in {} - creating the new file `{}`",
        dir.display(),
        path.display()
    );
    create_by_name(&path)
}

fn open_or_create_by_name(path: &Path) -> Result<CatalogFile> {
    let path_buf = path.with_extension(CATALOG_EXT);
    if path_buf.exists() {
        CatalogFile::open(&path_buf)
            .wrap_err_with(|| format!("Cannot use '{}' as the catalog", path_buf.display()))
    } else {
        info!("Creating the new catalog file `{}`", path_buf.display());
        create_by_name(&path_buf)
    }
}

fn create_by_name(path: &Path) -> Result<CatalogFile> {
    CatalogFile::create(path)
        .wrap_err_with(|| format!("Cannot create the catalog file '{}'", path.display()))
}
