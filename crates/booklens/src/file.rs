//! Catalog persistence on the filesystem.
//!
//! A catalog file holds a [`Catalog`] as JSON and uses the [`CATALOG_EXT`] extension. This
//! module contains basic methods for opening, finding and creating catalog files and for reading
//! and writing the catalog they contain.

use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, Write},
    path::Path,
};

use crate::{store::Catalog, Error, ErrorKind};

use glob::glob;

/// The file extension of catalog files.
pub const CATALOG_EXT: &str = "catalog";

/// A reference to an open catalog file on the filesystem.
///
/// `CatalogFile`s are automatically closed when they go out of scope. Errors detected on closing
/// are ignored by the implementation of `Drop`.
#[derive(Debug)]
pub struct CatalogFile {
    file: File,
}

impl CatalogFile {
    const fn new(file: File) -> Self {
        Self { file }
    }

    /// Attempts to open a catalog file in read and write mode.
    ///
    /// The [`CATALOG_EXT`] extension is used whatever the extension of `path`.
    ///
    /// # Errors
    /// This function will return an error if `path` does not already exist or the user lacks
    /// permissions to open the file.
    ///
    /// # Examples
    /// ```no_run
    /// use booklens::file::CatalogFile;
    ///
    /// fn main() -> Result<(), booklens::Error> {
    ///     let mut f = CatalogFile::open("library.catalog")?;
    ///     Ok(())
    /// }
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path_buf = path.as_ref().with_extension(CATALOG_EXT);
        open_file_for_read_and_write(path_buf.as_path())
    }

    /// Attempts to find a single catalog file in the directory.
    ///
    /// Returns `Ok(None)` when the directory holds no catalog file.
    ///
    /// # Errors
    /// This function will return an error if:
    /// - The path is not a directory
    /// - More than one catalog file can be found in the directory
    /// - User lacks permissions to open the file
    pub fn find<P: AsRef<Path>>(path: P) -> Result<Option<Self>, Error> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::new(
                ErrorKind::IO,
                format!("{} is not a directory", path.display()),
            ));
        }

        find_catalog_file_in_directory(path)
    }

    /// Creates a new, empty catalog file and opens it in read and write mode.
    ///
    /// # Errors
    /// This function will return an error if the file already exists or the user lacks
    /// permissions to create the file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path_buf = path.as_ref().with_extension(CATALOG_EXT);
        create_file_for_read_and_write(path_buf.as_path())
    }

    /// Reads the catalog from the file.
    ///
    /// An empty file is read as an empty [`Catalog`].
    ///
    /// # Errors
    /// This will return an [`Err`] when the file cannot be read, does not contain a catalog or the
    /// catalog breaks one of its invariants.
    pub fn read_catalog(&mut self) -> Result<Catalog, Error> {
        let content = read_file_to_string(&mut self.file)?;

        if content.trim().is_empty() {
            log::trace!("Catalog file is empty - starting a new catalog");
            return Ok(Catalog::new());
        }

        let catalog: Catalog = serde_json::from_str(&content).map_err(|e| {
            Error::wrap_with(ErrorKind::IO, e, "File does not contain a valid catalog")
        })?;
        catalog.check_integrity()?;
        Ok(catalog)
    }

    /// Overwrites the contents of the file with the catalog.
    ///
    /// # Errors
    /// The call to write should only return an [`Err`] when writing to the file cannot be
    /// completed.
    pub fn write_catalog(&mut self, catalog: &Catalog) -> Result<(), Error> {
        fn overwrite_file_from_start(file: &mut File, bytes: &[u8]) -> std::io::Result<()> {
            // Rewind the cursor back to the start of the file to write over the contents and set
            // the length of the file to be equal to bytes so that existing data is removed
            file.rewind()?;
            file.set_len(bytes.len() as u64)?;
            file.write_all(bytes)
        }

        let bytes = serde_json::to_vec_pretty(catalog)
            .map_err(|e| Error::wrap_with(ErrorKind::IO, e, "Cannot serialize the catalog"))?;
        log::trace!("rewind file cursor to start and write {} bytes", bytes.len());
        overwrite_file_from_start(&mut self.file, &bytes)
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
    }
}

fn read_file_to_string(file: &mut File) -> Result<String, Error> {
    let mut content = String::new();
    file.rewind()
        .and_then(|()| file.read_to_string(&mut content))
        .map_err(|e| Error::wrap_with(ErrorKind::IO, e, "Cannot read contents of file"))
        .map(move |bytes| {
            log::trace!("{bytes} read from the file");
            content
        })
}

#[inline]
fn open_file_for_read_and_write(path: &Path) -> Result<CatalogFile, Error> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map(CatalogFile::new)
        .map_err(|e| {
            Error::wrap_with(
                ErrorKind::IO,
                e,
                format!(
                    "Failed to open the '{}' file for reading and writing",
                    path.display()
                ),
            )
        })
}

#[inline]
fn create_file_for_read_and_write(path: &Path) -> Result<CatalogFile, Error> {
    OpenOptions::new()
        .create_new(true)
        .read(true)
        .write(true)
        .open(path)
        .map(CatalogFile::new)
        .map_err(|e| {
            Error::wrap_with(
                ErrorKind::IO,
                e,
                format!(
                    "Failed to create and open the '{}' file for reading and writing",
                    path.display()
                ),
            )
        })
}

fn find_catalog_file_in_directory(path: &Path) -> Result<Option<CatalogFile>, Error> {
    let pattern = format!("{}/*.{CATALOG_EXT}", path.to_string_lossy());

    let mut iter = glob(&pattern).map_err(|e| {
        Error::wrap_with(
            ErrorKind::IO,
            e,
            format!("Cannot search the '{}' directory", path.display()),
        )
    })?;

    let Some(entry) = iter.next() else {
        log::trace!("No .{CATALOG_EXT} file in the '{}' directory", path.display());
        return Ok(None);
    };

    let path_buf = entry.map_err(|e| {
        Error::wrap_with(
            ErrorKind::IO,
            e,
            "Cannot determine a file path - Do you have the correct permissions?",
        )
    })?;

    if iter.next().is_some() {
        return Err(Error::new(
            ErrorKind::IO,
            format!("More than one .{CATALOG_EXT} file found"),
        ));
    }

    open_file_for_read_and_write(path_buf.as_path()).map(Some)
}
