//!
//! The Database module contains the wrapper around the flat file that backs a Table, and the
//! functions for reading and replacing its contents.  Nothing should be re-exported.
//!

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::StoreError;

/// The raw contents of a flat file, as read by [FlatFile::read_image]
pub struct FileImage {
    /// Whole records, in file order, up to the requested limit
    pub bytes : Vec<u8>,
    /// The length of the file on disk, which may be larger than `bytes`
    pub file_len : u64,
}

/// Encapsulates the file backing a table
///
/// The file is a flat concatenation of fixed-size records with no header, footer or length
/// prefix.
pub struct FlatFile {
    path : PathBuf,
}

impl FlatFile {

    pub fn new(path : impl AsRef<Path>) -> Self {
        Self{ path : path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads at most `max_records` whole records of `record_size` bytes from the file
    ///
    /// Returns `Ok(None)` if the file doesn't exist, which is how a table that has never been
    /// saved looks.  A trailing partial record is left out of the image.
    pub fn read_image(&self, record_size : usize, max_records : usize) -> Result<Option<FileImage>, StoreError> {

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no file to load");
                return Ok(None);
            },
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let file_len = file.metadata().map_err(|e| StoreError::io(&self.path, e))?.len();

        //Never read more than fits in the table, and never read a partial record
        let whole_records = (file_len / record_size as u64).min(max_records as u64);
        let limit = whole_records * record_size as u64;

        let mut bytes = Vec::with_capacity(limit as usize);
        file.take(limit).read_to_end(&mut bytes).map_err(|e| StoreError::io(&self.path, e))?;

        //The file may have shrunk between the metadata call and the read
        let whole_len = bytes.len() - bytes.len() % record_size;
        bytes.truncate(whole_len);

        let trailing = file_len % record_size as u64;
        if trailing != 0 {
            warn!(path = %self.path.display(), trailing, record_size, "ignoring trailing partial record");
        }

        Ok(Some(FileImage{ bytes, file_len }))
    }

    /// Replaces the contents of the file with `image`
    ///
    /// The image is written to a temporary file in the same directory, which is then renamed over
    /// the target.  Either the whole new image is in place afterwards or the old file is untouched.
    pub fn replace_image(&self, image : &[u8]) -> Result<(), StoreError> {

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut temp_file = tempfile::NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
        temp_file.write_all(image).map_err(|e| StoreError::io(temp_file.path(), e))?;
        temp_file.as_file().sync_all().map_err(|e| StoreError::io(temp_file.path(), e))?;
        temp_file.persist(&self.path).map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), bytes = image.len(), "replaced file image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::new(dir.path().join("absent.dat"));
        assert!(file.read_image(4, 10).unwrap().is_none());
    }

    #[test]
    fn reads_whole_records_up_to_the_limit() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::new(dir.path().join("image.dat"));

        file.replace_image(&[1, 1, 2, 2, 3, 3, 4]).unwrap();
        let image = file.read_image(2, 10).unwrap().unwrap();
        assert_eq!(image.bytes, vec![1, 1, 2, 2, 3, 3]);
        assert_eq!(image.file_len, 7);

        let image = file.read_image(2, 2).unwrap().unwrap();
        assert_eq!(image.bytes, vec![1, 1, 2, 2]);
    }

    #[test]
    fn replace_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::new(dir.path().join("image.dat"));

        file.replace_image(&[9; 32]).unwrap();
        file.replace_image(&[5, 5]).unwrap();
        assert_eq!(std::fs::read(file.path()).unwrap(), vec![5, 5]);

        //No temporary files are left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn unwritable_target_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::new(dir.path().join("no_such_dir").join("image.dat"));
        assert!(matches!(file.replace_image(&[1]), Err(StoreError::Io{ .. })));
    }
}
