use std::{fs::File, path::Path};

use memmap::{Mmap, MmapOptions};

use crate::{Error, Result};

/// Bytes of a volume, either owned or memory mapped
pub enum DataSource {
    Vec(Vec<u8>),
    Mmap(Mmap),
}

impl DataSource {
    pub fn get_slice(&self) -> &[u8] {
        match self {
            DataSource::Vec(v) => v.as_slice(),
            DataSource::Mmap(m) => &m[..],
        }
    }

    pub fn len(&self) -> usize {
        self.get_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_vec(vec: Vec<u8>) -> DataSource {
        DataSource::Vec(vec)
    }

    /// Map file into memory
    ///
    /// Empty files cannot be mapped, they produce empty `Vec` source.
    pub fn from_file<P>(path: P) -> Result<DataSource>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let metadata = file.metadata().map_err(io_err)?;

        if !metadata.is_file() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }

        if metadata.len() == 0 {
            return Ok(DataSource::Vec(vec![]));
        }

        // The file is expected not to change while mapped
        let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(io_err)?;
        Ok(DataSource::Mmap(mmap))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::TempFile;

    #[test]
    fn read_mapped_file() {
        let file = TempFile::with_content("vol_reader_mapped.raw", &[1, 2, 3, 4]);
        let ds = DataSource::from_file(file.path()).unwrap();
        assert!(matches!(ds, DataSource::Mmap(_)));
        assert_eq!(ds.get_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn read_empty_file() {
        let file = TempFile::with_content("vol_reader_empty.raw", &[]);
        let ds = DataSource::from_file(file.path()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn missing_file() {
        let res = DataSource::from_file("this/path/does/not/exist.raw");
        assert!(matches!(res, Err(Error::Io { .. })));
    }

    #[test]
    fn directory_is_not_a_file() {
        let res = DataSource::from_file(std::env::temp_dir());
        assert!(matches!(res, Err(Error::NotAFile(_)) | Err(Error::Io { .. })));
    }
}
