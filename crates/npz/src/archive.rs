use {
    crate::{
        error::{NpzError, Result},
        npy,
    },
    base::Tensor,
    std::{
        fs::File,
        io::{BufReader, Read, Seek, Write},
        path::Path,
    },
    zip::{ZipArchive, ZipWriter, write::SimpleFileOptions},
};

const MEMBER_SUFFIX: &str = ".npy";

/// A NumPy `.npz` bundle opened for reading.
///
/// Arrays are addressed by key, the member name without its `.npy` suffix,
/// and decoded lazily on access.
pub struct NpzArchive<R> {
    archive: ZipArchive<R>,
}

impl NpzArchive<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> NpzArchive<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Array keys in archive order.
    pub fn keys(&self) -> Vec<String> {
        self.archive
            .file_names()
            .map(|name| name.strip_suffix(MEMBER_SUFFIX).unwrap_or(name).to_string())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.archive.index_for_name(&member_name(key)).is_some()
    }

    /// Decode the array stored under `key`.
    pub fn array(&mut self, key: &str) -> Result<Tensor<f64>> {
        let mut member = match self.archive.by_name(&member_name(key)) {
            Ok(member) => member,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(NpzError::MissingArray(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let mut bytes = Vec::with_capacity(member.size() as usize);
        member.read_to_end(&mut bytes)?;
        npy::decode(&bytes)
    }

    /// Decode the array under `key` if the archive has one.
    pub fn optional_array(&mut self, key: &str) -> Result<Option<Tensor<f64>>> {
        if self.contains(key) {
            self.array(key).map(Some)
        } else {
            Ok(None)
        }
    }
}

fn member_name(key: &str) -> String {
    format!("{key}{MEMBER_SUFFIX}")
}

/// Writes arrays into a new `.npz` bundle, like `numpy.savez`.
pub struct NpzWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl NpzWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write + Seek> NpzWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    /// Append `tensor` as `<key>.npy`, stored uncompressed.
    pub fn add(&mut self, key: &str, tensor: &Tensor<f64>) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        self.zip.start_file(member_name(key), options)?;
        self.zip.write_all(&npy::encode(tensor))?;
        Ok(())
    }

    pub fn finish(self) -> Result<W> {
        Ok(self.zip.finish()?)
    }
}
