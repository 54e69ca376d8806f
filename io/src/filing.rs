//! # Serialization interface
//!
//! Binary encoding and decoding of the response spectra.

use crate::{IoError, Result};
use rsgen::SpectrumSet;
use std::{
    fmt::Debug,
    fs::File,
    io::{Read, Write},
    path::Path,
};

/// Encoding and decoding
pub trait Codec
where
    Self: Sized + serde::ser::Serialize + for<'de> serde::de::Deserialize<'de>,
{
    /// Decodes object from [std::io::Read]
    #[inline]
    fn decode<R>(reader: &mut R) -> Result<Self>
    where
        R: Read,
    {
        Ok(bincode::serde::decode_from_std_read(
            reader,
            bincode::config::standard(),
        )?)
    }
    /// Encodes object to [std::io::Write]
    #[inline]
    fn encode<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        bincode::serde::encode_into_std_write(self, writer, bincode::config::standard())?;
        Ok(())
    }
}

impl Codec for SpectrumSet {}
impl Codec for Vec<SpectrumSet> {}

impl<T> Filing for T where T: Codec {}

/// Encoding and decoding to/from [File]
pub trait Filing: Codec {
    /// Decodes object from given path
    fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path> + Debug,
    {
        log::info!("decoding from {path:?}");
        let file = File::open(&path).map_err(|e| IoError::Open(e, path.as_ref().to_path_buf()))?;
        let mut buffer = std::io::BufReader::new(file);
        Self::decode(&mut buffer)
    }
    /// Encodes object to given path
    fn to_path<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path> + Debug,
    {
        log::info!("encoding to {path:?}");
        let file =
            File::create(&path).map_err(|e| IoError::Create(e, path.as_ref().to_path_buf()))?;
        let mut buffer = std::io::BufWriter::new(file);
        self.encode(&mut buffer)?;
        buffer.flush()?;
        Ok(())
    }
}
