// ============================================================
// Layer 6 — Archive Fetcher
// ============================================================
// Downloads the dataset archive with a single blocking GET and
// streams the body to disk in small fixed-size chunks.
//
// There is no retry, resume, or checksum. A transport error or
// any status other than 200 OK fails the run.
//
// Reference: reqwest crate documentation (blocking client)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

/// Bytes read from the response per write.
pub const DEFAULT_CHUNK_SIZE: usize = 128;

/// Downloads one URL to a file.
pub struct Fetcher {
    url:        String,
    chunk_size: usize,
}

impl Fetcher {
    pub fn new(url: impl Into<String>, chunk_size: usize) -> Self {
        Self {
            url:        url.into(),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Stream the URL into `dest`, replacing any existing file.
    /// Returns the number of bytes written.
    pub fn download(&self, dest: &Path) -> Result<u64> {
        tracing::info!("Downloading '{}' → '{}'", self.url, dest.display());

        let mut response = reqwest::blocking::get(&self.url)
            .with_context(|| format!("GET '{}' failed", self.url))?;

        let status = response.status();
        if status != StatusCode::OK {
            bail!("GET '{}' returned {}", self.url, status);
        }

        let mut file = File::create(dest)
            .with_context(|| format!("Cannot create '{}'", dest.display()))?;

        let written = copy_in_chunks(&mut response, &mut file, self.chunk_size)
            .with_context(|| format!("Download to '{}' interrupted", dest.display()))?;
        file.flush()?;

        tracing::info!("Download done ({} bytes)", written);
        Ok(written)
    }
}

/// Copy `reader` into `writer` through a `chunk_size` buffer.
pub fn copy_in_chunks<R, W>(reader: &mut R, writer: &mut W, chunk_size: usize) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf     = vec![0u8; chunk_size.max(1)];
    let mut written = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        written += n as u64;
    }

    Ok(written)
}
