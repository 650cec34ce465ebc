use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use image::{ImageFormat, RgbImage};
use serde::Serialize;
use sha2::{Digest, Sha256};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{PlaylistError, Result};

/// A file written by [`PageEmitter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedFile {
    /// Location on disk.
    pub path: PathBuf,
    /// Caller-facing path, e.g. relative to a web root.
    pub public_path: String,
    /// Hex SHA-256 of the written bytes.
    pub sha256: String,
}

/// Page images plus the archive bundling them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedPages {
    pub pages: Vec<EmittedFile>,
    pub archive: EmittedFile,
}

/// Writes canvases as timestamp-named PNGs into one output directory.
///
/// Names only carry one-second resolution: two runs of the same mode within the same second
/// write to the same file names, and the later one wins.
#[derive(Debug, Clone)]
pub struct PageEmitter {
    output_dir: PathBuf,
    public_prefix: String,
}

impl PageEmitter {
    /// Public paths are formed as `<public_prefix>/<file name>`.
    pub fn new(output_dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// Emitter whose public paths mirror the output directory.
    pub fn local(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let prefix = output_dir.to_string_lossy().into_owned();
        Self::new(output_dir, prefix)
    }

    pub fn single_file_name(timestamp: i64) -> String {
        format!("playlist_{timestamp}.png")
    }

    pub fn page_file_name(timestamp: i64, page: usize) -> String {
        format!("playlist_page_{timestamp}_{page:02}.png")
    }

    pub fn archive_file_name(timestamp: i64) -> String {
        format!("playlist_pages_{timestamp}.zip")
    }

    /// Save the single tall image.
    pub fn emit_single(&self, canvas: &RgbImage, timestamp: i64) -> Result<EmittedFile> {
        self.prepare_dir()?;
        self.write_png(canvas, &Self::single_file_name(timestamp))
    }

    /// Save each page (1-based numbering follows slice order) and bundle them into a zip.
    pub fn emit_pages(&self, canvases: &[RgbImage], timestamp: i64) -> Result<EmittedPages> {
        self.prepare_dir()?;
        let mut pages = Vec::with_capacity(canvases.len());
        for (idx, canvas) in canvases.iter().enumerate() {
            pages.push(self.write_png(canvas, &Self::page_file_name(timestamp, idx + 1))?);
        }
        let archive = self.write_archive(&pages, &Self::archive_file_name(timestamp))?;
        Ok(EmittedPages { pages, archive })
    }

    /// Save an arbitrary canvas under `name`, e.g. an exported band.
    pub fn emit_named(&self, canvas: &RgbImage, name: &str) -> Result<EmittedFile> {
        self.prepare_dir()?;
        self.write_png(canvas, name)
    }

    fn prepare_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|err| PlaylistError::io(&self.output_dir, err))
    }

    fn write_png(&self, canvas: &RgbImage, name: &str) -> Result<EmittedFile> {
        let path = self.output_dir.join(name);
        let file = File::create(&path).map_err(|err| PlaylistError::io(&path, err))?;
        let mut writer = BufWriter::new(file);
        canvas
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|source| PlaylistError::Encode {
                path: path.clone(),
                source,
            })?;
        writer.flush().map_err(|err| PlaylistError::io(&path, err))?;
        drop(writer);
        self.describe(path, name)
    }

    fn write_archive(&self, pages: &[EmittedFile], name: &str) -> Result<EmittedFile> {
        let path = self.output_dir.join(name);
        let archive_err = |source| PlaylistError::Archive {
            path: path.clone(),
            source,
        };
        let file = File::create(&path).map_err(|err| PlaylistError::io(&path, err))?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = SimpleFileOptions::default();
        for page in pages {
            let entry = page
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let bytes = fs::read(&page.path).map_err(|err| PlaylistError::io(&page.path, err))?;
            zip.start_file(entry, options).map_err(archive_err)?;
            zip.write_all(&bytes).map_err(|err| PlaylistError::io(&path, err))?;
        }
        let mut writer = zip.finish().map_err(archive_err)?;
        writer.flush().map_err(|err| PlaylistError::io(&path, err))?;
        drop(writer);
        self.describe(path, name)
    }

    fn describe(&self, path: PathBuf, name: &str) -> Result<EmittedFile> {
        let bytes = fs::read(&path).map_err(|err| PlaylistError::io(&path, err))?;
        let digest = Sha256::digest(&bytes);
        Ok(EmittedFile {
            public_path: self.public_path(name),
            sha256: format!("{digest:x}"),
            path,
        })
    }

    fn public_path(&self, name: &str) -> String {
        let prefix = self.public_prefix.trim_end_matches(['/', '\\']);
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        }
    }
}
