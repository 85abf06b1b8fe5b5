//! Unpacking of the raw dataset archive.

use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("unsupported archive format: {0}")]
    Unsupported(PathBuf),
}

impl ArchiveError {
    fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Extracts every entry of `archive` into `out_dir`, creating it if needed
/// and overwriting files that are already there. Returns the number of files
/// written.
///
/// `.tar.gz` and `.tgz` archives are gunzipped and untarred; anything else is
/// read as a ZIP archive. Entries whose paths would land outside `out_dir`
/// are skipped.
pub fn extract_archive<A: AsRef<Path>, O: AsRef<Path>>(
    archive: A,
    out_dir: O,
) -> Result<usize, ArchiveError> {
    let archive = archive.as_ref();
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(ArchiveError::io(out_dir))?;

    let f = File::open(archive).map_err(ArchiveError::io(archive))?;
    println!("Extracting {} to {}", archive.display(), out_dir.display());
    let written = if is_tarball(archive) {
        untar(f, archive, out_dir)?
    } else {
        unzip(f, out_dir)?
    };
    info!(
        archive = %archive.display(),
        out_dir = %out_dir.display(),
        files = written,
        "extracted archive"
    );
    Ok(written)
}

fn is_tarball(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    name.ends_with(".tar.gz") || name.ends_with(".tgz")
}

fn unzip(f: File, out_dir: &Path) -> Result<usize, ArchiveError> {
    let mut archive = zip::ZipArchive::new(BufReader::new(f))?;
    let pb = indicatif::ProgressBar::new(archive.len() as u64);

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        pb.inc(1);
        let outpath = match entry.enclosed_name() {
            Some(path) => out_dir.join(path),
            None => {
                warn!(name = entry.name(), "skipping entry outside output directory");
                continue;
            }
        };
        if entry.is_dir() {
            fs::create_dir_all(&outpath).map_err(ArchiveError::io(&outpath))?;
            continue;
        }
        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent).map_err(ArchiveError::io(parent))?;
        }
        let mut outfile = File::create(&outpath).map_err(ArchiveError::io(&outpath))?;
        io::copy(&mut entry, &mut outfile).map_err(ArchiveError::io(&outpath))?;
        written += 1;
    }
    pb.finish_and_clear();
    Ok(written)
}

#[cfg(feature = "tarball")]
fn untar(f: File, archive_path: &Path, out_dir: &Path) -> Result<usize, ArchiveError> {
    let decoder = flate2::read::GzDecoder::new(BufReader::new(f));
    let mut archive = tar::Archive::new(decoder);
    let pb = indicatif::ProgressBar::new_spinner();

    let mut written = 0;
    for entry in archive.entries().map_err(ArchiveError::io(archive_path))? {
        let mut entry = entry.map_err(ArchiveError::io(archive_path))?;
        pb.inc(1);
        let is_file = entry.header().entry_type().is_file();
        let unpacked = entry
            .unpack_in(out_dir)
            .map_err(ArchiveError::io(out_dir))?;
        if !unpacked {
            warn!("skipping tar entry outside output directory");
        } else if is_file {
            written += 1;
        }
    }
    pb.finish_and_clear();
    Ok(written)
}

#[cfg(not(feature = "tarball"))]
fn untar(_f: File, archive_path: &Path, _out_dir: &Path) -> Result<usize, ArchiveError> {
    Err(ArchiveError::Unsupported(archive_path.to_path_buf()))
}
