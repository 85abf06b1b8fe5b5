use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{errors::SplitError, split::DatasetSplit};

/// Where the split definition lives when the caller has no better idea.
pub const DEFAULT_SPLIT_FILE: &str = "../data/processed/split_definition.json";

const TRAIN_FRACTION: f64 = 0.6;
const VAL_FRACTION: f64 = 0.2;

/// One sample, identified by its class label and its file name inside the
/// class directory. Serialized as `[class, file]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileEntry(pub String, pub String);

impl FileEntry {
    pub fn new<C: Into<String>, F: Into<String>>(class: C, file: F) -> Self {
        Self(class.into(), file.into())
    }

    pub fn class(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        &self.1
    }

    pub fn path_in<P: AsRef<Path>>(&self, root: P) -> PathBuf {
        root.as_ref().join(&self.0).join(&self.1)
    }
}

/// The persisted three-way partition of a dataset.
///
/// Once written to disk this record is the source of truth for every later
/// run: [`generate_splits`] never re-derives it from the filesystem. Use
/// [`SplitDefinition::is_stale`] to find out whether the dataset has moved on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDefinition {
    #[serde(rename = "Train")]
    pub train: Vec<FileEntry>,
    #[serde(rename = "Validation")]
    pub validation: Vec<FileEntry>,
    #[serde(rename = "Test")]
    pub test: Vec<FileEntry>,
}

impl SplitDefinition {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SplitError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(SplitError::io(path))?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SplitError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(SplitError::io(parent))?;
        }
        let mut o = BufWriter::new(File::create(path).map_err(SplitError::io(path))?);
        serde_json::to_writer(&mut o, self)?;
        o.flush().map_err(SplitError::io(path))?;
        Ok(())
    }

    pub fn get(&self, split: DatasetSplit) -> &[FileEntry] {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Val => &self.validation,
            DatasetSplit::Test => &self.test,
        }
    }

    pub fn len(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(train, validation, test)`
    pub fn into_parts(self) -> (Vec<FileEntry>, Vec<FileEntry>, Vec<FileEntry>) {
        (self.train, self.validation, self.test)
    }

    /// MD5 over the sorted entries of all three groups.
    pub fn fingerprint(&self) -> String {
        fingerprint_entries(
            self.train
                .iter()
                .chain(&self.validation)
                .chain(&self.test)
                .cloned()
                .collect(),
        )
    }

    /// Whether the files currently found under `directory` differ from the
    /// ones this record covers.
    pub fn is_stale<S: AsRef<str>, P: AsRef<Path>>(
        &self,
        classes: &[S],
        directory: P,
    ) -> Result<bool, SplitError> {
        Ok(listing_fingerprint(classes, directory)? != self.fingerprint())
    }
}

/// MD5 over the sorted `(class, file)` listing of `directory`.
pub fn listing_fingerprint<S: AsRef<str>, P: AsRef<Path>>(
    classes: &[S],
    directory: P,
) -> Result<String, SplitError> {
    let directory = directory.as_ref();
    let mut entries = Vec::new();
    for class in classes {
        let class = class.as_ref();
        let files = list_class_files(directory, class)?;
        entries.extend(files.into_iter().map(|f| FileEntry::new(class, f)));
    }
    Ok(fingerprint_entries(entries))
}

fn fingerprint_entries(mut entries: Vec<FileEntry>) -> String {
    entries.sort();
    let mut ctx = md5::Context::new();
    for FileEntry(class, file) in &entries {
        ctx.consume(class.as_bytes());
        ctx.consume(b"/");
        ctx.consume(file.as_bytes());
        ctx.consume(b"\n");
    }
    format!("{:x}", ctx.compute())
}

/// Loads the split stored at `split_file`, or derives a fresh 60/20/20 split
/// of every class directory under `directory` and persists it there.
///
/// An existing file is trusted as-is, even if the dataset changed since it
/// was written. Delete it to regenerate.
pub fn generate_splits<S, D, F, R>(
    classes: &[S],
    directory: D,
    split_file: F,
    rng: &mut R,
) -> Result<SplitDefinition, SplitError>
where
    S: AsRef<str>,
    D: AsRef<Path>,
    F: AsRef<Path>,
    R: Rng + ?Sized,
{
    let split_file = split_file.as_ref();

    let definition = if split_file.exists() {
        println!("train/validation/test subsets were loaded from a pre-generated file");
        info!(path = %split_file.display(), "loading split definition");
        SplitDefinition::load(split_file)?
    } else {
        if classes.is_empty() {
            return Err(SplitError::NoClasses);
        }
        println!("train/validation/test subsets were generated and saved to a file");
        let definition = partition(classes, directory.as_ref(), rng)?;
        definition.save(split_file)?;
        info!(path = %split_file.display(), "saved split definition");
        definition
    };

    for split in DatasetSplit::ALL {
        println!(
            "\tNumber of {} files: {}",
            split.short_name(),
            definition.get(split).len()
        );
    }

    Ok(definition)
}

fn partition<S: AsRef<str>, R: Rng + ?Sized>(
    classes: &[S],
    directory: &Path,
    rng: &mut R,
) -> Result<SplitDefinition, SplitError> {
    let mut definition = SplitDefinition::default();
    for class in classes {
        let class = class.as_ref();
        let mut files = list_class_files(directory, class)?;
        files.shuffle(rng);

        let (num_train, num_val) = split_points(files.len());
        debug!(
            class,
            total = files.len(),
            train = num_train,
            val = num_val,
            "partitioned class"
        );

        let mut entries = files.into_iter().map(|f| FileEntry::new(class, f));
        definition.train.extend(entries.by_ref().take(num_train));
        definition.validation.extend(entries.by_ref().take(num_val));
        definition.test.extend(entries);
    }

    definition.train.shuffle(rng);
    definition.validation.shuffle(rng);
    definition.test.shuffle(rng);
    Ok(definition)
}

/// Sizes of the train and validation cuts; test gets the remainder.
fn split_points(total: usize) -> (usize, usize) {
    let train = (total as f64 * TRAIN_FRACTION) as usize;
    let val = (total as f64 * VAL_FRACTION) as usize;
    (train, val)
}

/// Regular files directly inside `directory/class`, sorted by name.
fn list_class_files(directory: &Path, class: &str) -> Result<Vec<String>, SplitError> {
    let class_dir = directory.join(class);
    let mut files = Vec::new();
    for entry in fs::read_dir(&class_dir).map_err(SplitError::io(&class_dir))? {
        let entry = entry.map_err(SplitError::io(&class_dir))?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry
            .file_name()
            .into_string()
            .map_err(SplitError::NonUtf8FileName)?;
        files.push(name);
    }
    files.sort();
    Ok(files)
}
