use std::path::{Path, PathBuf};

use image::RgbImage;

use super::{errors::LabelOrdinalError, generator::SplitDefinition, split::DatasetSplit};

/// The samples of one split of a class-per-directory image dataset.
///
/// Only paths are held in memory; images are decoded on demand by
/// [`ImageFolder::load`].
pub struct ImageFolder {
    samples: Vec<(PathBuf, usize)>,
    label_names: Vec<String>,
    pub split: DatasetSplit,
}

impl ImageFolder {
    /// `classes` fixes the label ordinals: a sample of `classes[i]` gets label `i`.
    /// Entries of classes not listed are skipped.
    pub fn new<P: AsRef<Path>, S: AsRef<str>>(
        root: P,
        classes: &[S],
        definition: &SplitDefinition,
        split: DatasetSplit,
    ) -> Self {
        let root = root.as_ref();
        let label_names: Vec<String> = classes.iter().map(|c| c.as_ref().to_owned()).collect();
        let samples = definition
            .get(split)
            .iter()
            .filter_map(|entry| {
                let lbl = label_names.iter().position(|c| c == entry.class())?;
                Some((entry.path_in(root), lbl))
            })
            .collect();
        Self {
            samples,
            label_names,
            split,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn num_classes(&self) -> usize {
        self.label_names.len()
    }

    pub fn label_name(&self, lbl: usize) -> Result<&str, LabelOrdinalError> {
        self.label_names
            .get(lbl)
            .map(String::as_str)
            .ok_or(LabelOrdinalError {
                found: lbl,
                max: self.label_names.len().saturating_sub(1),
            })
    }

    pub fn path(&self, index: usize) -> &Path {
        &self.samples[index].0
    }

    pub fn load(&self, index: usize) -> Result<(RgbImage, usize), image::ImageError> {
        let (path, lbl) = &self.samples[index];
        Ok((image::open(path)?.to_rgb8(), *lbl))
    }
}

impl std::ops::Index<usize> for ImageFolder {
    type Output = (PathBuf, usize);
    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}
