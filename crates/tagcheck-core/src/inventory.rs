//! The set of unique image references and where each one was found.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::reference::ImageReference;

/// Unique image references mapped to the documentation files they occur in.
///
/// References iterate in lexicographic order. Each reference's file list keeps
/// discovery order and holds a given file at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageInventory {
    locations: BTreeMap<ImageReference, Vec<String>>,
}

impl ImageInventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `reference` occurs in `file`.
    ///
    /// Returns `true` if the location was new.
    pub fn record(&mut self, reference: ImageReference, file: impl Into<String>) -> bool {
        let file = file.into();
        let files = self.locations.entry(reference).or_default();

        if files.contains(&file) {
            return false;
        }
        files.push(file);
        true
    }

    /// Folds another inventory into this one, appending its locations after ours.
    pub fn merge(&mut self, other: Self) {
        for (reference, files) in other.locations {
            for file in files {
                self.record(reference.clone(), file);
            }
        }
    }

    /// Returns the files a reference was found in.
    #[must_use]
    pub fn locations(&self, reference: &str) -> Option<&[String]> {
        self.locations.get(reference).map(Vec::as_slice)
    }

    /// Returns `true` if the reference was found anywhere.
    #[must_use]
    pub fn contains(&self, reference: &str) -> bool {
        self.locations.contains_key(reference)
    }

    /// Iterates over references in lexicographic order.
    pub fn references(&self) -> impl Iterator<Item = &ImageReference> {
        self.locations.keys()
    }

    /// Iterates over references and their files in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&ImageReference, &[String])> {
        self.locations
            .iter()
            .map(|(reference, files)| (reference, files.as_slice()))
    }

    /// Returns the number of unique references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if no references were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl FromIterator<(ImageReference, String)> for ImageInventory {
    fn from_iter<I: IntoIterator<Item = (ImageReference, String)>>(iter: I) -> Self {
        let mut inventory = Self::new();
        for (reference, file) in iter {
            inventory.record(reference, file);
        }
        inventory
    }
}
