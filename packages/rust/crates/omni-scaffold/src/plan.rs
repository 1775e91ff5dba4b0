//! Composition plan: which transforms run on which file, in which order.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

use crate::catalog::Catalog;
use crate::error::ScaffoldError;
use crate::module::{EnabledModules, Module};
use crate::transforms::TransformFn;

/// One transform scheduled on one file.
#[derive(Clone, Copy)]
pub struct PlannedTransform {
    /// Owning module.
    pub module: Module,
    /// Registration name.
    pub name: &'static str,
    /// The edit.
    pub apply: TransformFn,
}

impl fmt::Debug for PlannedTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}

impl Serialize for PlannedTransform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.module)?;
        seq.serialize_element(self.name)?;
        seq.end()
    }
}

/// Per-file ordered transform lists for one run.
///
/// The order for a file depends only on the catalog's precedence table,
/// never on the order modules were selected in.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CompositionPlan {
    files: BTreeMap<String, Vec<PlannedTransform>>,
}

impl CompositionPlan {
    /// Build the plan for `enabled`.
    ///
    /// # Errors
    /// `ScaffoldError::Catalog` if the catalog fails validation.
    pub fn build(catalog: &Catalog, enabled: &EnabledModules) -> Result<Self, ScaffoldError> {
        catalog.validate()?;

        let mut files = BTreeMap::new();
        for entry in catalog.precedence().entries() {
            let steps: Vec<PlannedTransform> = entry
                .order
                .iter()
                .filter_map(|module| catalog.registration(&entry.file, *module, enabled))
                .map(|r| PlannedTransform {
                    module: r.module,
                    name: r.name,
                    apply: r.apply,
                })
                .collect();
            if !steps.is_empty() {
                files.insert(entry.file.clone(), steps);
            }
        }

        tracing::debug!(files = files.len(), "built composition plan");
        Ok(Self { files })
    }

    /// Target files, sorted.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Ordered transforms for `file` (empty if the file is not targeted).
    #[must_use]
    pub fn steps(&self, file: &str) -> &[PlannedTransform] {
        self.files.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ordered transform names for `file`.
    #[must_use]
    pub fn names(&self, file: &str) -> Vec<&'static str> {
        self.steps(file).iter().map(|step| step.name).collect()
    }

    /// Iterate `(file, steps)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PlannedTransform])> {
        self.files
            .iter()
            .map(|(file, steps)| (file.as_str(), steps.as_slice()))
    }

    /// Number of targeted files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file needs transforming.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
