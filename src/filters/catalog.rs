//! Filter catalog: which parameters each filter accepts.

use crate::core::filter::{Category, FilterKind, FilterMetadata};
use crate::core::parameter::{ParameterKind, ParameterSet};
use crate::filters::executor::ImageOperationExecutor;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Set of parameter kinds a filter accepts.
pub type AcceptedParameters = BTreeSet<ParameterKind>;

/// Recognized inputs of each filter.
///
/// MaskToAlpha has no tunable input at all, and ZoomBlur's only input is an
/// amount, which is none of the recognized kinds.
pub fn builtin_parameters(kind: FilterKind) -> &'static [ParameterKind] {
    use ParameterKind::*;
    match kind {
        FilterKind::Crystallize => &[Radius],
        FilterKind::Edges => &[Intensity],
        FilterKind::GaussianBlur => &[Radius],
        FilterKind::Pixellate => &[Scale],
        FilterKind::SepiaTone => &[Intensity],
        FilterKind::UnsharpMask => &[Intensity, Radius],
        FilterKind::Vignette => &[Intensity, Radius],
        FilterKind::TwirlDistortion => &[Radius],
        FilterKind::MaskToAlpha => &[],
        FilterKind::ZoomBlur => &[],
    }
}

fn describe(kind: FilterKind) -> (&'static str, &'static [&'static str]) {
    match kind {
        FilterKind::Crystallize => ("Breaks the image into polygonal color cells", &["voronoi", "cells"]),
        FilterKind::Edges => ("Highlights edges and darkens flat regions", &["sobel", "outline"]),
        FilterKind::GaussianBlur => ("Softens the image with a Gaussian kernel", &["soften", "smooth"]),
        FilterKind::Pixellate => ("Renders the image as large square blocks", &["mosaic", "blocks"]),
        FilterKind::SepiaTone => ("Maps colors to warm brown tones", &["vintage", "brown"]),
        FilterKind::UnsharpMask => ("Increases contrast along edges", &["sharpen", "detail"]),
        FilterKind::Vignette => ("Darkens the image towards its borders", &["dark", "border"]),
        FilterKind::TwirlDistortion => ("Rotates pixels around the center", &["swirl", "rotate"]),
        FilterKind::MaskToAlpha => ("Turns luminance into transparency", &["alpha", "mask"]),
        FilterKind::ZoomBlur => ("Blurs outward from the center", &["radial", "motion"]),
    }
}

/// Catalog entry with metadata and the accepted parameter set.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Display metadata.
    pub metadata: FilterMetadata,
    /// Accepted parameter kinds.
    pub accepted: AcceptedParameters,
}

/// Static lookup of the filters and the parameters they accept.
#[derive(Debug, Clone)]
pub struct FilterCatalog {
    /// Entries in menu order.
    entries: IndexMap<FilterKind, CatalogEntry>,
}

impl FilterCatalog {
    /// Catalog built from the fixed table of recognized inputs.
    pub fn builtin() -> Self {
        Self::from_declared(builtin_parameters)
    }

    /// Catalog built from the inputs an executor declares.
    ///
    /// Only recognized parameter kinds can be declared, so anything else the
    /// underlying library takes is never exposed.
    pub fn from_executor(executor: &dyn ImageOperationExecutor) -> Self {
        Self::from_declared(|kind| executor.declared_parameters(kind))
    }

    fn from_declared<'a, F>(declared: F) -> Self
    where
        F: Fn(FilterKind) -> &'a [ParameterKind],
    {
        let entries = FilterKind::all()
            .iter()
            .map(|&kind| {
                let (description, tags) = describe(kind);
                let accepted: AcceptedParameters = declared(kind).iter().copied().collect();
                let metadata = accepted
                    .iter()
                    .fold(
                        FilterMetadata::builder(kind).description(description).tags(tags.iter().copied()),
                        |builder, p| builder.parameter(*p),
                    )
                    .build();
                (kind, CatalogEntry { metadata, accepted })
            })
            .collect();
        Self { entries }
    }

    /// The parameter kinds `kind` accepts.
    pub fn accepted_parameters(&self, kind: FilterKind) -> &AcceptedParameters {
        &self.entry(kind).accepted
    }

    /// Whether `kind` accepts `parameter`.
    pub fn accepts(&self, kind: FilterKind, parameter: ParameterKind) -> bool {
        self.entry(kind).accepted.contains(&parameter)
    }

    /// Default parameter values for `kind`, covering exactly its accepted set.
    pub fn defaults_for(&self, kind: FilterKind) -> ParameterSet {
        ParameterSet::defaults_for(self.accepted_parameters(kind))
    }

    /// Get metadata for a filter.
    pub fn metadata(&self, kind: FilterKind) -> &FilterMetadata {
        &self.entry(kind).metadata
    }

    /// Get a catalog entry.
    pub fn entry(&self, kind: FilterKind) -> &CatalogEntry {
        // Constructors insert every kind of the closed set.
        &self.entries[&kind]
    }

    /// All filter kinds in menu order.
    pub fn kinds(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.entries.keys().copied()
    }

    /// All entries in menu order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Search filters by id, name, description or tag.
    pub fn search(&self, query: &str) -> Vec<FilterKind> {
        let query = query.to_lowercase();

        self.entries
            .iter()
            .filter(|(_, entry)| {
                let m = &entry.metadata;
                m.id.contains(&query)
                    || m.name.to_lowercase().contains(&query)
                    || m.description.to_lowercase().contains(&query)
                    || m.tags.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Get filters grouped by category for menu display.
    pub fn grouped_by_category(&self) -> IndexMap<Category, Vec<&FilterMetadata>> {
        let mut grouped: IndexMap<Category, Vec<&FilterMetadata>> =
            Category::all().iter().map(|c| (*c, Vec::new())).collect();

        for entry in self.entries.values() {
            grouped
                .entry(entry.metadata.category)
                .or_default()
                .push(&entry.metadata);
        }

        grouped.retain(|_, filters| !filters.is_empty());
        for filters in grouped.values_mut() {
            filters.sort_by(|a, b| a.name.cmp(&b.name));
        }

        grouped
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::executor::BuiltinExecutor;
    use ParameterKind::*;

    #[test]
    fn test_accepted_parameters_table() {
        let catalog = FilterCatalog::builtin();

        assert_eq!(catalog.accepted_parameters(FilterKind::SepiaTone), &BTreeSet::from([Intensity]));
        assert_eq!(catalog.accepted_parameters(FilterKind::GaussianBlur), &BTreeSet::from([Radius]));
        assert_eq!(catalog.accepted_parameters(FilterKind::Pixellate), &BTreeSet::from([Scale]));
        assert_eq!(
            catalog.accepted_parameters(FilterKind::UnsharpMask),
            &BTreeSet::from([Intensity, Radius])
        );
        assert!(catalog.accepted_parameters(FilterKind::MaskToAlpha).is_empty());
    }

    #[test]
    fn test_non_empty_except_untunable() {
        let catalog = FilterCatalog::builtin();
        for kind in catalog.kinds() {
            let accepted = catalog.accepted_parameters(kind);
            match kind {
                FilterKind::MaskToAlpha | FilterKind::ZoomBlur => assert!(accepted.is_empty()),
                _ => assert!(!accepted.is_empty(), "{} should accept a parameter", kind),
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = FilterCatalog::builtin();
        let b = FilterCatalog::builtin();
        for kind in FilterKind::all() {
            assert_eq!(a.accepted_parameters(*kind), b.accepted_parameters(*kind));
        }
    }

    #[test]
    fn test_from_executor_matches_builtin() {
        let executor = BuiltinExecutor::new();
        let from_executor = FilterCatalog::from_executor(&executor);
        let builtin = FilterCatalog::builtin();

        for kind in FilterKind::all() {
            assert_eq!(from_executor.accepted_parameters(*kind), builtin.accepted_parameters(*kind));
        }
    }

    #[test]
    fn test_defaults_cover_accepted_only() {
        let catalog = FilterCatalog::builtin();
        let defaults = catalog.defaults_for(FilterKind::Vignette);

        assert_eq!(defaults.get(Intensity), Some(0.0));
        assert_eq!(defaults.get(Radius), Some(500.0));
        assert_eq!(defaults.get(Scale), None);
    }

    #[test]
    fn test_search() {
        let catalog = FilterCatalog::builtin();
        assert_eq!(catalog.search("mosaic"), vec![FilterKind::Pixellate]);
        assert!(catalog.search("blur").contains(&FilterKind::ZoomBlur));
        assert!(catalog.search("nonexistent").is_empty());
    }

    #[test]
    fn test_category_grouping() {
        let catalog = FilterCatalog::builtin();
        let grouped = catalog.grouped_by_category();

        let blur: Vec<_> = grouped[&Category::Blur].iter().map(|m| m.kind).collect();
        assert_eq!(blur, vec![FilterKind::GaussianBlur, FilterKind::ZoomBlur]);
        assert_eq!(grouped.values().map(Vec::len).sum::<usize>(), catalog.len());
    }
}
