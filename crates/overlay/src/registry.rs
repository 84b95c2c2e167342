use std::collections::BTreeMap;

use geojson::FeatureCollection;

use crate::layer::LayerDescriptor;
use crate::surface::MapSurface;

#[derive(Debug, Default)]
struct SourceEntry {
    /// Attached layer ids, in draw order.
    layer_ids: Vec<String>,
}

/// Idempotent mutator of the map's named sources and layers.
///
/// Tracks which sources have been created and which layers are attached, so
/// that `add_source` is called at most once per source id across the process
/// lifetime (updates go through set-data) and `add_layer` at most once per
/// layer id.
#[derive(Debug, Default)]
pub struct SourceLayerRegistry {
    sources: BTreeMap<String, SourceEntry>,
}

impl SourceLayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the source on first use, replace its data in place afterwards.
    pub fn upsert_source<S: MapSurface>(
        &mut self,
        surface: &mut S,
        id: &str,
        data: FeatureCollection,
    ) {
        if self.sources.contains_key(id) {
            surface.set_source_data(id, data);
        } else {
            surface.add_source(id, data);
            self.sources.insert(id.to_string(), SourceEntry::default());
        }
    }

    /// Attach each not-yet-attached descriptor for `source_id`, in the given
    /// order. Already-attached ids are skipped silently.
    ///
    /// Panics if the source has not been created: data upsert must precede
    /// layer attachment, and a descriptor set naming the wrong source is a
    /// configuration error.
    pub fn ensure_layers<S: MapSurface>(
        &mut self,
        surface: &mut S,
        source_id: &str,
        descriptors: &[LayerDescriptor],
    ) {
        let entry = self
            .sources
            .get_mut(source_id)
            .unwrap_or_else(|| panic!("ensure_layers before upsert_source for '{source_id}'"));
        for descriptor in descriptors {
            assert_eq!(
                descriptor.source, source_id,
                "layer '{}' declared for source '{}'",
                descriptor.id, descriptor.source
            );
            if entry.layer_ids.iter().any(|id| id == descriptor.id) {
                continue;
            }
            surface.add_layer(descriptor);
            entry.layer_ids.push(descriptor.id.to_string());
        }
    }

    pub fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    pub fn attached_layers(&self, source_id: &str) -> &[String] {
        self.sources
            .get(source_id)
            .map(|entry| entry.layer_ids.as_slice())
            .unwrap_or(&[])
    }
}
