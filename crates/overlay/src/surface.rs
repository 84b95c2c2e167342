use std::collections::BTreeMap;

use geojson::FeatureCollection;

use crate::camera::CameraPlan;
use crate::layer::LayerDescriptor;

/// The renderable map collaborator.
///
/// Mirrors the style primitives of a GL map surface: named geojson sources,
/// style layers bound to them, and an animated camera. Methods are
/// infallible; an invalid source or layer configuration is a programming
/// error, not a runtime condition.
pub trait MapSurface {
    fn add_source(&mut self, id: &str, data: FeatureCollection);
    /// Replace a source's data in place. Must be visually atomic: no frame
    /// may mix old and new geometry or flicker an empty state.
    fn set_source_data(&mut self, id: &str, data: FeatureCollection);
    fn has_source(&self, id: &str) -> bool;
    fn add_layer(&mut self, descriptor: &LayerDescriptor);
    fn has_layer(&self, id: &str) -> bool;
    fn fly_to(&mut self, plan: &CameraPlan);
}

/// One recorded surface mutation, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    AddSource(String),
    SetSourceData(String),
    AddLayer(String),
    FlyTo,
}

/// In-memory map surface.
///
/// Holds the would-be-rendered state and an ordered operation log, serving
/// both tests and headless runs.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    sources: BTreeMap<String, FeatureCollection>,
    layers: Vec<LayerDescriptor>,
    camera: Option<CameraPlan>,
    ops: Vec<SurfaceOp>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_data(&self, id: &str) -> Option<&FeatureCollection> {
        self.sources.get(id)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Attached layer ids in draw order.
    pub fn layer_ids(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.id).collect()
    }

    pub fn camera(&self) -> Option<&CameraPlan> {
        self.camera.as_ref()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn drain_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }
}

impl MapSurface for HeadlessSurface {
    fn add_source(&mut self, id: &str, data: FeatureCollection) {
        self.ops.push(SurfaceOp::AddSource(id.to_string()));
        self.sources.insert(id.to_string(), data);
    }

    fn set_source_data(&mut self, id: &str, data: FeatureCollection) {
        self.ops.push(SurfaceOp::SetSourceData(id.to_string()));
        self.sources.insert(id.to_string(), data);
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_layer(&mut self, descriptor: &LayerDescriptor) {
        self.ops.push(SurfaceOp::AddLayer(descriptor.id.to_string()));
        self.layers.push(*descriptor);
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|l| l.id == id)
    }

    fn fly_to(&mut self, plan: &CameraPlan) {
        self.ops.push(SurfaceOp::FlyTo);
        self.camera = Some(*plan);
    }
}
