pub mod camera;
pub mod feedback;
pub mod kind;
pub mod layer;
pub mod registry;
pub mod surface;

pub use camera::{AngleSource, CameraDirector, CameraPlan, RandomAngles};
pub use feedback::FeedbackChannel;
pub use kind::RequestKind;
pub use layer::{LayerDescriptor, LayerKind, LayerPaint};
pub use registry::SourceLayerRegistry;
pub use surface::{HeadlessSurface, MapSurface, SurfaceOp};
