//! bezmesh render preparation: view state, matrices, and GPU-ready buffers.

pub mod pipeline;
pub mod view;

pub use pipeline::{prepare_model, FrameUniforms, GpuVertex, RenderMesh, DEFAULT_MODEL_COLOR};
pub use view::{DragButtons, PolygonMode, ViewCommand, ViewState};
