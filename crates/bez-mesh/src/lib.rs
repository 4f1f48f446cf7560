pub mod adaptive;
pub mod config;
pub mod model;
mod normal;
pub mod patch;
pub mod triangle;
pub mod triangulate;
pub mod uniform;

pub use adaptive::{adaptive_tessellate, AdaptiveMesh};
pub use config::{ShadingMode, SubdivisionMode, TessellationConfig};
pub use model::{Model, SubdivisionStats};
pub use patch::Patch;
pub use triangle::{Triangle, Vertex};
pub use triangulate::TriangleMesh;
pub use uniform::{checked_subdivision_count, subdivision_count, uniform_tessellate};
