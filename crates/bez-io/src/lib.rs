//! Reading control-point and indexed-face files, writing OBJ.

pub mod bez_reader;
pub mod obj_reader;
pub mod obj_writer;

use std::path::Path;

use bez_core::Result;
use bez_mesh::Model;

pub use bez_reader::{parse_bez, read_bez_file};
pub use obj_reader::{parse_obj, read_obj_file};
pub use obj_writer::{to_obj_string, write_obj, write_obj_file};

/// Input formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Bicubic patches as 4×4 control grids (`.bez`)
    Bez,
    /// Vertices and triangle/quad faces (`.obj` and anything else)
    Obj,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bez") => InputFormat::Bez,
            _ => InputFormat::Obj,
        }
    }
}

/// Read a model, choosing the parser from the file extension.
pub fn read_model(path: &Path) -> Result<Model> {
    match InputFormat::from_path(path) {
        InputFormat::Bez => read_bez_file(path),
        InputFormat::Obj => read_obj_file(path),
    }
}
