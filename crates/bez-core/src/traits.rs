use crate::error::Result;

/// Validate a value before it crosses into the tessellation core.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
