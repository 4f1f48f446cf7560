/// Numeric thresholds shared by evaluation and tessellation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Squared sine of the smallest tangent angle that still yields a normal
    pub degenerate: f64,
    /// Parametric offset used to probe for a normal next to a singular sample
    pub nudge: f64,
}

impl Tolerance {
    pub const DEFAULT_DEGENERATE: f64 = 1e-20;
    pub const DEFAULT_NUDGE: f64 = 1e-4;

    pub fn new(degenerate: f64, nudge: f64) -> Self {
        Self { degenerate, nudge }
    }

    pub fn default_precision() -> Self {
        Self {
            degenerate: Self::DEFAULT_DEGENERATE,
            nudge: Self::DEFAULT_NUDGE,
        }
    }

    /// Check if a cross product is too short to define a direction.
    ///
    /// `cross_sq` is `|a × b|²` and `scale_sq` is `|a|²·|b|²`; their ratio is
    /// the squared sine of the angle between `a` and `b`.
    pub fn is_degenerate(self, cross_sq: f64, scale_sq: f64) -> bool {
        scale_sq <= 0.0 || cross_sq <= self.degenerate * scale_sq
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_cross() {
        let tol = Tolerance::default();
        assert!(tol.is_degenerate(0.0, 0.0));
        assert!(tol.is_degenerate(1e-30, 1.0));
        assert!(!tol.is_degenerate(1.0, 1.0));
        // Tiny but perpendicular tangents still define a normal
        assert!(!tol.is_degenerate(1e-40, 1e-40));
    }
}
