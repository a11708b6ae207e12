//! Configuration for the reference solver

use crate::relation::{EdgeInsets, Priority};

/// Configuration options for `Solver`
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Name given to the root view
    pub root_name: String,

    /// Size of the root view (width, height)
    pub root_size: (f64, f64),

    /// Safe-area insets of the root view
    pub root_safe_area: EdgeInsets,

    /// Priority at which intrinsic content sizes are preferred
    pub intrinsic_priority: Priority,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            root_name: "root".to_string(),
            root_size: (375.0, 667.0),
            root_safe_area: EdgeInsets::zero(),
            intrinsic_priority: Priority::LOW,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root view's name
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Set the root view's size
    pub fn with_root_size(mut self, width: f64, height: f64) -> Self {
        self.root_size = (width, height);
        self
    }

    /// Set the root view's safe-area insets
    pub fn with_root_safe_area(mut self, insets: EdgeInsets) -> Self {
        self.root_safe_area = insets;
        self
    }

    /// Set the priority used for intrinsic content sizes
    pub fn with_intrinsic_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.intrinsic_priority = priority.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.root_name, "root");
        assert_eq!(config.root_size, (375.0, 667.0));
        assert_eq!(config.root_safe_area, EdgeInsets::zero());
        assert_eq!(config.intrinsic_priority, Priority::LOW);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SolverConfig::new()
            .with_root_name("window")
            .with_root_size(390.0, 844.0)
            .with_root_safe_area(EdgeInsets::new(0.0, 47.0, 0.0, 34.0))
            .with_intrinsic_priority(300.0);

        assert_eq!(config.root_name, "window");
        assert_eq!(config.root_size, (390.0, 844.0));
        assert_eq!(config.root_safe_area.top, 47.0);
        assert_eq!(config.intrinsic_priority.value(), 300.0);
    }
}
