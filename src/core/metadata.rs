//! Validator metadata for introspection.

// ============================================================================
// VALIDATION COMPLEXITY
// ============================================================================

/// Computational complexity classification for validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ValidationComplexity {
    /// O(1) work regardless of input size.
    #[default]
    Constant,
    /// O(n) in the input length.
    Linear,
    /// Anything heavier (regex backtracking, table scans).
    Expensive,
}

impl ValidationComplexity {
    /// Combines two complexity levels, keeping the higher one.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }
}

// ============================================================================
// VALIDATOR METADATA
// ============================================================================

/// Metadata a validator exposes for introspection.
///
/// Used to generate documentation and to order composed validators
/// (cheap checks first).
#[derive(Debug, Clone)]
pub struct ValidatorMetadata {
    /// Human-readable name of the validator.
    pub name: String,
    /// Optional description of what the validator checks.
    pub description: Option<String>,
    /// Computational complexity of one `validate` call.
    pub complexity: ValidationComplexity,
    /// Whether results can be cached (always true for pure validators).
    pub cacheable: bool,
    /// Tags for categorization.
    pub tags: Vec<String>,
}

impl Default for ValidatorMetadata {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            description: None,
            complexity: ValidationComplexity::Constant,
            cacheable: true,
            tags: Vec::new(),
        }
    }
}

impl ValidatorMetadata {
    /// Creates metadata with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the complexity.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_complexity(mut self, complexity: ValidationComplexity) -> Self {
        self.complexity = complexity;
        self
    }

    /// Adds a tag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
