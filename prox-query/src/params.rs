//! Parameters for collision-mesh construction.

/// Parameters for building a collision mesh.
///
/// # Example
///
/// ```
/// use prox_query::BuildParams;
///
/// let params = BuildParams::default().with_max_tris_per_leaf(16);
/// assert_eq!(params.max_tris_per_leaf, 16);
/// ```
#[derive(Debug, Clone)]
pub struct BuildParams {
    /// Maximum triangles per leaf bucket. Subdivision stops once a cell
    /// holds this many triangles or fewer. Values below 1 are clamped to 1.
    /// Typical values are 4 to 1024. Default: 32
    pub max_tris_per_leaf: usize,

    /// Seed for the per-leaf debug colors. `None` draws from entropy.
    /// The colors are used only for visualization; queries ignore them.
    pub color_seed: Option<u64>,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            max_tris_per_leaf: 32,
            color_seed: None,
        }
    }
}

impl BuildParams {
    /// Create params with a fixed debug-color seed.
    ///
    /// Two builds of the same mesh with the same seed produce identical
    /// collision meshes, colors included.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            color_seed: Some(seed),
            ..Default::default()
        }
    }

    /// Set the leaf capacity (clamped to at least 1).
    #[must_use]
    pub fn with_max_tris_per_leaf(mut self, max: usize) -> Self {
        self.max_tris_per_leaf = max.max(1);
        self
    }

    /// Set the debug-color seed.
    #[must_use]
    pub const fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }

    /// Remove the seed (use entropy for debug colors).
    #[must_use]
    pub const fn with_entropy_colors(mut self) -> Self {
        self.color_seed = None;
        self
    }
}
