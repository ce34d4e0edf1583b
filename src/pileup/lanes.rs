//! Lane registry for the pileup renderer.
//!
//! A lane is one horizontal print track. It holds the not-yet-printed
//! remainder of a read, or nothing when free. Each step takes the registry
//! by value and hands it back, so a segment is processed as
//! `assign* -> emit -> collect_garbage` with no shared mutable state.

/// Indexable collection of optional read remainders.
///
/// # Invariants
///
/// - A lane is free iff it holds `None`.
/// - Interior free lanes are kept and reused; only trailing free lanes are
///   dropped by [`LaneRegistry::collect_garbage`].
/// - The number of lanes grows only when no free lane can take a new read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneRegistry {
    lanes: Vec<Option<String>>,
    /// Maximum number of lanes ever held (for statistics).
    max_lanes: usize,
}

impl LaneRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lanes, free or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Number of lanes currently holding read content.
    pub fn occupied(&self) -> usize {
        self.lanes.iter().filter(|lane| lane.is_some()).count()
    }

    /// Current lane contents, in lane order.
    #[inline]
    pub fn lanes(&self) -> &[Option<String>] {
        &self.lanes
    }

    /// Largest number of lanes held at any point.
    #[inline]
    pub fn max_lanes(&self) -> usize {
        self.max_lanes
    }

    /// Place a padded read in the first free lane, or a new trailing lane
    /// if every lane is occupied.
    #[must_use]
    pub fn assign(mut self, padded: String) -> Self {
        match self.lanes.iter().position(Option::is_none) {
            Some(idx) => self.lanes[idx] = Some(padded),
            None => {
                self.lanes.push(Some(padded));
                self.max_lanes = self.max_lanes.max(self.lanes.len());
            }
        }
        self
    }

    /// Take up to `width` characters from the front of every lane.
    ///
    /// Returns the registry with the remainders and one printed row per lane
    /// (free lanes print as an empty row). A lane whose content is fully
    /// consumed becomes free. Content must be ASCII.
    #[must_use]
    pub fn emit(self, width: usize) -> (Self, Vec<String>) {
        let mut rows = Vec::with_capacity(self.lanes.len());
        let lanes = self
            .lanes
            .into_iter()
            .map(|lane| match lane {
                None => {
                    rows.push(String::new());
                    None
                }
                Some(mut content) if content.len() > width => {
                    let rest = content.split_off(width);
                    rows.push(content);
                    Some(rest)
                }
                Some(content) => {
                    rows.push(content);
                    None
                }
            })
            .collect();

        (
            Self {
                lanes,
                max_lanes: self.max_lanes,
            },
            rows,
        )
    }

    /// Drop free lanes from the end, stopping at the last occupied one.
    #[must_use]
    pub fn collect_garbage(mut self) -> Self {
        while matches!(self.lanes.last(), Some(None)) {
            self.lanes.pop();
        }
        self
    }
}
