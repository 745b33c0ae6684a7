//! Search configuration parameters.

use game_core::PlayerId;

/// How the N-player minimax engine models the non-maximizing players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinimaxMode {
    /// Every other player acts to minimize the designated player's outcome.
    /// This is the classic generalization of 2-player minimax to N players.
    Paranoid,

    /// Every player maximizes their own utility. Yields different results
    /// than [`Paranoid`](Self::Paranoid) for 3+ player games.
    Selfish,
}

/// Configuration shared by the minimax-style engines.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Look-ahead bound in plies. `-1` means search to terminal states.
    pub depth: i32,

    /// Whether to memoize node results. Requires the game to provide a
    /// stable `state_hash`; disable for states that cannot.
    pub memoize: bool,

    /// Maximum number of cache entries. `None` = unbounded. When the cache
    /// is full, new results are computed but not stored (no eviction).
    pub cache_capacity: Option<usize>,

    /// The player whose outcome is optimized. `None` = the player whose
    /// turn it is at the root.
    pub max_player: Option<PlayerId>,

    /// Opponent model for the N-player engine.
    pub mode: MinimaxMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: -1,
            memoize: true,
            cache_capacity: None,
            max_player: None,
            mode: MinimaxMode::Paranoid,
        }
    }
}

impl SearchConfig {
    /// Builder pattern: set the depth bound (`-1` = to terminal).
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Builder pattern: enable or disable memoization.
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Builder pattern: bound the memo cache.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Builder pattern: pin the maximizing player instead of defaulting to
    /// the head of the root player order.
    pub fn with_max_player(mut self, player: PlayerId) -> Self {
        self.max_player = Some(player);
        self
    }

    /// Builder pattern: set the N-player opponent model.
    pub fn with_mode(mut self, mode: MinimaxMode) -> Self {
        self.mode = mode;
        self
    }
}
