//=========================================================================
// Action Buffer
//=========================================================================
//
// Double-buffered per-frame press state for a dense identifier set.
//
// ```text
//   previous[i]   current[i]    state
//   ─────────────────────────────────────
//   Release       Release       Resting
//   Release       Press         Pressed  (edge)
//   Press         Press         Held     (level)
//   Press         Release       Released (edge)
// ```
//
// `advance()` copies current into previous once per frame; only the
// current array is written by native event handlers.
//
//=========================================================================

//=== InputAction =========================================================

/// Binary state of one key or button within a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputAction {
    #[default]
    Release,
    Press,
}

//=== ActionState =========================================================

/// Four-way state derived from two consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Resting,
    Pressed,
    Held,
    Released,
}

impl ActionState {
    fn from_pair(previous: InputAction, current: InputAction) -> Self {
        use InputAction::*;
        match (previous, current) {
            (Release, Release) => Self::Resting,
            (Release, Press) => Self::Pressed,
            (Press, Press) => Self::Held,
            (Press, Release) => Self::Released,
        }
    }

    /// `true` for `Pressed` and `Held` (the identifier is currently down).
    pub fn is_down(self) -> bool {
        matches!(self, Self::Pressed | Self::Held)
    }
}

//=== ActionBuffer ========================================================

/// `{current, previous}` double buffer over `N` identifiers.
#[derive(Debug, Clone)]
pub struct ActionBuffer<const N: usize> {
    current: [InputAction; N],
    previous: [InputAction; N],
}

impl<const N: usize> ActionBuffer<N> {
    pub fn new() -> Self {
        Self {
            current: [InputAction::Release; N],
            previous: [InputAction::Release; N],
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Writes the current-frame state of `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn set(&mut self, index: usize, action: InputAction) {
        assert!(index < N, "action index {} out of range (size {})", index, N);
        self.current[index] = action;
    }

    /// Frame step: the current frame becomes the previous one.
    pub fn advance(&mut self) {
        self.previous = self.current;
    }

    //--- Queries ----------------------------------------------------------

    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn state(&self, index: usize) -> ActionState {
        assert!(index < N, "action index {} out of range (size {})", index, N);
        ActionState::from_pair(self.previous[index], self.current[index])
    }

    pub fn current(&self, index: usize) -> InputAction {
        self.current[index]
    }

    pub fn previous(&self, index: usize) -> InputAction {
        self.previous[index]
    }

    /// Combination edge: every index is down and at least one went down
    /// this frame. Empty input is never pressed.
    pub fn is_combination_pressed<I>(&self, indices: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        let mut any = false;
        let mut edge = false;
        for index in indices {
            any = true;
            match self.state(index) {
                ActionState::Pressed => edge = true,
                ActionState::Held => {}
                _ => return false,
            }
        }
        any && edge
    }

    /// Combination level: every index is held from the previous frame.
    /// Empty input is never held.
    pub fn is_combination_held<I>(&self, indices: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        let mut any = false;
        for index in indices {
            any = true;
            if self.state(index) != ActionState::Held {
                return false;
            }
        }
        any
    }
}

impl<const N: usize> Default for ActionBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
