use crate::{actions::Action, effect::Effect, reducer::reduce, state::AppState};

/// Redux-style Store that holds application state and dispatches actions
///
/// - Actions are dispatched to modify state
/// - Pure reducers handle state transitions and describe side effects
/// - State is replaced on each action
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        Self {
            state: initial_state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Note: Direct mutation should be avoided - prefer dispatch() for state changes
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Dispatch an action to update state.
    /// Returns the effects the caller has to execute.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let (new_state, effects) = reduce(self.state.clone(), &action);
        self.state = new_state;
        effects
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
