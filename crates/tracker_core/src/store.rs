use crate::{update, Effect, Msg, TrackerState, TrackerView};

/// Callback notified with the latest view after every state change.
pub type Subscriber = Box<dyn FnMut(&TrackerView) + Send>;

/// Owns the single [`TrackerState`] and fans state changes out to subscribers.
#[derive(Default)]
pub struct TrackerStore {
    state: TrackerState,
    subscribers: Vec<Subscriber>,
}

impl TrackerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Applies `msg` and returns the effects the caller must run.
    ///
    /// Subscribers only hear about messages that changed the state.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let view = state.view();
            for subscriber in &mut self.subscribers {
                subscriber(&view);
            }
        }
        self.state = state;
        effects
    }
}
