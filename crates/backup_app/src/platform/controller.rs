use std::io;
use std::time::{Duration, Instant};

use backup_core::{init, update, AppState, AppViewModel, Msg, Phase};
use backup_engine::task::{self, TaskInbox};
use backup_engine::{ConfigLoader, Poster};

use super::effects::EffectRunner;

/// Owns the state and applies every incoming message on the calling thread.
///
/// Messages come from finished tasks and from any [`Poster`] (keyboard input).
pub struct Controller {
    state: AppState,
    effects: EffectRunner,
    inbox: TaskInbox<Msg>,
    exit: Option<i32>,
}

impl Controller {
    /// Creates the controller and starts loading the configuration.
    pub fn start(loader: ConfigLoader) -> io::Result<Self> {
        let (tasks, inbox) = task::channel()?;
        let (state, effects) = init();
        let runner = EffectRunner::new(tasks, loader);
        let exit = runner.enqueue(effects);
        Ok(Self {
            state,
            effects: runner,
            inbox,
            exit,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Exit code requested by the user, once they asked to leave.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit
    }

    pub fn poster(&self) -> Poster<Msg> {
        self.effects.poster()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    /// Applies one message and starts the effects it produced.
    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if let Some(code) = self.effects.enqueue(effects) {
            self.exit.get_or_insert(code);
        }
    }

    /// Waits for the next message and applies it. `false` once the inbox closed.
    pub fn step(&mut self) -> bool {
        match self.inbox.recv() {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Like [`Controller::step`], giving up after `timeout`.
    pub fn step_timeout(&mut self, timeout: Duration) -> bool {
        match self.inbox.recv_timeout(timeout) {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Processes messages until no task result is outstanding or `timeout`
    /// passed. Returns the phase reached.
    pub fn settle(&mut self, timeout: Duration) -> Phase {
        let deadline = Instant::now() + timeout;
        while self.state.pending().is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.step_timeout(remaining) {
                break;
            }
        }
        self.phase()
    }

    /// Stops the worker runtime, waiting at most `timeout` for running work.
    pub fn shutdown(self, timeout: Duration) {
        self.effects.shutdown(timeout);
    }
}
