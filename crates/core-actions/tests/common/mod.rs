#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, DispatchResult, QuitGuard, dispatch, parse_script, translate_key};
use core_config::Config;
use core_events::KeyEvent;
use core_state::EditorState;
use core_text::TextBuffer;

pub struct Harness {
    pub state: EditorState,
    pub guard: QuitGuard,
    pub config: Config,
}

impl Harness {
    pub fn new(lines: &[&str]) -> Self {
        Self::with_state(EditorState::new(TextBuffer::from_lines(lines.iter().copied())))
    }

    pub fn with_state(state: EditorState) -> Self {
        Self {
            state,
            guard: QuitGuard::new(),
            config: Config::default(),
        }
    }

    pub fn act(&mut self, action: Action) -> DispatchResult {
        dispatch(action, &mut self.state, &mut self.guard, &self.config)
    }

    /// Translate and dispatch a key; unbound keys panic so typos surface.
    pub fn key(&mut self, key: KeyEvent) -> DispatchResult {
        let action = translate_key(&key).unwrap_or_else(|| panic!("unbound key {key}"));
        self.act(action)
    }

    pub fn keys(&mut self, keys: &[KeyEvent]) {
        for k in keys {
            self.key(*k);
        }
    }

    /// Replay a script, returning the last dispatch result.
    pub fn run(&mut self, script: &str) -> DispatchResult {
        let mut last = DispatchResult::clean();
        for action in parse_script(script).expect("script parses") {
            last = self.act(action);
            if last.quit {
                break;
            }
        }
        last
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.buffer().lines().into_iter().map(String::from).collect()
    }
}
