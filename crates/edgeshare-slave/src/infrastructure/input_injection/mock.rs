//! Mock platform input injector for unit testing.
//!
//! # Why a mock injector?
//!
//! The real injector makes OS calls that:
//!
//! - Require a physical desktop environment to run.
//! - Actually move the cursor or press keys on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! The `MockInputInjector` replaces all OS calls with simple in-memory
//! recording.  Each injected event is pushed into a shared `Vec` so that
//! test assertions can inspect exactly what was injected and in what order.
//! It also keeps a virtual pointer: `emit_pointer_position` moves it, so the
//! edge watcher sees the effect of injected deltas just as it would on a
//! real desktop.
//!
//! # Usage in tests
//!
//! ```ignore
//! let injector = MockInputInjector::new();
//! injector.set_pointer(100, 100);
//! let mut uc = InjectInputUseCase::new(edge, Arc::new(injector.clone()), tx);
//!
//! uc.handle_message(&InputEvent::Grab);
//! uc.handle_message(&InputEvent::PointerDelta { dx: 5, dy: -3 });
//!
//! assert_eq!(injector.pointer(), Some(Point::new(105, 97)));
//! ```
//!
//! # Failure mode
//!
//! Call `set_failing(true)` to make every emit method return
//! `InjectionError::Platform`.  This lets you test error-handling paths in
//! the use case without needing a broken OS.

use std::sync::{Arc, Mutex};

use edgeshare_core::{KeyIdentifier, MouseButton, Point};

use crate::application::inject_input::{InjectionError, PlatformInputInjector};

/// One call recorded by [`MockInputInjector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedInput {
    Position(Point),
    Button(MouseButton, bool),
    Key(KeyIdentifier, bool),
}

/// Screen size reported until a test sets another.
pub const DEFAULT_MOCK_SCREEN: (u32, u32) = (1920, 1080);

#[derive(Debug, Default)]
struct State {
    pointer: Option<Point>,
    screen: Option<(u32, u32)>,
    injected: Vec<InjectedInput>,
    failing: bool,
}

/// A mock injector that records all calls without performing OS API calls.
///
/// Clones share the same state, so a test can keep one handle while the use
/// case or session owns another.
#[derive(Debug, Clone, Default)]
pub struct MockInputInjector {
    state: Arc<Mutex<State>>,
}

impl MockInputInjector {
    /// Creates a mock with no pointer position and nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the virtual pointer, as if the user moved the local mouse.
    pub fn set_pointer(&self, x: i32, y: i32) {
        self.state.lock().expect("lock poisoned").pointer = Some(Point::new(x, y));
    }

    pub fn set_screen_size(&self, width: u32, height: u32) {
        self.state.lock().expect("lock poisoned").screen = Some((width, height));
    }

    /// Makes the pointer position unknown.
    pub fn clear_pointer(&self) {
        self.state.lock().expect("lock poisoned").pointer = None;
    }

    pub fn pointer(&self) -> Option<Point> {
        self.state.lock().expect("lock poisoned").pointer
    }

    /// When `true`, every emit method returns [`InjectionError::Platform`].
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().expect("lock poisoned").failing = failing;
    }

    /// Returns a copy of everything injected so far, oldest first.
    pub fn injected(&self) -> Vec<InjectedInput> {
        self.state.lock().expect("lock poisoned").injected.clone()
    }

    fn record(&self, input: InjectedInput) -> Result<(), InjectionError> {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.failing {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        if let InjectedInput::Position(pos) = input {
            state.pointer = Some(pos);
        }
        state.injected.push(input);
        Ok(())
    }
}

impl PlatformInputInjector for MockInputInjector {
    fn pointer_position(&self) -> Result<Point, InjectionError> {
        self.pointer().ok_or(InjectionError::PositionUnavailable)
    }

    fn screen_size(&self) -> Result<(u32, u32), InjectionError> {
        let screen = self.state.lock().expect("lock poisoned").screen;
        Ok(screen.unwrap_or(DEFAULT_MOCK_SCREEN))
    }

    fn emit_pointer_position(&self, pos: Point) -> Result<(), InjectionError> {
        self.record(InjectedInput::Position(pos))
    }

    fn emit_button(&self, button: MouseButton, pressed: bool) -> Result<(), InjectionError> {
        self.record(InjectedInput::Button(button, pressed))
    }

    fn emit_key(&self, key: KeyIdentifier, pressed: bool) -> Result<(), InjectionError> {
        self.record(InjectedInput::Key(key, pressed))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
