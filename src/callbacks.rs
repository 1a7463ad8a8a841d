//! Mouse callbacks registry
use crate::terminal::Position;
use std::{fmt, io::Write};

const REMINDER: &str = "You enabled mouse events but did not register a mouse-down handler, \
so enabling mouse events was pointless.\n\
Register one with `terminal.set_mouse_down(|pos| println!(\"{},{}\", pos.row, pos.col))`, \
and ditto with `set_mouse_up` for releases. \
Then whenever the user clicks, the handlers are called.\n\
To ignore mouse-down events instead, register an empty handler: `terminal.set_mouse_down(|_| {})`.\n";

/// Mouse button transition reported by the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Button pressed, sequence terminated with `M`
    Down,
    /// Button released, sequence terminated with `m`
    Up,
}

/// Decoded mouse click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub pos: Position,
}

pub type MouseCallback = Box<dyn FnMut(Position)>;

/// State of a single handler slot
pub enum MouseHandler {
    /// Nothing registered yet
    Unset,
    /// Nothing registered, and the user was already told about it
    Reminded,
    /// Handler registered by the user
    UserSet(MouseCallback),
}

impl MouseHandler {
    pub fn is_user_set(&self) -> bool {
        matches!(self, MouseHandler::UserSet(..))
    }
}

impl fmt::Debug for MouseHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseHandler::Unset => write!(f, "Unset"),
            MouseHandler::Reminded => write!(f, "Reminded"),
            MouseHandler::UserSet(..) => write!(f, "UserSet"),
        }
    }
}

/// Registry of the mouse-down and mouse-up handlers
///
/// An unset mouse-down slot prints a reminder on the first click and then
/// stays silent. An unset mouse-up slot ignores releases.
#[derive(Debug)]
pub struct MouseHandlers {
    down: MouseHandler,
    up: MouseHandler,
}

impl Default for MouseHandlers {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MouseHandlers {
    /// Create registry, `remind` controls whether unhandled clicks print guidance
    pub fn new(remind: bool) -> Self {
        let down = if remind {
            MouseHandler::Unset
        } else {
            MouseHandler::Reminded
        };
        Self {
            down,
            up: MouseHandler::Unset,
        }
    }

    /// Replace mouse-down handler
    pub fn set_mouse_down(&mut self, handler: impl FnMut(Position) + 'static) {
        self.down = MouseHandler::UserSet(Box::new(handler));
    }

    /// Replace mouse-up handler
    pub fn set_mouse_up(&mut self, handler: impl FnMut(Position) + 'static) {
        self.up = MouseHandler::UserSet(Box::new(handler));
    }

    pub fn mouse_down(&self) -> &MouseHandler {
        &self.down
    }

    pub fn mouse_up(&self) -> &MouseHandler {
        &self.up
    }

    /// Invoke handler associated with the event
    ///
    /// `out` receives the reminder when mouse-down is still unset.
    pub fn dispatch(&mut self, event: MouseEvent, out: &mut dyn Write) {
        match event.action {
            MouseAction::Down => match &mut self.down {
                MouseHandler::UserSet(handler) => handler(event.pos),
                MouseHandler::Reminded => {}
                MouseHandler::Unset => {
                    tracing::warn!("[MouseHandlers.dispatch] mouse-down handler is not set");
                    if let Err(error) = out.write_all(REMINDER.as_bytes()).and_then(|_| out.flush())
                    {
                        tracing::warn!("[MouseHandlers.dispatch] reminder failed: {}", error);
                    }
                    self.down = MouseHandler::Reminded;
                }
            },
            MouseAction::Up => {
                if let MouseHandler::UserSet(handler) = &mut self.up {
                    handler(event.pos)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    fn click(action: MouseAction, row: usize, col: usize) -> MouseEvent {
        MouseEvent {
            action,
            pos: Position::new(row, col),
        }
    }

    #[test]
    fn test_reminder_once() {
        let mut handlers = MouseHandlers::default();
        let mut out = Vec::new();

        assert!(matches!(handlers.mouse_down(), MouseHandler::Unset));
        handlers.dispatch(click(MouseAction::Down, 1, 1), &mut out);
        assert!(matches!(handlers.mouse_down(), MouseHandler::Reminded));
        assert_eq!(out, REMINDER.as_bytes());

        handlers.dispatch(click(MouseAction::Down, 2, 2), &mut out);
        handlers.dispatch(click(MouseAction::Up, 2, 2), &mut out);
        assert_eq!(out.len(), REMINDER.len());
    }

    #[test]
    fn test_reminder_disabled() {
        let mut handlers = MouseHandlers::new(false);
        let mut out = Vec::new();
        handlers.dispatch(click(MouseAction::Down, 1, 1), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_user_handlers() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut handlers = MouseHandlers::default();
        handlers.set_mouse_down({
            let events = events.clone();
            move |pos| events.borrow_mut().push(("down", pos))
        });
        handlers.set_mouse_up({
            let events = events.clone();
            move |pos| events.borrow_mut().push(("up", pos))
        });
        assert!(handlers.mouse_down().is_user_set());
        assert!(handlers.mouse_up().is_user_set());

        let mut out = Vec::new();
        handlers.dispatch(click(MouseAction::Down, 3, 7), &mut out);
        handlers.dispatch(click(MouseAction::Up, 4, 8), &mut out);
        assert!(out.is_empty());
        assert_eq!(
            *events.borrow(),
            vec![("down", Position::new(3, 7)), ("up", Position::new(4, 8))]
        );
    }
}
