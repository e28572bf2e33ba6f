//! Discrete input events and how a frame applies them to the session.

use tracing::debug;

use crate::cells::Direction;
use crate::clock::Timestamp;
use crate::session::GameSession;
use crate::units::PixelPoint;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Any key without a game meaning. It still starts the clock.
    Other,
}

impl Key {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Other => None,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GameEvent {
    Quit,
    KeyDown(Key),
    MouseButtonDown(PixelPoint),
}

/// Whether the frame loop should keep going.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn dispatch(session: &mut GameSession, event: GameEvent, now: Timestamp) -> Flow {
    match event {
        GameEvent::Quit => {
            debug!("quit requested");
            return Flow::Quit;
        }
        GameEvent::KeyDown(key) => session.handle_key(key, now),
        GameEvent::MouseButtonDown(point) => session.handle_retry_click(point),
    }
    Flow::Continue
}

/// Apply one frame's worth of events in the order they arrived, then check for the goal.
///
/// A quit event ends the frame immediately; later events are dropped.
pub fn run_frame<I>(session: &mut GameSession, events: I, now: Timestamp) -> Flow
    where I: IntoIterator<Item = GameEvent>
{
    for event in events {
        if dispatch(session, event, now) == Flow::Quit {
            return Flow::Quit;
        }
    }
    session.check_goal(now);
    Flow::Continue
}
