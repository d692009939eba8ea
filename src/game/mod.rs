//! Player/enemy model and the typing session that drives them.

pub mod session;
pub mod state;

pub use session::{GameSession, SessionEvent, SessionSnapshot, DEFAULT_STAGE_WIDTH};
pub use state::{Enemy, Player, Position, ACTOR_SIZE, STARTING_LIVES};
