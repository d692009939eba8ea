//! Virtual keyboard input: symbol translation for the corrupted variants,
//! key resolution and press/release dispatch.

pub mod dispatch;
pub mod layout;
pub mod translator;

pub use dispatch::{InputDispatcher, KeyDispatch, KeyEventKind, KeyRenderer, KeyState};
pub use layout::{char_for_symbol, Key, KeyboardLayout};
pub use translator::{KeyboardVariant, KeySubstitutionTable, KeySymbolTranslator, DISABLED_SYMBOL};
