//! Settings resolver
//!
//! [`Settings`] is a JSON tree keyed by the dotted setting ids of
//! [`crate::catalog::settings`]. Every operation here is pure: writes return a
//! new tree and leave the input untouched.
//!
//! ```text
//! Settings tree ──get_effective──▶ Value (override or catalog default)
//!               ──effective()───▶ EffectiveSettings (typed, clamped)
//! ```

mod effective;
mod resolver;

pub use effective::{EffectiveSettings, LineNumbers, SplitDirection};
pub use resolver::{is_truthy, visible_settings, Settings};
