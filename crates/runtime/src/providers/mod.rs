//! Decision providers.
//!
//! [`policy`] turns a perception snapshot plus memory into the next action.

pub mod policy;

pub use policy::{Agent, ChoiceKeywords, PolicyContext};
