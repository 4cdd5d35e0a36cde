//! Rule-based policy expressed as a behavior tree.
//!
//! The priority ladder is a [`Selector`] of guarded sequences, one per rung:
//!
//! ```text
//! selector
//!     ├─ confirm_when_in_dialog()
//!     ├─ select_when_choices()
//!     ├─ interact_when_reachable()
//!     ├─ probe_when_stuck()
//!     ├─ explore()
//!     └─ wait_fallback()
//! ```
//!
//! Conditions only read the [`PolicyContext`]; action nodes record exactly
//! one [`Action`] and may apply memory side effects tied to the decision.
//!
//! [`Selector`]: behavior_tree::Selector
//! [`Action`]: autoplay_core::Action

mod agent;
mod context;
mod keywords;
pub mod nodes;
pub mod patterns;

pub use agent::Agent;
pub use context::PolicyContext;
pub use keywords::ChoiceKeywords;
