//! Focused unit tests for ARIA role string mapping.
//!
//! The role type itself lives in [`super::selector`]; this module exists
//! purely to keep its test suite separate from the rest of the selector
//! logic.

#[allow(unused_imports)]
pub(crate) use super::selector::{AriaRole, implicit_role_selector};

#[cfg(test)]
mod tests;
