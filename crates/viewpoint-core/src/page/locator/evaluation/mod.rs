//! JavaScript evaluation methods for locators.
//!
//! Methods for evaluating JavaScript expressions on elements.

mod bounding_box;
mod element_handle;
mod evaluate;
mod evaluate_all;
mod scroll;
