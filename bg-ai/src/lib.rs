//! Scripted move pricing for both seats. Each seat has its own cost
//! model reflecting its frame of the board; [`picker_for`] hands out the
//! right one.

pub mod picker;
pub mod seat1;
pub mod seat2;

pub use picker::{picker_for, MovePicker, RuleDelta, Selection};
pub use seat1::Seat1Picker;
pub use seat2::Seat2Picker;

#[cfg(test)]
mod picker_tests;
