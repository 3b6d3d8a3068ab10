//! Model-facing encodings of game state and actions.

pub mod encode;

pub use encode::{
    decode_action, encode_action, encode_full, encode_moves, ACTION_SPACE, FULL_INPUT,
    MOVES_INPUT, PLANE_LEN,
};

#[cfg(test)]
mod encode_tests;
