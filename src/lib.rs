//! Procedural generator for the chat bubble application icon
//!
//! [`icon_gen`] runs the drawing pipeline (gradient, bubble, mask, composite)
//! and writes the PNG; [`shapes`] holds the fill primitives it draws with.

pub mod icon_gen;
pub mod shapes;
