//! Road Dodge: steer a car down a three-lane road and dodge the traffic.
//!
//! The crate is split the same way the game loop is: `entities` holds the
//! data, `compute` advances it one frame at a time, `input` turns terminal key
//! events into a per-frame snapshot, and `display` draws a frame.

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod input;
