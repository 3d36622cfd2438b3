//! Camera domain — anchor, за которым следует внешний camera rig
//!
//! Ядро НЕ двигает саму камеру: оно считает `CameraState::anchor_position`,
//! rig hierarchy снаружи ставит pivot в эту точку.

pub mod tracker;

pub use tracker::*;
