//! Desktop host for the Scarecrow's Song overlay.
//!
//! A winit + glutin + glow + imgui-rs window plays the role of the emulator:
//! it owns a memory image, runs one logic tick and one render tick per frame,
//! and draws the overlay through [`host::ImguiHost`].

pub mod app;
pub mod demo;
pub mod host;
pub mod ui;
