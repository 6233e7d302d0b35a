//! Floating, draggable, resizable windows for inspecting code-search tool
//! results in a terminal chat client.
//!
//! [`window::WindowRegistry`] is the only way to open, change or close a
//! window. [`overlay::WindowOverlay`] paints the registry's windows above a
//! host view and turns pointer input into registry calls.

pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod content;
pub mod drivers;
pub mod event_loop;
pub mod layout;
pub mod overlay;
pub mod runner;
pub mod theme;
pub mod tools;
pub mod tracing_sub;
pub mod transcript;
pub mod ui;
pub mod window;
