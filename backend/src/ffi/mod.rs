//! Python bindings
//!
//! Lets a Python render loop own the frame pacing and widgets while the
//! simulation core runs in Rust: the loop calls `configure` with slider
//! values, `tick` once per frame, and reads `vehicles()` / `jam_state()`.

pub mod simulation;
pub mod types;
