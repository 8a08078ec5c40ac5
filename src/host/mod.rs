//! Host integration for animation packages.
//!
//! This module adapts the evaluator to a node-based dependency graph:
//! - `NoiseNode` exposes the curve parameters as named plugs
//! - `Scene` is the small set of graph operations the create command needs
//! - `CreateNoiseCommand` creates, wires and undoes a noise node
//! - `MemoryScene` is a self-contained `Scene` for tests and tools

mod command;
mod memory;
mod node;

pub use command::{CreateNoiseCommand, DEFAULT_NODE_NAME, Scene, SceneError, TIME_SOURCE};
pub use memory::MemoryScene;
pub use node::{AttrValue, Attribute, AttributeError, NoiseNode};
