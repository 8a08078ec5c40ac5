//! Undoable node creation against a host scene.

use super::node::{Attribute, AttributeError, NoiseNode};
use std::fmt;
use tracing::{debug, warn};

/// Plug every created node's time input is driven from.
pub const TIME_SOURCE: &str = "time1.outTime";

/// Default name for created nodes.
pub const DEFAULT_NODE_NAME: &str = "animNoise";

/// Error type reported by a [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// No node with that name exists
    NoSuchNode(String),
    /// No plug with that `node.attribute` path exists
    NoSuchPlug(String),
    /// The host does not know how to create this node type
    UnknownNodeType(String),
    /// The destination plug already has an input and `force` was not set
    AlreadyConnected(String),
    /// Evaluating the plug led back to itself
    Cycle(String),
    /// A value could not be written to a node attribute
    Attribute(AttributeError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::NoSuchNode(name) => write!(f, "no such node: '{}'", name),
            SceneError::NoSuchPlug(plug) => write!(f, "no such plug: '{}'", plug),
            SceneError::UnknownNodeType(t) => write!(f, "unknown node type: '{}'", t),
            SceneError::AlreadyConnected(plug) => write!(f, "plug '{}' already has an input", plug),
            SceneError::Cycle(plug) => write!(f, "cycle while evaluating '{}'", plug),
            SceneError::Attribute(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Attribute(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AttributeError> for SceneError {
    fn from(err: AttributeError) -> Self {
        SceneError::Attribute(err)
    }
}

/// Capabilities a host scene provides to [`CreateNoiseCommand`].
///
/// Plugs are addressed as `node.attribute`.
pub trait Scene {
    /// Creates a node of `node_type` and returns its generated name.
    fn create_node(&mut self, node_type: &str) -> Result<String, SceneError>;

    /// Renames `node`, returning the name actually assigned.
    fn rename(&mut self, node: &str, new_name: &str) -> Result<String, SceneError>;

    /// Connects `source` to `destination`, replacing any existing input when
    /// `force` is set.
    fn connect(&mut self, source: &str, destination: &str, force: bool) -> Result<(), SceneError>;

    /// Whether the `node.attribute` plug exists.
    fn plug_exists(&self, plug: &str) -> bool;

    /// Deletes `node` and all of its connections.
    fn delete(&mut self, node: &str) -> Result<(), SceneError>;

    /// Replaces the active selection with `item`.
    fn select(&mut self, item: &str);
}

/// Creates a noise node, wires it to the scene time and optionally drives a
/// target attribute with its output.
///
/// An invalid target never aborts the command: a warning is emitted and the
/// node is created without the output connection.
///
/// # Examples
///
/// ```
/// use animnoise::host::{CreateNoiseCommand, MemoryScene};
///
/// let mut scene = MemoryScene::new();
/// scene.add_node("pSphere1", &["tx", "ty", "tz"]);
///
/// let mut cmd = CreateNoiseCommand::new().with_name("bounce").with_target("pSphere1.ty");
/// let node = cmd.do_it(&mut scene).unwrap();
/// assert_eq!(node, "bounce");
/// assert_eq!(scene.input_of("pSphere1.ty"), Some("bounce.output"));
///
/// cmd.undo_it(&mut scene).unwrap();
/// assert!(!scene.node_exists("bounce"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreateNoiseCommand {
    name: Option<String>,
    target: Option<String>,
    node: Option<String>,
}

impl CreateNoiseCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the requested node name (the `-name` flag).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the `node.attribute` plug to drive with the node's output.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Target that will be connected, if it survived validation.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Name of the node created by the last `do_it`/`redo_it`.
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    pub fn is_undoable(&self) -> bool {
        true
    }

    /// Validates the target and creates the node.
    pub fn do_it<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<String, SceneError> {
        if let Some(target) = self.target.take() {
            if is_plug_path(&target) && scene.plug_exists(&target) {
                self.target = Some(target);
            } else {
                warn!(target = %target, "target does not exist, creating node without connecting");
            }
        }
        self.redo_it(scene)
    }

    /// Creates and wires the node, returning its final name.
    pub fn redo_it<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<String, SceneError> {
        let created = scene.create_node(NoiseNode::TYPE_NAME)?;
        let requested = self.name.as_deref().unwrap_or(DEFAULT_NODE_NAME);
        let node = scene.rename(&created, requested)?;
        self.node = Some(node.clone());

        let time_plug = format!("{}.{}", node, Attribute::Time.long_name());
        scene.connect(TIME_SOURCE, &time_plug, false)?;

        if let Some(target) = &self.target {
            let output_plug = format!("{}.{}", node, Attribute::Output.long_name());
            scene.connect(&output_plug, target, true)?;
            scene.select(target);
        }

        debug!(node = %node, target = ?self.target, "created noise node");
        Ok(node)
    }

    /// Deletes the node created by the last `do_it`/`redo_it`.
    pub fn undo_it<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<(), SceneError> {
        if let Some(node) = self.node.take() {
            scene.delete(&node)?;
            debug!(node = %node, "removed noise node");
        }
        Ok(())
    }
}

/// Whether `path` has the `node.attribute` shape.
fn is_plug_path(path: &str) -> bool {
    let mut parts = path.split('.');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(node), Some(attr), None) if !node.is_empty() && !attr.is_empty()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryScene;

    fn scene_with_target() -> MemoryScene {
        let mut scene = MemoryScene::new();
        scene.add_node("pSphere1", &["tx", "ty"]);
        scene
    }

    #[test]
    fn test_plug_path_shape() {
        assert!(is_plug_path("pSphere1.ty"));
        assert!(!is_plug_path("pSphere1"));
        assert!(!is_plug_path("a.b.c"));
        assert!(!is_plug_path(".ty"));
        assert!(!is_plug_path("pSphere1."));
    }

    #[test]
    fn test_default_name_and_time_connection() {
        let mut scene = MemoryScene::new();
        let mut cmd = CreateNoiseCommand::new();
        let node = cmd.do_it(&mut scene).unwrap();
        assert_eq!(node, DEFAULT_NODE_NAME);
        assert_eq!(cmd.node(), Some(DEFAULT_NODE_NAME));
        assert_eq!(scene.input_of("animNoise.time"), Some(TIME_SOURCE));
        assert!(cmd.is_undoable());
    }

    #[test]
    fn test_connects_target_and_selects_it() {
        let mut scene = scene_with_target();
        let mut cmd = CreateNoiseCommand::new().with_target("pSphere1.ty");
        cmd.do_it(&mut scene).unwrap();
        assert_eq!(scene.input_of("pSphere1.ty"), Some("animNoise.output"));
        assert_eq!(scene.selection(), Some("pSphere1.ty"));
    }

    #[test]
    fn test_missing_target_degrades() {
        let mut scene = scene_with_target();
        for bad in ["pSphere1.rz", "pCube1.ty", "pSphere1", "a.b.c"] {
            let mut cmd = CreateNoiseCommand::new().with_target(bad);
            let node = cmd.do_it(&mut scene).unwrap();
            assert!(scene.node_exists(&node));
            assert_eq!(cmd.target(), None);
            assert_eq!(scene.outputs_of(&format!("{node}.output")).count(), 0);
            assert_eq!(scene.input_of(&format!("{node}.time")), Some(TIME_SOURCE));
        }
    }

    #[test]
    fn test_undo_then_redo() {
        let mut scene = scene_with_target();
        let mut cmd = CreateNoiseCommand::new()
            .with_name("shake")
            .with_target("pSphere1.tx");
        cmd.do_it(&mut scene).unwrap();

        cmd.undo_it(&mut scene).unwrap();
        assert!(!scene.node_exists("shake"));
        assert_eq!(scene.input_of("pSphere1.tx"), None);
        assert_eq!(cmd.node(), None);

        let node = cmd.redo_it(&mut scene).unwrap();
        assert_eq!(node, "shake");
        assert_eq!(scene.input_of("pSphere1.tx"), Some("shake.output"));
    }

    #[test]
    fn test_undo_without_do_is_noop() {
        let mut scene = MemoryScene::new();
        let mut cmd = CreateNoiseCommand::new();
        assert!(cmd.undo_it(&mut scene).is_ok());
    }

    #[test]
    fn test_name_clash_gets_unique_name() {
        let mut scene = MemoryScene::new();
        let first = CreateNoiseCommand::new().with_name("jitter").do_it(&mut scene).unwrap();
        let second = CreateNoiseCommand::new().with_name("jitter").do_it(&mut scene).unwrap();
        assert_eq!(first, "jitter");
        assert_ne!(second, first);
        assert!(scene.node_exists(&second));
    }
}
