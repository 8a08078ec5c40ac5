//! A minimal in-memory host scene.

use super::command::{Scene, SceneError, TIME_SOURCE};
use super::node::{AttrValue, Attribute, AttributeError, NoiseNode};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone)]
enum SceneNode {
    /// Plain node with float attributes
    Generic(BTreeMap<String, f64>),
    Noise(NoiseNode),
}

/// Dependency-graph scene used for tests, demos and headless baking.
///
/// Starts with a `time1` node whose `outTime` plug is set with
/// [`MemoryScene::set_time`]. Values are pulled through connections on read.
///
/// # Examples
///
/// ```
/// use animnoise::host::{AttrValue, CreateNoiseCommand, MemoryScene};
/// use animnoise::{ParameterSet, evaluate};
///
/// let mut scene = MemoryScene::new();
/// scene.add_node("pCube1", &["ry"]);
/// CreateNoiseCommand::new().with_target("pCube1.ry").do_it(&mut scene).unwrap();
///
/// scene.set_time(24.5);
/// let expected = evaluate(24.0, &ParameterSet::default());
/// assert_eq!(scene.value("pCube1.ry").unwrap(), AttrValue::Float(expected));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryScene {
    nodes: BTreeMap<String, SceneNode>,
    /// destination plug -> source plug
    connections: BTreeMap<String, String>,
    selection: Option<String>,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScene {
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: BTreeMap::new(),
            connections: BTreeMap::new(),
            selection: None,
        };
        if let Some((node, attr)) = split_plug(TIME_SOURCE) {
            scene.add_node(node, &[attr]);
        }
        scene
    }

    /// Adds a plain node whose attributes all start at zero.
    ///
    /// # Arguments
    ///
    /// * `name` - Node name, replacing any node already using it
    /// * `attributes` - Float attribute names the node exposes
    pub fn add_node(&mut self, name: &str, attributes: &[&str]) {
        let attributes = attributes.iter().map(|a| (a.to_string(), 0.0)).collect();
        self.nodes.insert(name.to_string(), SceneNode::Generic(attributes));
    }

    pub fn node_exists(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn set_time(&mut self, time: f64) {
        // The time node may have been deleted; nothing to drive then
        let _ = self.set(TIME_SOURCE, AttrValue::Float(time));
    }

    pub fn noise_node(&self, name: &str) -> Option<&NoiseNode> {
        match self.nodes.get(name) {
            Some(SceneNode::Noise(node)) => Some(node),
            _ => None,
        }
    }

    pub fn noise_node_mut(&mut self, name: &str) -> Option<&mut NoiseNode> {
        match self.nodes.get_mut(name) {
            Some(SceneNode::Noise(node)) => Some(node),
            _ => None,
        }
    }

    /// Source plug driving `destination`, if connected.
    pub fn input_of(&self, destination: &str) -> Option<&str> {
        let destination = self.canonical(destination)?;
        self.connections.get(&destination).map(String::as_str)
    }

    /// Destination plugs driven by `source`.
    pub fn outputs_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let source = self.canonical(source);
        self.connections
            .iter()
            .filter(move |(_, s)| Some(s.as_str()) == source.as_deref())
            .map(|(d, _)| d.as_str())
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Writes an unconnected plug directly.
    pub fn set(&mut self, plug: &str, value: AttrValue) -> Result<(), SceneError> {
        let no_plug = || SceneError::NoSuchPlug(plug.to_string());
        let (node, attr) = split_plug(plug).ok_or_else(no_plug)?;
        match self.nodes.get_mut(node).ok_or_else(no_plug)? {
            SceneNode::Generic(attributes) => {
                let slot = attributes.get_mut(attr).ok_or_else(no_plug)?;
                *slot = value.to_f64();
            }
            SceneNode::Noise(noise) => noise.set_by_name(attr, value)?,
        }
        Ok(())
    }

    /// Reads a plug, following connections and recomputing noise outputs.
    pub fn value(&mut self, plug: &str) -> Result<AttrValue, SceneError> {
        self.pull(plug, &mut BTreeSet::new())
    }

    /// Pulls `plug`, with `visiting` holding the plugs on the current path.
    fn pull(
        &mut self,
        plug: &str,
        visiting: &mut BTreeSet<String>,
    ) -> Result<AttrValue, SceneError> {
        let plug = self
            .canonical(plug)
            .ok_or_else(|| SceneError::NoSuchPlug(plug.to_string()))?;
        if !visiting.insert(plug.clone()) {
            return Err(SceneError::Cycle(plug));
        }
        let value = self.pull_unvisited(&plug, visiting);
        visiting.remove(&plug);
        value
    }

    fn pull_unvisited(
        &mut self,
        plug: &str,
        visiting: &mut BTreeSet<String>,
    ) -> Result<AttrValue, SceneError> {
        let plug = plug.to_string();
        if let Some(source) = self.connections.get(&plug).cloned() {
            return self.pull(&source, visiting);
        }

        let (node, attr) = split_plug(&plug).ok_or_else(|| SceneError::NoSuchPlug(plug.clone()))?;
        let node = node.to_string();
        let attr = attr.to_string();

        let inputs: Vec<(Attribute, String)> = match self.nodes.get(&node) {
            Some(SceneNode::Generic(attributes)) => {
                return attributes
                    .get(&attr)
                    .map(|v| AttrValue::Float(*v))
                    .ok_or(SceneError::NoSuchPlug(plug));
            }
            Some(SceneNode::Noise(_)) => Attribute::ALL
                .into_iter()
                .filter(|a| a.is_input())
                .filter_map(|a| {
                    let input = format!("{}.{}", node, a.long_name());
                    self.connections.get(&input).map(|source| (a, source.clone()))
                })
                .collect(),
            None => return Err(SceneError::NoSuchPlug(plug)),
        };

        let mut pulled = Vec::with_capacity(inputs.len());
        for (attribute, source) in inputs {
            pulled.push((attribute, self.pull(&source, visiting)?));
        }

        let noise = self
            .noise_node_mut(&node)
            .ok_or_else(|| SceneError::NoSuchNode(node.clone()))?;
        for (attribute, value) in pulled {
            if noise.get(attribute) != value {
                noise.set(attribute, value)?;
            }
        }
        let attribute =
            Attribute::from_name(&attr).ok_or_else(|| SceneError::NoSuchPlug(plug.clone()))?;
        Ok(noise.get(attribute))
    }

    /// Resolves short noise attribute names to their long form.
    fn canonical(&self, plug: &str) -> Option<String> {
        let (node, attr) = split_plug(plug)?;
        match self.nodes.get(node)? {
            SceneNode::Generic(attributes) => {
                attributes.contains_key(attr).then(|| plug.to_string())
            }
            SceneNode::Noise(_) => {
                Attribute::from_name(attr).map(|a| format!("{}.{}", node, a.long_name()))
            }
        }
    }

    fn unique_name(&self, base: &str) -> String {
        if !self.nodes.contains_key(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{}{}", base, n))
            .find(|name| !self.nodes.contains_key(name))
            .unwrap_or_else(|| base.to_string())
    }
}

impl Scene for MemoryScene {
    fn create_node(&mut self, node_type: &str) -> Result<String, SceneError> {
        if node_type != NoiseNode::TYPE_NAME {
            return Err(SceneError::UnknownNodeType(node_type.to_string()));
        }
        let name = (1..)
            .map(|n| format!("{}{}", node_type, n))
            .find(|name| !self.nodes.contains_key(name))
            .unwrap_or_else(|| node_type.to_string());
        self.nodes
            .insert(name.clone(), SceneNode::Noise(NoiseNode::new(name.clone())));
        Ok(name)
    }

    fn rename(&mut self, node: &str, new_name: &str) -> Result<String, SceneError> {
        if node == new_name && self.nodes.contains_key(node) {
            return Ok(node.to_string());
        }
        let mut entry = self
            .nodes
            .remove(node)
            .ok_or_else(|| SceneError::NoSuchNode(node.to_string()))?;
        let name = self.unique_name(new_name);
        if let SceneNode::Noise(noise) = &mut entry {
            noise.set_name(name.clone());
        }
        self.nodes.insert(name.clone(), entry);

        let rewire = |plug: &String| match split_plug(plug) {
            Some((n, attr)) if n == node => format!("{}.{}", name, attr),
            _ => plug.clone(),
        };
        self.connections = self
            .connections
            .iter()
            .map(|(d, s)| (rewire(d), rewire(s)))
            .collect();
        self.selection = self.selection.as_ref().map(|s| rewire(s));

        debug!(from = node, to = %name, "renamed node");
        Ok(name)
    }

    fn connect(&mut self, source: &str, destination: &str, force: bool) -> Result<(), SceneError> {
        let source = self
            .canonical(source)
            .ok_or_else(|| SceneError::NoSuchPlug(source.to_string()))?;
        let destination = self
            .canonical(destination)
            .ok_or_else(|| SceneError::NoSuchPlug(destination.to_string()))?;
        if destination.ends_with(".output") && self.noise_node(plug_node(&destination)).is_some() {
            return Err(AttributeError::ReadOnly(Attribute::Output).into());
        }

        match self.connections.get(&destination) {
            Some(existing) if *existing != source && !force => {
                Err(SceneError::AlreadyConnected(destination))
            }
            _ => {
                debug!(source = %source, destination = %destination, "connected");
                self.connections.insert(destination, source);
                Ok(())
            }
        }
    }

    fn plug_exists(&self, plug: &str) -> bool {
        self.canonical(plug).is_some()
    }

    fn delete(&mut self, node: &str) -> Result<(), SceneError> {
        self.nodes
            .remove(node)
            .ok_or_else(|| SceneError::NoSuchNode(node.to_string()))?;
        self.connections
            .retain(|d, s| plug_node(d) != node && plug_node(s) != node);
        if self.selection.as_deref().is_some_and(|s| plug_node(s) == node) {
            self.selection = None;
        }
        Ok(())
    }

    fn select(&mut self, item: &str) {
        self.selection = Some(item.to_string());
    }
}

fn split_plug(plug: &str) -> Option<(&str, &str)> {
    plug.split_once('.')
}

fn plug_node(plug: &str) -> &str {
    split_plug(plug).map_or(plug, |(node, _)| node)
}
