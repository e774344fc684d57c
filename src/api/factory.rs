use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    CircleContent, LabelContent, NodeContent, NodeId, PropertyKey, PropertyValue,
    RectangleContent, State,
};
use crate::error::{SceneError, SceneResult};

use super::SceneGraph;
use super::node_lifecycle::{CIRCLE_KIND, CONTAINER_KIND, LABEL_KIND, RECTANGLE_KIND};

/// Builds the content of a registered node kind; `None` for plain containers.
pub type NodeConstructor = Box<dyn Fn() -> Option<Box<dyn NodeContent>>>;

/// Serialized node tree accepted by [`NodeFactory::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: IndexMap<PropertyKey, PropertyValue>,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub children: Vec<NodeConfig>,
}

impl NodeConfig {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            properties: IndexMap::new(),
            states: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, key: PropertyKey, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key, value.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    pub fn from_json_str(input: &str) -> SceneResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| SceneError::InvalidConfig(format!("failed to parse node config: {e}")))
    }

    pub fn to_json_pretty(&self) -> SceneResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SceneError::InvalidConfig(format!("failed to serialize node config: {e}")))
    }
}

/// Name-to-constructor registry, built once and passed by reference.
#[derive(Default)]
pub struct NodeFactory {
    constructors: IndexMap<String, NodeConstructor>,
}

impl NodeFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory preloaded with `Container`, `Rectangle`, `Circle` and `Label`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut constructors: IndexMap<String, NodeConstructor> = IndexMap::new();
        constructors.insert(
            CONTAINER_KIND.to_owned(),
            Box::new(|| -> Option<Box<dyn NodeContent>> { None }),
        );
        constructors.insert(
            RECTANGLE_KIND.to_owned(),
            Box::new(|| Some(Box::new(RectangleContent) as Box<dyn NodeContent>)),
        );
        constructors.insert(
            CIRCLE_KIND.to_owned(),
            Box::new(|| Some(Box::new(CircleContent) as Box<dyn NodeContent>)),
        );
        constructors.insert(
            LABEL_KIND.to_owned(),
            Box::new(|| Some(Box::new(LabelContent) as Box<dyn NodeContent>)),
        );
        Self { constructors }
    }

    /// Registers a node kind under a unique, non-empty name.
    pub fn register<F>(&mut self, kind: &str, constructor: F) -> SceneResult<()>
    where
        F: Fn() -> Option<Box<dyn NodeContent>> + 'static,
    {
        if kind.is_empty() {
            return Err(SceneError::InvalidConfig(
                "node kind must not be empty".to_owned(),
            ));
        }
        if self.constructors.contains_key(kind) {
            return Err(SceneError::InvalidConfig(format!(
                "node kind `{kind}` is already registered"
            )));
        }
        self.constructors
            .insert(kind.to_owned(), Box::new(constructor));
        Ok(())
    }

    /// Unregisters a kind. Returns `true` when removed.
    pub fn unregister(&mut self, kind: &str) -> bool {
        self.constructors.shift_remove(kind).is_some()
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Creates a detached node of a registered kind.
    pub fn create(&self, graph: &mut SceneGraph, kind: &str) -> SceneResult<NodeId> {
        let constructor = self
            .constructors
            .get(kind)
            .ok_or_else(|| SceneError::UnknownNodeKind(kind.to_owned()))?;
        Ok(graph.create_node(kind, constructor()))
    }

    /// Builds a detached tree from `config`. On failure nothing built so far
    /// is left behind.
    pub fn build(&self, graph: &mut SceneGraph, config: &NodeConfig) -> SceneResult<NodeId> {
        let id = self.create(graph, &config.kind)?;
        for (key, value) in &config.properties {
            graph.set(id, *key, value.clone());
        }
        for state in &config.states {
            if let Some(slot) = graph.create_state(id, &state.name) {
                *slot = state.clone();
            }
        }
        for child_config in &config.children {
            let attached = self
                .build(graph, child_config)
                .and_then(|child| graph.add_child(id, child));
            if let Err(error) = attached {
                graph.dispose(id);
                return Err(error);
            }
        }
        debug!(?id, kind = %config.kind, children = config.children.len(), "node tree built");
        Ok(id)
    }

    pub fn build_from_json(&self, graph: &mut SceneGraph, input: &str) -> SceneResult<NodeId> {
        let config = NodeConfig::from_json_str(input)?;
        self.build(graph, &config)
    }
}
