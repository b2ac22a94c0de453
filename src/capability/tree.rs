use indexmap::IndexMap;

/// A device descriptor as read from the capability file.
///
/// `capabilities` holds only the values set on this device; everything else
/// is inherited through `fall_back`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceNode {
    pub id: String,
    /// Substring of a User-Agent header identifying this device.
    pub user_agent: String,
    /// Id of the device to inherit unset capabilities from.
    pub fall_back: String,
    /// Marks a real device, as opposed to a firmware or browser variant.
    pub actual_device_root: bool,
    pub capabilities: IndexMap<String, String>,
}

impl DeviceNode {
    pub fn new(
        id: impl Into<String>,
        user_agent: impl Into<String>,
        fall_back: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_agent: user_agent.into(),
            fall_back: fall_back.into(),
            actual_device_root: false,
            capabilities: IndexMap::new(),
        }
    }

    /// A capability set on this node itself (no inheritance).
    pub fn own_capability(&self, name: &str) -> Option<&str> {
        self.capabilities.get(name).map(String::as_str)
    }

    /// True when this node has no parent to inherit from.
    pub fn is_root(&self) -> bool {
        self.fall_back.is_empty() || self.fall_back == self.id
    }
}

/// Device nodes keyed by id, with capability inheritance along `fall_back`.
///
/// Parent links are stored as ids, never as references: a node may name a
/// fallback that arrives later (or never), in which case inheritance simply
/// stops there.
#[derive(Debug, Clone, Default)]
pub struct CapabilityTree {
    nodes: IndexMap<String, DeviceNode>,
}

impl CapabilityTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&DeviceNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut DeviceNode> {
        self.nodes.get_mut(id)
    }

    /// Insert a node, replacing (and returning) any node with the same id.
    pub fn insert(&mut self, node: DeviceNode) -> Option<DeviceNode> {
        self.nodes.insert(node.id.clone(), node)
    }

    /// Create a node, or update the identifying fields of an existing one.
    ///
    /// Capabilities already present on an existing node are kept.
    pub fn upsert(
        &mut self,
        id: &str,
        user_agent: String,
        fall_back: String,
        actual_device_root: bool,
    ) -> &mut DeviceNode {
        let node = self
            .nodes
            .entry(id.to_string())
            .or_insert_with(|| DeviceNode::new(id, "", ""));
        node.user_agent = user_agent;
        node.fall_back = fall_back;
        node.actual_device_root = actual_device_root;
        node
    }

    /// The fallback node of `id`, if it names one that exists.
    pub fn fallback(&self, id: &str) -> Option<&DeviceNode> {
        let node = self.nodes.get(id)?;
        if node.is_root() {
            return None;
        }
        self.nodes.get(&node.fall_back)
    }

    /// Look up a capability, walking the fallback chain until a node sets it.
    pub fn capability(&self, id: &str, name: &str) -> Option<&str> {
        let mut current = self.nodes.get(id)?;
        for _ in 0..self.nodes.len() {
            if let Some(value) = current.own_capability(name) {
                return Some(value);
            }
            current = self.fallback(&current.id)?;
        }
        tracing::warn!("fallback chain of device '{}' loops", id);
        None
    }

    /// Set a capability on a node. Returns `false` for unknown ids.
    pub fn set_capability(&mut self, id: &str, name: &str, value: impl Into<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.capabilities.insert(name.to_string(), value.into());
                true
            }
            None => false,
        }
    }

    /// Ids of all fallback devices of `id`, nearest first.
    pub fn ancestors(&self, id: &str) -> Vec<&str> {
        let mut chain: Vec<&str> = Vec::new();
        let mut current = id;
        while let Some(parent) = self.fallback(current) {
            if parent.id == id || chain.contains(&parent.id.as_str()) {
                tracing::warn!("fallback chain of device '{}' loops", id);
                break;
            }
            chain.push(&parent.id);
            current = &parent.id;
        }
        chain
    }

    /// Direct children of `id`, in insertion order.
    pub fn children(&self, id: &str) -> Vec<&DeviceNode> {
        self.nodes
            .values()
            .filter(|node| node.fall_back == id && node.id != id)
            .collect()
    }

    /// Iterate all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceNode> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// A mutable view of one node that can still read inherited values.
    pub fn entry(&mut self, id: &str) -> Option<DeviceEntry<'_>> {
        let index = self.nodes.get_index_of(id)?;
        Some(DeviceEntry { tree: self, index })
    }

    /// Remove every node.
    pub fn reset(&mut self) {
        self.nodes.clear();
    }
}

/// One device inside its tree, as handed to export filters.
///
/// Filters may read inherited capabilities and set new ones.
#[derive(Debug)]
pub struct DeviceEntry<'a> {
    tree: &'a mut CapabilityTree,
    index: usize,
}

impl DeviceEntry<'_> {
    pub fn node(&self) -> &DeviceNode {
        &self.tree.nodes[self.index]
    }

    pub fn id(&self) -> &str {
        &self.node().id
    }

    pub fn user_agent(&self) -> &str {
        &self.node().user_agent
    }

    pub fn fall_back(&self) -> &str {
        &self.node().fall_back
    }

    /// Capability value, inherited if not set on this device.
    pub fn capability(&self, name: &str) -> Option<&str> {
        self.tree.capability(self.id(), name)
    }

    /// Capability value, treating blank strings as missing.
    pub fn present_capability(&self, name: &str) -> Option<&str> {
        self.capability(name).filter(|v| !v.trim().is_empty())
    }

    pub fn set_capability(&mut self, name: &str, value: impl Into<String>) {
        self.tree.nodes[self.index]
            .capabilities
            .insert(name.to_string(), value.into());
    }
}
