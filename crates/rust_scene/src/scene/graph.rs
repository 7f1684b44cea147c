//! Scene graph arena
//!
//! Owns every node, component and animator behind generational handles.
//! Nodes form the tree; components and animators are held in separate arenas
//! so that a node only ever refers to them, never owns them. All
//! cross-references (parent/children, node/component, node/animator) are
//! kept consistent here.

use slotmap::SlotMap;

use super::{
    Aabb2, Animator, AnimatorId, Camera, CommandBuffer, Component, ComponentId, DrawQueue, Node,
    NodeId, SceneError, UpdateList, UpdateScheduler,
};
use crate::config::SceneConfig;
use crate::foundation::math::{Mat4, Mat4Ext, Vec2};

#[derive(Debug)]
struct ComponentEntry {
    component: Box<dyn Component>,
    node: Option<NodeId>,
}

#[derive(Debug)]
struct AnimatorEntry {
    animator: Box<dyn Animator>,
    node: Option<NodeId>,
}

/// Hierarchical scene with cached transforms, draw ordering and hit testing
#[derive(Debug)]
pub struct SceneGraph<S: UpdateScheduler = UpdateList> {
    config: SceneConfig,
    nodes: SlotMap<NodeId, Node>,
    components: SlotMap<ComponentId, ComponentEntry>,
    animators: SlotMap<AnimatorId, AnimatorEntry>,
    scheduler: S,
    next_sequence: u64,
}

impl SceneGraph<UpdateList> {
    /// Create an empty scene with default configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create an empty scene with custom configuration
    pub fn with_config(config: SceneConfig) -> Self {
        Self::with_scheduler(config, UpdateList::new())
    }
}

impl Default for SceneGraph<UpdateList> {
    fn default() -> Self {
        Self::new()
    }
}

fn union_bounds(node: &Node, components: &SlotMap<ComponentId, ComponentEntry>) -> Aabb2 {
    let mut bounds = Aabb2::empty();
    for entry in node.components.iter().filter_map(|id| components.get(*id)) {
        if !entry.component.is_hidden() {
            bounds.merge(&entry.component.bounding_box());
        }
    }
    bounds
}

impl<S: UpdateScheduler> SceneGraph<S> {
    /// Create an empty scene driven by an injected update scheduler
    pub fn with_scheduler(config: SceneConfig, scheduler: S) -> Self {
        Self {
            config,
            nodes: SlotMap::with_key(),
            components: SlotMap::with_key(),
            animators: SlotMap::with_key(),
            scheduler,
            next_sequence: 0,
        }
    }

    /// Active configuration
    pub const fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Mutable configuration, applied from the next operation on
    pub fn config_mut(&mut self) -> &mut SceneConfig {
        &mut self.config
    }

    /// The injected update scheduler
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the injected update scheduler
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Create a detached node
    pub fn create_node(&mut self) -> NodeId {
        let mut node = Node::new();
        node.set_cull_disabled(self.config.cull_disabled_by_default);
        self.store_node(node)
    }

    /// Insert a prepared node as a root
    ///
    /// Any relationship slots it carries are cleared and its parent transform
    /// is reset to identity.
    pub fn insert_node(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        node.components.clear();
        node.animator = None;
        node.update_parent_transform(Mat4::identity());
        self.store_node(node)
    }

    fn store_node(&mut self, mut node: Node) -> NodeId {
        node.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.nodes.insert(node)
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node for mutation of its spatial and visual state
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether the handle refers to a live node
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes without a parent, in creation order
    ///
    /// Creation order survives slot reuse: a node created after a destroy
    /// sorts after every older root even if it took an older slot.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> {
        let mut roots: Vec<(u64, NodeId)> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, node)| (node.sequence, id))
            .collect();
        roots.sort_unstable_by_key(|(sequence, _)| *sequence);
        roots.into_iter().map(|(_, id)| id)
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of a node, empty for an unknown handle
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Whether `child` is a direct child of `parent`, or any descendant when `recursive`
    pub fn has_child(&self, parent: NodeId, child: NodeId, recursive: bool) -> bool {
        if recursive {
            self.is_ancestor(parent, child)
        } else {
            self.parent(child) == Some(parent)
        }
    }

    /// All descendants of a node in pre-order, not including the node itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// Append `child` to `parent`'s children
    ///
    /// A child that already has a parent is detached from it first. The
    /// child's parent-transform cache is seeded from `parent` immediately.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(SceneError::NodeNotFound(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(SceneError::CyclicHierarchy { parent, child });
        }

        self.detach_from_parent(child);

        let parent_transform = {
            let parent_node = &mut self.nodes[parent];
            parent_node.children.push(child);
            parent_node.transform()
        };
        let child_node = &mut self.nodes[child];
        child_node.parent = Some(parent);
        child_node.update_parent_transform(parent_transform);

        log::debug!("Attached node {:?} under {:?}", child, parent);
        Ok(())
    }

    /// Remove a node from its parent's children; `false` if it had no parent
    pub fn detach_from_parent(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|child| *child != id);
        }
        self.make_root(id);
        log::debug!("Detached node {:?} from {:?}", id, parent);
        true
    }

    /// Detach `child` if it is a direct child of `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) == Some(parent) {
            self.detach_from_parent(child)
        } else {
            false
        }
    }

    /// Detach every child of a node; the children become roots
    pub fn remove_all_children(&mut self, parent: NodeId) {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return;
        };
        let children = std::mem::take(&mut parent_node.children);
        for child in children {
            self.make_root(child);
        }
    }

    /// Clear the parent slot and drop the cached parent transform
    fn make_root(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
            node.update_parent_transform(Mat4::identity());
        }
    }

    /// Destroy a single node
    ///
    /// Stops and releases its animator, releases its components, orphans its
    /// children (they survive as roots) and removes it from its parent.
    pub fn destroy_node(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }

        self.clear_current_animator(id);
        self.scheduler.unschedule_update(id);

        let node = &mut self.nodes[id];
        let components = std::mem::take(&mut node.components);
        let children = std::mem::take(&mut node.children);

        for component in components {
            if let Some(entry) = self.components.get_mut(component) {
                entry.node = None;
            }
        }
        for child in children {
            self.make_root(child);
        }

        self.detach_from_parent(id);
        self.nodes.remove(id);
        log::debug!("Destroyed node {:?}", id);
        true
    }

    /// Destroy a node together with all of its descendants
    pub fn destroy_subtree(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        let descendants = self.descendants(id);
        for descendant in descendants.into_iter().rev() {
            self.destroy_node(descendant);
        }
        self.destroy_node(id)
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Hand a component to the graph's component arena, unattached
    pub fn insert_component<C: Component + 'static>(&mut self, component: C) -> ComponentId {
        self.insert_boxed_component(Box::new(component))
    }

    /// Hand a boxed component to the graph's component arena, unattached
    pub fn insert_boxed_component(&mut self, component: Box<dyn Component>) -> ComponentId {
        self.components.insert(ComponentEntry { component, node: None })
    }

    /// Look up a component
    pub fn component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.components.get(id).map(|entry| entry.component.as_ref())
    }

    /// Look up a component for mutation
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut (dyn Component + 'static)> {
        self.components.get_mut(id).map(|entry| entry.component.as_mut())
    }

    /// Node a component is attached to
    pub fn component_node(&self, id: ComponentId) -> Option<NodeId> {
        self.components.get(id).and_then(|entry| entry.node)
    }

    /// Attach a component to a node, detaching it from its previous node first
    pub fn add_component(&mut self, node: NodeId, component: ComponentId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(node) {
            return Err(SceneError::NodeNotFound(node));
        }
        let Some(previous) = self.components.get(component).map(|entry| entry.node) else {
            return Err(SceneError::ComponentNotFound(component));
        };

        if let Some(old_node) = previous {
            self.remove_component(old_node, component);
        }

        self.components[component].node = Some(node);
        self.nodes[node].components.push(component);
        log::debug!("Attached component {:?} to node {:?}", component, node);
        Ok(())
    }

    /// Detach a component from a node; `false` if it was not attached there
    pub fn remove_component(&mut self, node: NodeId, component: ComponentId) -> bool {
        let Some(node_entry) = self.nodes.get_mut(node) else {
            return false;
        };
        let Some(index) = node_entry.components.iter().position(|id| *id == component) else {
            return false;
        };
        node_entry.components.remove(index);
        if let Some(entry) = self.components.get_mut(component) {
            entry.node = None;
        }
        true
    }

    /// Detach the component at `index`; `false` when out of bounds
    pub fn remove_component_at(&mut self, node: NodeId, index: usize) -> bool {
        let Some(node_entry) = self.nodes.get_mut(node) else {
            return false;
        };
        if index >= node_entry.components.len() {
            return false;
        }
        let component = node_entry.components.remove(index);
        if let Some(entry) = self.components.get_mut(component) {
            entry.node = None;
        }
        true
    }

    /// Detach every component of a node, clearing each back-reference
    pub fn remove_all_components(&mut self, node: NodeId) {
        let Some(node_entry) = self.nodes.get_mut(node) else {
            return;
        };
        for component in std::mem::take(&mut node_entry.components) {
            if let Some(entry) = self.components.get_mut(component) {
                entry.node = None;
            }
        }
    }

    /// Remove a component from the arena, detaching it first
    pub fn destroy_component(&mut self, component: ComponentId) -> Option<Box<dyn Component>> {
        if let Some(node) = self.component_node(component) {
            self.remove_component(node, component);
        }
        self.components.remove(component).map(|entry| entry.component)
    }

    /// Union of the bounding boxes of a node's visible components
    pub fn bounding_box(&self, node: NodeId) -> Aabb2 {
        self.nodes
            .get(node)
            .map_or_else(Aabb2::empty, |node| union_bounds(node, &self.components))
    }

    // ------------------------------------------------------------------
    // Animators
    // ------------------------------------------------------------------

    /// Hand an animator to the graph's animator arena, unattached
    pub fn insert_animator<A: Animator + 'static>(&mut self, animator: A) -> AnimatorId {
        self.insert_boxed_animator(Box::new(animator))
    }

    /// Hand a boxed animator to the graph's animator arena, unattached
    pub fn insert_boxed_animator(&mut self, animator: Box<dyn Animator>) -> AnimatorId {
        self.animators.insert(AnimatorEntry { animator, node: None })
    }

    /// Look up an animator
    pub fn animator(&self, id: AnimatorId) -> Option<&dyn Animator> {
        self.animators.get(id).map(|entry| entry.animator.as_ref())
    }

    /// Node an animator is currently driving
    pub fn animator_node(&self, id: AnimatorId) -> Option<NodeId> {
        self.animators.get(id).and_then(|entry| entry.node)
    }

    /// Make `animator` the node's current animator, or clear it with `None`
    ///
    /// A different current animator is released and stopped. The new one is
    /// taken from any node it was driving, pointed at this node and started.
    /// The node is registered for ticking in every case.
    pub fn set_animator(&mut self, node: NodeId, animator: Option<AnimatorId>) -> Result<(), SceneError> {
        if !self.nodes.contains_key(node) {
            return Err(SceneError::NodeNotFound(node));
        }
        if let Some(id) = animator {
            if !self.animators.contains_key(id) {
                return Err(SceneError::AnimatorNotFound(id));
            }
        }

        let current = self.nodes[node].animator;
        if let Some(current) = current.filter(|current| Some(*current) != animator) {
            self.release_animator(current);
        }

        self.nodes[node].animator = animator;

        if let Some(id) = animator {
            let previous = self.animators[id].node;
            if let Some(previous) = previous.filter(|previous| *previous != node) {
                self.remove_animator_if_current(previous, id);
            }
            let entry = &mut self.animators[id];
            entry.node = Some(node);
            entry.animator.start(&self.nodes[node]);
            log::debug!("Started animator {:?} on node {:?}", id, node);
        }

        self.scheduler.schedule_update(node);
        Ok(())
    }

    /// Clear the node's current animator if it is `animator`
    pub fn remove_animator_if_current(&mut self, node: NodeId, animator: AnimatorId) -> bool {
        let is_current = self
            .nodes
            .get(node)
            .is_some_and(|node_entry| node_entry.animator == Some(animator));
        is_current && self.clear_current_animator(node)
    }

    /// Release and stop the node's current animator, if any
    pub fn clear_current_animator(&mut self, node: NodeId) -> bool {
        let Some(current) = self.nodes.get_mut(node).and_then(|node| node.animator.take()) else {
            return false;
        };
        self.release_animator(current);
        self.scheduler.unschedule_update(node);
        true
    }

    fn release_animator(&mut self, animator: AnimatorId) {
        if let Some(entry) = self.animators.get_mut(animator) {
            entry.node = None;
            entry.animator.stop();
            log::debug!("Stopped animator {:?}", animator);
        }
    }

    /// Remove an animator from the arena, releasing it from its node first
    pub fn destroy_animator(&mut self, animator: AnimatorId) -> Option<Box<dyn Animator>> {
        if let Some(node) = self.animator_node(animator) {
            self.remove_animator_if_current(node, animator);
        }
        self.animators.remove(animator).map(|entry| entry.animator)
    }

    /// Per-frame tick of one node's animator
    ///
    /// A finished animator is cleared. A node without an animator is
    /// unregistered from the scheduler.
    pub fn update_animation(&mut self, node: NodeId, delta: f32) {
        let current = self.nodes.get(node).and_then(|node| node.animator);
        let Some(animator) = current else {
            self.scheduler.unschedule_update(node);
            return;
        };

        let done = match self.animators.get_mut(animator) {
            Some(entry) => {
                entry.animator.update(delta, &mut self.nodes[node]);
                entry.animator.is_done()
            }
            None => {
                log::warn!("Node {:?} refers to a destroyed animator {:?}", node, animator);
                true
            }
        };

        if done {
            self.clear_current_animator(node);
            self.scheduler.unschedule_update(node);
        }
    }

    /// Tick every scheduled node once
    pub fn update(&mut self, delta: f32) {
        for node in self.scheduler.scheduled() {
            self.update_animation(node, delta);
        }
    }

    // ------------------------------------------------------------------
    // Visit and draw
    // ------------------------------------------------------------------

    /// Pre-order traversal that refreshes transforms, culls and fills `draw_queue`
    ///
    /// A node is queued when it is not hidden and either has culling disabled
    /// or has non-empty bounds the camera reports as visible. Hidden nodes are
    /// still traversed.
    pub fn visit(
        &mut self,
        node: NodeId,
        draw_queue: &mut DrawQueue,
        parent_transform: &Mat4,
        parent_transform_dirty: bool,
        camera: &dyn Camera,
        parent_order: i32,
    ) {
        let Some(node_entry) = self.nodes.get_mut(node) else {
            log::warn!("Skipping visit of stale node {:?}", node);
            return;
        };

        let world_order = parent_order.saturating_add(node_entry.order());
        node_entry.set_world_order(world_order);

        if parent_transform_dirty {
            node_entry.update_parent_transform(*parent_transform);
        }

        let node_entry = &self.nodes[node];
        let transform = node_entry.transform();

        if !node_entry.is_hidden() {
            let candidate = node_entry.is_cull_disabled() || {
                let bounds = union_bounds(node_entry, &self.components);
                !bounds.is_empty() && camera.check_visibility(&transform, &bounds)
            };
            if candidate {
                draw_queue.insert(node, world_order);
            } else {
                log::trace!("Culled node {:?}", node);
            }
        }

        let children_dirty = node_entry.children_need_refresh();
        let mut index = 0;
        while let Some(child) = self.nodes[node].children.get(index).copied() {
            self.visit(child, draw_queue, &transform, children_dirty, camera, world_order);
            index += 1;
        }

        self.nodes[node].clear_children_refresh();
    }

    /// Visit a whole tree from `root` with identity parent transform and order 0
    pub fn build_draw_queue(&mut self, root: NodeId, camera: &dyn Camera) -> DrawQueue {
        let mut queue = DrawQueue::with_capacity(self.config.draw_queue_capacity);
        self.visit(root, &mut queue, &Mat4::identity(), false, camera, 0);
        queue
    }

    /// Visit every root in creation order into one queue
    ///
    /// Roots sharing a world order therefore keep their creation order.
    pub fn build_draw_queue_for_roots(&mut self, camera: &dyn Camera) -> DrawQueue {
        let roots: Vec<NodeId> = self.roots().collect();
        let mut queue = DrawQueue::with_capacity(self.config.draw_queue_capacity);
        for root in roots {
            self.visit(root, &mut queue, &Mat4::identity(), false, camera, 0);
        }
        queue
    }

    /// Draw one node's visible components with its effective color
    pub fn draw(&self, node: NodeId, camera: &dyn Camera, commands: &mut CommandBuffer) {
        if let Some(node_entry) = self.nodes.get(node) {
            let transform = node_entry.transform();
            let color = node_entry.draw_color();
            for entry in self.visible_components(node_entry) {
                entry.component.draw(&transform, color, camera, commands);
            }
        }
    }

    /// Draw one node's visible components as outlines
    pub fn draw_wireframe(&self, node: NodeId, camera: &dyn Camera, commands: &mut CommandBuffer) {
        if let Some(node_entry) = self.nodes.get(node) {
            let transform = node_entry.transform();
            let color = node_entry.wireframe_color();
            for entry in self.visible_components(node_entry) {
                entry.component.draw_wireframe(&transform, color, camera, commands);
            }
        }
    }

    fn visible_components<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a ComponentEntry> + 'a {
        node.components
            .iter()
            .filter_map(|id| self.components.get(*id))
            .filter(|entry| !entry.component.is_hidden())
    }

    /// Draw every queued node in queue order
    pub fn draw_queue(&self, queue: &DrawQueue, camera: &dyn Camera, commands: &mut CommandBuffer) {
        for node in queue.nodes() {
            if self.config.wireframe {
                self.draw_wireframe(node, camera, commands);
            } else {
                self.draw(node, camera, commands);
            }
        }
    }

    /// Visit from `root`, then draw the resulting queue
    pub fn draw_frame(&mut self, root: NodeId, camera: &dyn Camera, commands: &mut CommandBuffer) -> DrawQueue {
        let queue = self.build_draw_queue(root, camera);
        self.draw_queue(&queue, camera, commands);
        log::trace!("Frame drew {} nodes into {} commands", queue.len(), commands.len());
        queue
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// Whether any component of the node contains a world-space point
    pub fn point_contains(&self, node: NodeId, world_point: Vec2) -> bool {
        let Some(node_entry) = self.nodes.get(node) else {
            return false;
        };
        let Some(local_point) = node_entry.convert_world_to_local(world_point) else {
            return false;
        };
        node_entry
            .components
            .iter()
            .filter_map(|id| self.components.get(*id))
            .any(|entry| entry.component.point_contains(local_point))
    }

    /// Whether any component of the node overlaps a world-space polygon
    pub fn shape_overlaps(&self, node: NodeId, world_edges: &[Vec2]) -> bool {
        let Some(node_entry) = self.nodes.get(node) else {
            return false;
        };
        let Some(inverse) = node_entry.inverse_transform() else {
            return false;
        };
        let local_edges: Vec<Vec2> = world_edges
            .iter()
            .map(|edge| inverse.transform_point_2d(*edge))
            .collect();
        node_entry
            .components
            .iter()
            .filter_map(|id| self.components.get(*id))
            .any(|entry| entry.component.shape_overlaps(&local_edges))
    }

    /// Topmost queued node containing a world-space point
    ///
    /// The last entry of a draw queue is drawn last, so the queue is searched
    /// back to front.
    pub fn pick_node(&self, queue: &DrawQueue, world_point: Vec2) -> Option<NodeId> {
        queue.nodes().rev().find(|node| self.point_contains(*node, world_point))
    }

    /// Queued nodes overlapping a world-space polygon, topmost first
    pub fn pick_nodes_in_shape(&self, queue: &DrawQueue, world_edges: &[Vec2]) -> Vec<NodeId> {
        queue
            .nodes()
            .rev()
            .filter(|node| self.shape_overlaps(*node, world_edges))
            .collect()
    }
}
