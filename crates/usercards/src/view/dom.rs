//! A retained element tree with click dispatch.
//!
//! Elements live in slot storage addressed by [`NodeId`]. Ids are dense and
//! never reused: once an element is removed its id stays dead, so a stale
//! handle (for example a button of a deleted card) resolves to nothing.
//!
//! Listeners record *which* action a node triggers, not a closure. A click
//! resolves to an [`Event`] whose `key` is read from the node's
//! [`KEY_ATTRIBUTE`] at dispatch time, and the controller receives that key
//! as an explicit argument.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::markup::Markup;
use super::selector::Selector;

/// The attribute tagging a card and its controls with the record key.
pub const KEY_ATTRIBUTE: &str = "data-email";

/// Identifier of an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One element of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Element id, if any.
    pub id: Option<String>,
    /// Class names.
    pub classes: Vec<String>,
    /// Attributes, including `data-*` tags.
    pub attributes: BTreeMap<String, String>,
    /// Text content.
    pub text: Option<String>,
    /// Current value of an input element.
    pub value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: None,
            value: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Check whether this element matches `selector`.
    #[must_use]
    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Tag(tag) => self.tag == *tag,
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Attr { name, value } => {
                self.attributes.get(name).map(String::as_str) == Some(value.as_str())
            }
        }
    }

    /// The parent element, if attached to one.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child elements in order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// What a click on a node does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Submit the form (add or update).
    Submit,
    /// Erase every record.
    ClearAll,
    /// Delete the card's record.
    DeleteCard,
    /// Load the card's record into the form.
    EditCard,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit => write!(f, "submit"),
            Self::ClearAll => write!(f, "clear_all"),
            Self::DeleteCard => write!(f, "delete_card"),
            Self::EditCard => write!(f, "edit_card"),
        }
    }
}

/// A dispatched click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The action bound to the clicked node.
    pub action: Action,
    /// The clicked node.
    pub target: NodeId,
    /// The record key tagged on the clicked node, if any.
    pub key: Option<String>,
}

/// The element tree.
#[derive(Debug)]
pub struct Document {
    slots: Vec<Option<Element>>,
    root: NodeId,
    listeners: HashMap<NodeId, Action>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only a `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Element::new("body"))],
            root: NodeId(0),
            listeners: HashMap::new(),
        }
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live elements, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Check whether only the root is left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Get an element.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.slots.get(node.0 as usize).and_then(Option::as_ref)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.slots.get_mut(node.0 as usize).and_then(Option::as_mut)
    }

    /// Check whether `node` is live.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        let id = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Some(Element::new(tag)));
        NodeId(id)
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    ///
    /// Returns `false` if either node is dead or `child` is the root.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if child == self.root || !self.contains(parent) || !self.contains(child) {
            return false;
        }
        self.detach(child);
        if let Some(element) = self.element_mut(child) {
            element.parent = Some(parent);
        }
        if let Some(element) = self.element_mut(parent) {
            element.children.push(child);
        }
        true
    }

    /// Instantiate `markup` as a new subtree appended to `parent`.
    ///
    /// Returns the id of the subtree's top element.
    pub fn inject(&mut self, parent: NodeId, markup: &Markup) -> NodeId {
        let node = self.create_element(markup.tag.clone());
        if let Some(element) = self.element_mut(node) {
            element.id.clone_from(&markup.id);
            element.classes.clone_from(&markup.classes);
            element.attributes.clone_from(&markup.attributes);
            element.text.clone_from(&markup.text);
            if let Some(value) = markup.attributes.get("value") {
                element.value.clone_from(value);
            }
        }
        for child in &markup.children {
            self.inject(node, child);
        }
        self.append_child(parent, node);
        node
    }

    /// Remove `node` and its subtree from the document.
    ///
    /// Returns `false` if the node was already gone. The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root || !self.contains(node) {
            return false;
        }
        self.detach(node);
        self.free_subtree(node);
        true
    }

    /// Remove every child of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = self
            .element(node)
            .map(|element| element.children.clone())
            .unwrap_or_default();
        for child in children {
            self.remove(child);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.element(node).and_then(Element::parent) else {
            return;
        };
        if let Some(element) = self.element_mut(parent) {
            element.children.retain(|child| *child != node);
        }
        if let Some(element) = self.element_mut(node) {
            element.parent = None;
        }
    }

    fn free_subtree(&mut self, node: NodeId) {
        let Some(element) = self.slots.get_mut(node.0 as usize).and_then(Option::take) else {
            return;
        };
        self.listeners.remove(&node);
        for child in element.children {
            self.free_subtree(child);
        }
    }

    /// Text content of `node`.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.element(node).and_then(|element| element.text.as_deref())
    }

    /// Replace the text content of `node`. Returns `false` if it is dead.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) -> bool {
        match self.element_mut(node) {
            Some(element) => {
                element.text = Some(text.into());
                true
            }
            None => false,
        }
    }

    /// Value of attribute `name` on `node`.
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|element| element.attributes.get(name))
            .map(String::as_str)
    }

    /// Set attribute `name` on `node`. Returns `false` if it is dead.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        match self.element_mut(node) {
            Some(element) => {
                element.attributes.insert(name.into(), value.into());
                true
            }
            None => false,
        }
    }

    /// Current value of an input.
    #[must_use]
    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.value.as_str())
    }

    /// Set the value of an input. Returns `false` if it is dead.
    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) -> bool {
        match self.element_mut(node) {
            Some(element) => {
                element.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Child elements of `node` (empty if dead).
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match self.element(node) {
            Some(element) => &element.children,
            None => &[],
        }
    }

    /// First descendant of `scope` matching `selector`, in document order.
    ///
    /// `scope` itself is never matched.
    #[must_use]
    pub fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| self.matches(*node, selector))
    }

    /// Every descendant of `scope` matching `selector`, in document order.
    #[must_use]
    pub fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.matches(*node, selector))
            .collect()
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.element(node)
            .is_some_and(|element| element.matches(selector))
    }

    /// Descendants of `scope` in pre-order.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Bind `action` to clicks on `node`, replacing any previous binding.
    pub fn add_listener(&mut self, node: NodeId, action: Action) -> bool {
        if !self.contains(node) {
            return false;
        }
        self.listeners.insert(node, action);
        true
    }

    /// The action bound to `node`, if any.
    #[must_use]
    pub fn listener(&self, node: NodeId) -> Option<Action> {
        self.listeners.get(&node).copied()
    }

    /// Resolve a click on `node`.
    ///
    /// Returns `None` for dead nodes and nodes without a listener.
    #[must_use]
    pub fn click(&self, node: NodeId) -> Option<Event> {
        let action = self.listener(node)?;
        Some(Event {
            action,
            target: node,
            key: self.attribute(node, KEY_ATTRIBUTE).map(str::to_string),
        })
    }

    /// Snapshot `node` and its subtree as markup. Input values are exported
    /// as `value` attributes.
    #[must_use]
    pub fn to_markup(&self, node: NodeId) -> Option<Markup> {
        let element = self.element(node)?;
        let mut markup = Markup::new(element.tag.clone());
        markup.id.clone_from(&element.id);
        markup.classes.clone_from(&element.classes);
        markup.attributes.clone_from(&element.attributes);
        markup.text.clone_from(&element.text);
        if element.tag == "input" {
            markup
                .attributes
                .insert("value".to_string(), element.value.clone());
        }
        markup.children = element
            .children
            .iter()
            .filter_map(|child| self.to_markup(*child))
            .collect();
        Some(markup)
    }

    /// Serialize the whole document as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.to_markup(self.root)
            .map(|markup| markup.to_html())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with_items(doc: &mut Document, n: usize) -> (NodeId, Vec<NodeId>) {
        let root = doc.root();
        let list = doc.inject(root, &Markup::new("div").class("users"));
        let items = (0..n)
            .map(|i| {
                doc.inject(
                    list,
                    &Markup::new("div")
                        .class("user")
                        .attr(KEY_ATTRIBUTE, format!("{i}@x.com"))
                        .child(Markup::new("p").text(format!("item {i}"))),
                )
            })
            .collect();
        (list, items)
    }

    #[test]
    fn test_new_document_has_root_only() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.element(doc.root()).unwrap().tag, "body");
    }

    #[test]
    fn test_inject_builds_subtree() {
        let mut doc = Document::new();
        let (list, items) = list_with_items(&mut doc, 2);

        assert_eq!(doc.children(list), items.as_slice());
        let paragraph = doc.children(items[1])[0];
        assert_eq!(doc.text(paragraph), Some("item 1"));
        assert_eq!(doc.element(paragraph).unwrap().parent(), Some(items[1]));
    }

    #[test]
    fn test_query_and_query_all() {
        let mut doc = Document::new();
        let (list, items) = list_with_items(&mut doc, 3);

        assert_eq!(doc.query(doc.root(), &Selector::class("users")), Some(list));
        assert_eq!(
            doc.query(list, &Selector::attr(KEY_ATTRIBUTE, "2@x.com")),
            Some(items[2])
        );
        assert_eq!(doc.query_all(list, &Selector::tag("p")).len(), 3);
        assert_eq!(doc.query(list, &Selector::class("users")), None);
    }

    #[test]
    fn test_remove_frees_subtree() {
        let mut doc = Document::new();
        let (list, items) = list_with_items(&mut doc, 2);
        let paragraph = doc.children(items[0])[0];

        assert!(doc.remove(items[0]));

        assert!(!doc.contains(items[0]));
        assert!(!doc.contains(paragraph));
        assert_eq!(doc.children(list), &[items[1]]);
        assert!(!doc.remove(items[0]));
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut doc = Document::new();
        let (list, items) = list_with_items(&mut doc, 1);
        doc.remove(items[0]);

        let fresh = doc.inject(list, &Markup::new("div"));
        assert_ne!(fresh, items[0]);
        assert!(!doc.contains(items[0]));
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let mut doc = Document::new();
        let root = doc.root();
        assert!(!doc.remove(root));
        assert!(doc.contains(root));
    }

    #[test]
    fn test_clear_children() {
        let mut doc = Document::new();
        let (list, items) = list_with_items(&mut doc, 3);

        doc.clear_children(list);

        assert!(doc.children(list).is_empty());
        assert!(items.iter().all(|item| !doc.contains(*item)));
    }

    #[test]
    fn test_append_child_moves_node() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.inject(root, &Markup::new("div"));
        let b = doc.inject(root, &Markup::new("div"));
        let moved = doc.inject(a, &Markup::new("span"));

        assert!(doc.append_child(b, moved));

        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[moved]);
    }

    #[test]
    fn test_click_reads_key_at_dispatch() {
        let mut doc = Document::new();
        let (_, items) = list_with_items(&mut doc, 1);
        doc.add_listener(items[0], Action::DeleteCard);

        let event = doc.click(items[0]).unwrap();
        assert_eq!(event.action, Action::DeleteCard);
        assert_eq!(event.target, items[0]);
        assert_eq!(event.key.as_deref(), Some("0@x.com"));
    }

    #[test]
    fn test_click_without_listener_or_dead_node() {
        let mut doc = Document::new();
        let (_, items) = list_with_items(&mut doc, 1);
        assert_eq!(doc.click(items[0]), None);

        doc.add_listener(items[0], Action::EditCard);
        doc.remove(items[0]);
        assert_eq!(doc.click(items[0]), None);
        assert_eq!(doc.listener(items[0]), None);
    }

    #[test]
    fn test_set_text_attribute_value() {
        let mut doc = Document::new();
        let root = doc.root();
        let input = doc.inject(root, &Markup::new("input").id("name"));

        assert!(doc.set_value(input, "A"));
        assert!(doc.set_attribute(input, "placeholder", "Name"));
        assert!(doc.set_text(root, "hello"));

        assert_eq!(doc.value(input), Some("A"));
        assert_eq!(doc.attribute(input, "placeholder"), Some("Name"));
        assert_eq!(doc.text(root), Some("hello"));
    }

    #[test]
    fn test_to_html_exports_input_value() {
        let mut doc = Document::new();
        let root = doc.root();
        let input = doc.inject(root, &Markup::new("input").id("email"));
        doc.set_value(input, "a@x.com");

        let html = doc.to_html();
        assert!(html.contains("<input id=\"email\" value=\"a@x.com\">"));
    }
}
