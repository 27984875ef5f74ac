//! Content tree for slot resolution.
//!
//! `Content` is the opaque renderable value the engine rewrites. It mirrors
//! the host framework's element representation closely enough for matching
//! and transformation, but rendering it is out of this crate's hands: the
//! resolved tree is handed back to the caller as-is.
//!
//! All transformations produce new values; inputs are never mutated, so
//! repeated resolution passes over the same children stay pure.

use std::borrow::Cow;

use serde_json::Value;

use crate::props::Props;

/// A unified representation of renderable slot content.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
	/// A named element or component node.
	Element(Element),
	/// A text node.
	Text(Cow<'static, str>),
	/// A numeric node.
	Number(f64),
	/// A sequence of nodes with no wrapper element.
	Fragment(Vec<Content>),
	/// An empty node (renders nothing).
	Empty,
}

impl Content {
	/// Creates a text node.
	pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
		Content::Text(text.into())
	}

	/// Creates a numeric node.
	pub fn number(value: f64) -> Self {
		Content::Number(value)
	}

	/// Creates a fragment from an iterator of nodes.
	pub fn fragment(nodes: impl IntoIterator<Item = impl IntoContent>) -> Self {
		Content::Fragment(nodes.into_iter().map(IntoContent::into_content).collect())
	}

	/// Returns a short human-readable tag for this node, used in
	/// mismatch errors.
	pub fn descriptor(&self) -> String {
		match self {
			Content::Element(el) => format!("element `{}`", el.name()),
			Content::Text(_) => "string".to_string(),
			Content::Number(_) => "number".to_string(),
			Content::Fragment(_) => "fragment".to_string(),
			Content::Empty => "empty".to_string(),
		}
	}

	/// Returns the stable identity key of this node, if it carries one.
	pub fn key(&self) -> Option<&str> {
		match self {
			Content::Element(el) => el.key(),
			_ => None,
		}
	}

	/// Returns whether this node renders nothing.
	pub fn is_empty(&self) -> bool {
		match self {
			Content::Empty => true,
			Content::Fragment(nodes) => nodes.iter().all(Content::is_empty),
			_ => false,
		}
	}
}

/// A named element or component node in the content tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
	/// The element or component name (e.g. "button", "Icon").
	name: Cow<'static, str>,
	/// Props attached to the node.
	props: Props,
	/// Child content.
	children: Vec<Content>,
	/// Caller-supplied stable identity, if any.
	key: Option<Cow<'static, str>>,
}

impl Element {
	/// Creates a new element node.
	pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
		Self {
			name: name.into(),
			props: Props::new(),
			children: Vec::new(),
			key: None,
		}
	}

	/// Sets a prop.
	pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.props.set(name, value);
		self
	}

	/// Adds a child node.
	pub fn child(mut self, child: impl IntoContent) -> Self {
		self.children.push(child.into_content());
		self
	}

	/// Adds multiple child nodes.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoContent>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoContent::into_content));
		self
	}

	/// Sets the stable identity key.
	pub fn with_key(self, key: impl Into<Cow<'static, str>>) -> Self {
		Self {
			key: Some(key.into()),
			..self
		}
	}

	/// Returns the stable identity key, if set.
	pub fn key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	/// Returns the element name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the props.
	pub fn props(&self) -> &Props {
		&self.props
	}

	/// Returns the props mutably.
	pub fn props_mut(&mut self) -> &mut Props {
		&mut self.props
	}

	/// Returns the child nodes.
	pub fn child_nodes(&self) -> &[Content] {
		&self.children
	}

	/// Adds a prop mutably.
	pub fn add_prop(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		self.props.set(name, value);
	}

	/// Adds a child mutably.
	pub fn add_child(&mut self, child: impl IntoContent) {
		self.children.push(child.into_content());
	}
}

impl From<Element> for Content {
	fn from(element: Element) -> Self {
		Content::Element(element)
	}
}

/// Trait for converting values into slot content.
pub trait IntoContent {
	/// Converts the value into content.
	fn into_content(self) -> Content;
}

impl IntoContent for Content {
	fn into_content(self) -> Content {
		self
	}
}

impl IntoContent for Element {
	fn into_content(self) -> Content {
		Content::Element(self)
	}
}

impl IntoContent for &'static str {
	fn into_content(self) -> Content {
		Content::Text(Cow::Borrowed(self))
	}
}

impl IntoContent for String {
	fn into_content(self) -> Content {
		Content::Text(Cow::Owned(self))
	}
}

impl IntoContent for f64 {
	fn into_content(self) -> Content {
		Content::Number(self)
	}
}

impl IntoContent for i64 {
	fn into_content(self) -> Content {
		Content::Number(self as f64)
	}
}

impl IntoContent for i32 {
	fn into_content(self) -> Content {
		Content::Number(f64::from(self))
	}
}

impl IntoContent for Vec<Content> {
	fn into_content(self) -> Content {
		Content::Fragment(self)
	}
}

impl IntoContent for () {
	fn into_content(self) -> Content {
		Content::Empty
	}
}

impl<T: IntoContent> IntoContent for Option<T> {
	fn into_content(self) -> Content {
		match self {
			Some(value) => value.into_content(),
			None => Content::Empty,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_element_builder() {
		let el = Element::new("button")
			.prop("id", "trigger")
			.child("Click")
			.with_key("k1");

		assert_eq!(el.name(), "button");
		assert_eq!(el.props().get("id"), Some(&Value::String("trigger".into())));
		assert_eq!(el.child_nodes(), &[Content::text("Click")]);
		assert_eq!(el.key(), Some("k1"));
	}

	#[test]
	fn test_descriptor() {
		assert_eq!(
			Element::new("Icon").into_content().descriptor(),
			"element `Icon`"
		);
		assert_eq!(Content::text("x").descriptor(), "string");
		assert_eq!(Content::number(1.0).descriptor(), "number");
		assert_eq!(Content::Fragment(vec![]).descriptor(), "fragment");
		assert_eq!(Content::Empty.descriptor(), "empty");
	}

	#[test]
	fn test_is_empty() {
		assert!(Content::Empty.is_empty());
		assert!(Content::Fragment(vec![Content::Empty]).is_empty());
		assert!(!Content::text("x").is_empty());
	}

	#[test]
	fn test_into_content_conversions() {
		assert_eq!("abc".into_content(), Content::text("abc"));
		assert_eq!(3i32.into_content(), Content::Number(3.0));
		assert_eq!(().into_content(), Content::Empty);
		assert_eq!(None::<Element>.into_content(), Content::Empty);
	}
}
