//! Slot children: the top-level nodes a caller passes to a component.
//!
//! A [`SlotNode`] is one top-level child. It carries an optional stable
//! identity key, the name of the slot it targets (the reserved name
//! [`DEFAULT_SLOT`] when unannotated), and its item kind: ordinary content,
//! an override marker, or a template-forward marker. Markers are
//! instructions to the resolution engine, never content themselves.

use std::borrow::Cow;

use crate::callback::RenderFn;
use crate::chain::OverrideSpec;
use crate::content::{Content, IntoContent};
use crate::error::{Result, SlotError};
use crate::forward::ForwardBinding;
use crate::props::Props;

/// The reserved slot name for unannotated children.
pub const DEFAULT_SLOT: &str = "default";

/// The reserved element prop used as a slot annotation.
pub const SLOT_PROP: &str = "slot";

/// A slot payload: a concrete value, or a deferred function of pass-up
/// props. Never both.
#[derive(Debug, Clone)]
pub enum Payload {
	/// A concrete content value.
	Value(Content),
	/// A deferred payload, realized with the resolving component's
	/// runtime props.
	Deferred(RenderFn),
}

impl Payload {
	/// Realizes the payload against the given runtime props.
	///
	/// Concrete values are returned as-is; deferred payloads are invoked.
	pub fn realize(&self, props: &Props) -> Content {
		match self {
			Payload::Value(content) => content.clone(),
			Payload::Deferred(f) => f.render(props),
		}
	}

	/// Returns whether this payload is deferred.
	pub fn is_deferred(&self) -> bool {
		matches!(self, Payload::Deferred(_))
	}
}

/// The kind of a slot child.
#[derive(Debug, Clone)]
pub enum SlotItem {
	/// Ordinary content.
	Ordinary(Payload),
	/// An override marker carrying a transformation spec (and optionally
	/// wrapped fallback content).
	Override(OverrideSpec),
	/// A template-forward marker binding a caller's own slot content into
	/// this slot.
	Forward(ForwardBinding),
}

/// One top-level child passed to a component.
#[derive(Debug, Clone)]
pub struct SlotNode {
	key: Option<Cow<'static, str>>,
	slot: Cow<'static, str>,
	item: SlotItem,
}

impl SlotNode {
	/// Creates an unannotated child targeting the default slot.
	pub fn new(content: impl IntoContent) -> Self {
		Self::annotated(DEFAULT_SLOT, content)
	}

	/// Creates a child explicitly annotated with a slot name.
	pub fn annotated(slot: impl Into<Cow<'static, str>>, content: impl IntoContent) -> Self {
		Self {
			key: None,
			slot: slot.into(),
			item: SlotItem::Ordinary(Payload::Value(content.into_content())),
		}
	}

	/// Creates a deferred child whose content is a function of pass-up
	/// props.
	pub fn deferred<F>(slot: impl Into<Cow<'static, str>>, f: F) -> Self
	where
		F: Fn(&Props) -> Content + Send + Sync + 'static,
	{
		Self {
			key: None,
			slot: slot.into(),
			item: SlotItem::Ordinary(Payload::Deferred(RenderFn::new(f))),
		}
	}

	/// Creates an override marker targeting the default slot.
	///
	/// Use [`SlotNode::in_slot`] to retarget the marker when it is passed
	/// as a child of the component rather than declared inside a slot.
	pub fn override_marker(spec: OverrideSpec) -> Self {
		Self {
			key: None,
			slot: Cow::Borrowed(DEFAULT_SLOT),
			item: SlotItem::Override(spec),
		}
	}

	/// Creates a template-forward marker targeting `slot`.
	///
	/// Fails with [`SlotError::InvalidForwardPayload`] when the binding
	/// carries a deferred payload anywhere in its content: forwarding must
	/// bind a concrete value, because the merge step cannot decide which
	/// side's runtime props a deferred function should see.
	pub fn forward(slot: impl Into<Cow<'static, str>>, binding: ForwardBinding) -> Result<Self> {
		let slot = slot.into();
		if binding.has_deferred_payload() {
			return Err(SlotError::InvalidForwardPayload {
				slot: slot.into_owned(),
			});
		}
		Ok(Self {
			key: None,
			slot,
			item: SlotItem::Forward(binding),
		})
	}

	/// Sets the stable identity key.
	pub fn with_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// Retargets the child to another slot.
	pub fn in_slot(mut self, slot: impl Into<Cow<'static, str>>) -> Self {
		self.slot = slot.into();
		self
	}

	/// Returns the stable identity key, if set.
	pub fn key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	/// Returns the targeted slot name.
	pub fn slot(&self) -> &str {
		&self.slot
	}

	/// Returns the item kind.
	pub fn item(&self) -> &SlotItem {
		&self.item
	}

	pub(crate) fn item_mut(&mut self) -> &mut SlotItem {
		&mut self.item
	}

	pub(crate) fn set_slot(&mut self, slot: Cow<'static, str>) {
		self.slot = slot;
	}
}

impl From<Content> for SlotNode {
	fn from(content: Content) -> Self {
		SlotNode::new(content)
	}
}

impl From<crate::content::Element> for SlotNode {
	fn from(element: crate::content::Element) -> Self {
		SlotNode::new(element)
	}
}

impl From<&'static str> for SlotNode {
	fn from(text: &'static str) -> Self {
		SlotNode::new(text)
	}
}

impl From<String> for SlotNode {
	fn from(text: String) -> Self {
		SlotNode::new(text)
	}
}

/// An ordered sequence of slot children, used for child lists and fallback
/// arguments.
#[derive(Debug, Clone, Default)]
pub struct SlotContent {
	nodes: Vec<SlotNode>,
}

impl SlotContent {
	/// Creates an empty sequence.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a child.
	pub fn push(&mut self, node: impl Into<SlotNode>) {
		self.nodes.push(node.into());
	}

	/// Appends a child, builder style.
	pub fn and(mut self, node: impl Into<SlotNode>) -> Self {
		self.push(node);
		self
	}

	/// Returns the children.
	pub fn nodes(&self) -> &[SlotNode] {
		&self.nodes
	}

	/// Returns whether the sequence is empty.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Consumes the sequence and returns the children.
	pub fn into_nodes(self) -> Vec<SlotNode> {
		self.nodes
	}
}

impl From<SlotNode> for SlotContent {
	fn from(node: SlotNode) -> Self {
		Self { nodes: vec![node] }
	}
}

impl From<Vec<SlotNode>> for SlotContent {
	fn from(nodes: Vec<SlotNode>) -> Self {
		Self { nodes }
	}
}

impl From<()> for SlotContent {
	fn from(_: ()) -> Self {
		Self::new()
	}
}

impl From<Content> for SlotContent {
	fn from(content: Content) -> Self {
		SlotNode::new(content).into()
	}
}

impl From<crate::content::Element> for SlotContent {
	fn from(element: crate::content::Element) -> Self {
		SlotNode::new(element).into()
	}
}

impl From<&'static str> for SlotContent {
	fn from(text: &'static str) -> Self {
		SlotNode::new(text).into()
	}
}

impl From<String> for SlotContent {
	fn from(text: String) -> Self {
		SlotNode::new(text).into()
	}
}

impl From<OverrideSpec> for SlotContent {
	fn from(spec: OverrideSpec) -> Self {
		SlotNode::override_marker(spec).into()
	}
}

impl FromIterator<SlotNode> for SlotContent {
	fn from_iter<I: IntoIterator<Item = SlotNode>>(iter: I) -> Self {
		Self {
			nodes: iter.into_iter().collect(),
		}
	}
}

/// Factory for named-template wrappers.
///
/// `Template::slot(name)` produces a wrapper recognized by the classifier
/// as targeting `name`. The typed form, [`Template::for_def`], constrains
/// the valid names to a component's declared slot set; the untyped form is
/// treated identically at resolution time.
///
/// # Example
///
/// ```ignore
/// use quintette::{Element, Template};
///
/// let child = Template::slot("title").value(Element::new("h2").child("Settings"));
/// ```
pub struct Template;

impl Template {
	/// Starts a template wrapper targeting `name`.
	pub fn slot(name: impl Into<Cow<'static, str>>) -> TemplateSlot {
		TemplateSlot {
			name: name.into(),
			key: None,
		}
	}

	/// Returns a typed factory scoped to a component's declared slots.
	pub fn for_def(def: &crate::accessor::SlotDef) -> TypedTemplate<'_> {
		TypedTemplate { def }
	}
}

/// A template wrapper under construction.
pub struct TemplateSlot {
	name: Cow<'static, str>,
	key: Option<Cow<'static, str>>,
}

impl TemplateSlot {
	/// Sets the stable identity key.
	pub fn key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// Finishes the wrapper with a concrete content value.
	pub fn value(self, content: impl IntoContent) -> SlotNode {
		let node = SlotNode::annotated(self.name, content);
		match self.key {
			Some(key) => node.with_key(key),
			None => node,
		}
	}

	/// Finishes the wrapper with a deferred payload.
	pub fn deferred<F>(self, f: F) -> SlotNode
	where
		F: Fn(&Props) -> Content + Send + Sync + 'static,
	{
		let node = SlotNode::deferred(self.name, f);
		match self.key {
			Some(key) => node.with_key(key),
			None => node,
		}
	}

	/// Finishes the wrapper as a template-forward marker.
	///
	/// Fails when the binding carries a deferred payload (see
	/// [`SlotNode::forward`]).
	pub fn forward(self, binding: ForwardBinding) -> Result<SlotNode> {
		let node = SlotNode::forward(self.name, binding)?;
		Ok(match self.key {
			Some(key) => node.with_key(key),
			None => node,
		})
	}
}

/// A template factory constrained to a component's declared slot names.
pub struct TypedTemplate<'a> {
	def: &'a crate::accessor::SlotDef,
}

impl TypedTemplate<'_> {
	/// Starts a template wrapper targeting a declared slot.
	///
	/// Fails with [`SlotError::UnknownSlot`] for undeclared names.
	pub fn slot(&self, name: impl Into<Cow<'static, str>>) -> Result<TemplateSlot> {
		let name = name.into();
		if !self.def.declares(&name) {
			return Err(SlotError::UnknownSlot {
				name: name.into_owned(),
			});
		}
		Ok(Template::slot(name))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::content::Element;

	#[test]
	fn test_unannotated_child_targets_default() {
		let node = SlotNode::new("Add");
		assert_eq!(node.slot(), DEFAULT_SLOT);
	}

	#[test]
	fn test_annotated_child() {
		let node = SlotNode::annotated("rightIcon", Element::new("Icon"));
		assert_eq!(node.slot(), "rightIcon");
	}

	#[test]
	fn test_deferred_payload_realizes_with_props() {
		let node = SlotNode::deferred("title", |props| {
			Content::text(
				props
					.get("title")
					.and_then(|v| v.as_str())
					.unwrap_or("untitled")
					.to_string(),
			)
		});

		let SlotItem::Ordinary(payload) = node.item() else {
			panic!("expected ordinary item");
		};
		assert!(payload.is_deferred());

		let props = Props::new().with("title", "Details");
		assert_eq!(payload.realize(&props), Content::text("Details"));
	}

	#[test]
	fn test_value_payload_ignores_props() {
		let node = SlotNode::new("static");
		let SlotItem::Ordinary(payload) = node.item() else {
			panic!("expected ordinary item");
		};
		assert_eq!(
			payload.realize(&Props::new().with("unused", 1)),
			Content::text("static")
		);
	}

	#[test]
	fn test_forward_rejects_deferred_payload() {
		let binding =
			ForwardBinding::new().content(SlotNode::deferred(DEFAULT_SLOT, |_| Content::Empty));

		let err = SlotNode::forward("title", binding).unwrap_err();
		assert!(matches!(
			err,
			SlotError::InvalidForwardPayload { slot } if slot == "title"
		));
	}
}
