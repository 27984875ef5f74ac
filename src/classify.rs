//! Child classification: one pass over a component's top-level children,
//! assigning each to a named bucket.
//!
//! Routing rules, in order:
//!
//! - An explicit annotation (set by [`SlotNode::annotated`] or a template
//!   wrapper) routes the child to that bucket.
//! - An unannotated element carrying the reserved [`SLOT_PROP`] prop with a
//!   string value routes to that bucket, and the prop is stripped. A
//!   non-string value is inert: the child routes to the default bucket
//!   with the prop left in place.
//! - Everything else routes to the default bucket.
//!
//! Only top-level children participate; nested descendants are never
//! inspected. Multiple children may target one bucket, and declaration
//! order is preserved. Nothing fails here: a name no component declares
//! simply produces a bucket nobody reads.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;

use crate::content::Content;
use crate::node::{DEFAULT_SLOT, Payload, SLOT_PROP, SlotContent, SlotItem, SlotNode};

/// A mapping from slot name to its ordered bucket of children.
pub type Buckets = HashMap<Cow<'static, str>, Vec<SlotNode>>;

/// Partitions a child list into named buckets.
pub fn classify(children: impl Into<SlotContent>) -> Buckets {
	let mut buckets: Buckets = HashMap::new();

	for mut node in children.into().into_nodes() {
		let target = route(&mut node);
		node.set_slot(target.clone());
		buckets.entry(target).or_default().push(node);
	}

	for (name, bucket) in &buckets {
		advise_missing_keys(name, bucket);
	}

	buckets
}

/// Decides the bucket for one child, stripping a consumed annotation prop.
fn route(node: &mut SlotNode) -> Cow<'static, str> {
	if node.slot() != DEFAULT_SLOT {
		return Cow::Owned(node.slot().to_string());
	}

	if let SlotItem::Ordinary(Payload::Value(Content::Element(el))) = node.item_mut()
		&& matches!(el.props().get(SLOT_PROP), Some(Value::String(_)))
		&& let Some(Value::String(name)) = el.props_mut().remove(SLOT_PROP)
	{
		return Cow::Owned(name);
	}

	Cow::Borrowed(DEFAULT_SLOT)
}

/// Advisory for list-rendered children lacking a stable identity: repeated
/// element nodes in one bucket should carry keys so the host renderer can
/// track them across passes. Non-fatal; resolution continues.
fn advise_missing_keys(name: &str, bucket: &[SlotNode]) {
	let elements: Vec<&SlotNode> = bucket
		.iter()
		.filter(|node| {
			matches!(
				node.item(),
				SlotItem::Ordinary(Payload::Value(Content::Element(_)))
			)
		})
		.collect();

	if elements.len() < 2 {
		return;
	}

	let missing = elements
		.iter()
		.filter(|node| node.key().is_none() && node_content_key(node).is_none())
		.count();
	if missing > 0 {
		tracing::warn!(
			"slot `{}` holds {} repeated element children without a stable key",
			name,
			missing
		);
	}
}

fn node_content_key<'a>(node: &'a SlotNode) -> Option<&'a str> {
	match node.item() {
		SlotItem::Ordinary(Payload::Value(content)) => content.key(),
		_ => None,
	}
}
