//! Template forwarding: binding a caller's own slot content into a nested
//! component's slot while preserving that component's independent defaults
//! and overrides.
//!
//! A [`ForwardBinding`] carries the caller's side of the composition: its
//! bucket content for the forwarded slot, the props both sides attached,
//! and the caller's fallback declaration (which may hold the caller's
//! override chain as wrapping markers). The callee's fallback and chain
//! arrive through the callee's own accessor invocation.
//!
//! Merge rules:
//!
//! 1. Props: callee defaults overlaid by caller props; the caller wins on
//!    collision.
//! 2. Content cascade: caller bucket content, else caller fallback, else
//!    the callee's own fallback.
//! 3. Chain order: content from the caller side runs the caller's chain
//!    first, then the callee's chain over the result; content from the
//!    callee's own fallback runs the callee's chain only.
//!
//! A binding whose content holds a deferred payload is rejected: the merge
//! step cannot decide which side's runtime props the function should see.

use crate::chain::{apply_chain, collect};
use crate::content::Content;
use crate::error::{Result, SlotError};
use crate::node::{Payload, SlotContent, SlotItem, SlotNode};
use crate::props::Props;

/// The caller's side of a template-as-slot composition.
#[derive(Debug, Clone, Default)]
pub struct ForwardBinding {
	content: Vec<SlotNode>,
	caller_props: Props,
	callee_default_props: Props,
	caller_fallback: Vec<SlotNode>,
}

impl ForwardBinding {
	/// Creates an empty binding.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the caller's bucket content for the forwarded slot.
	pub fn content(mut self, content: impl Into<SlotContent>) -> Self {
		self.content = content.into().into_nodes();
		self
	}

	/// Sets the props the caller attaches to the binding.
	pub fn caller_props(mut self, props: Props) -> Self {
		self.caller_props = props;
		self
	}

	/// Sets the props the callee would have supplied on its own.
	pub fn callee_default_props(mut self, props: Props) -> Self {
		self.callee_default_props = props;
		self
	}

	/// Sets the caller's fallback declaration, markers included.
	pub fn caller_fallback(mut self, content: impl Into<SlotContent>) -> Self {
		self.caller_fallback = content.into().into_nodes();
		self
	}

	/// Returns the caller's bucket content.
	pub fn content_nodes(&self) -> &[SlotNode] {
		&self.content
	}

	/// Returns the caller's fallback declaration.
	pub fn caller_fallback_nodes(&self) -> &[SlotNode] {
		&self.caller_fallback
	}

	/// Returns the merged props of the binding: callee defaults overlaid
	/// by caller props, caller winning on collision.
	pub fn merged_props(&self) -> Props {
		self.callee_default_props.merged(&self.caller_props)
	}

	/// Returns whether any payload inside the binding is deferred.
	pub fn has_deferred_payload(&self) -> bool {
		nodes_have_deferred(&self.content) || nodes_have_deferred(&self.caller_fallback)
	}
}

fn nodes_have_deferred(nodes: &[SlotNode]) -> bool {
	nodes.iter().any(|node| match node.item() {
		SlotItem::Ordinary(Payload::Deferred(_)) => true,
		SlotItem::Ordinary(Payload::Value(_)) => false,
		SlotItem::Override(spec) => nodes_have_deferred(spec.wrapped()),
		SlotItem::Forward(binding) => binding.has_deferred_payload(),
	})
}

/// The caller side of a forwarded slot, resolved.
#[derive(Debug)]
pub(crate) struct ForwardResolution {
	/// Caller content with the caller's chain already applied.
	pub(crate) nodes: Vec<Content>,
}

/// Resolves the caller side of a binding.
///
/// Returns `Ok(None)` when the caller supplied nothing and declared no
/// fallback, in which case the callee's own fallback (and only the
/// callee's chain) takes over.
pub(crate) fn resolve_forward(slot: &str, binding: &ForwardBinding) -> Result<Option<ForwardResolution>> {
	if binding.has_deferred_payload() {
		return Err(SlotError::InvalidForwardPayload {
			slot: slot.to_string(),
		});
	}

	let props = binding.merged_props();
	let provided = collect(binding.content_nodes());
	let declared = collect(binding.caller_fallback_nodes());

	let (active, specs) = if !provided.content.is_empty() {
		// Caller-side provided path: markers among the caller's content
		// first, then the bare markers of the caller's declaration.
		let mut specs = provided.all_specs();
		specs.extend(declared.bare_specs());
		(&provided.content, specs)
	} else if !declared.content.is_empty() {
		(&declared.content, declared.all_specs())
	} else {
		return Ok(None);
	};

	let mut realized = Vec::with_capacity(active.len());
	for node in active {
		match node.item() {
			SlotItem::Ordinary(payload) => realized.push(payload.realize(&props)),
			SlotItem::Forward(inner) => {
				if let Some(resolution) = resolve_forward(slot, inner)? {
					realized.extend(resolution.nodes);
				}
			}
			SlotItem::Override(_) => {}
		}
	}

	let nodes = apply_chain(&specs, realized)?;
	Ok(Some(ForwardResolution { nodes }))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::chain::OverrideSpec;
	use crate::content::Element;
	use serde_json::Value;

	fn id_suffix(suffix: &'static str) -> OverrideSpec {
		OverrideSpec::new().prop("id", move |old| {
			let old = old
				.and_then(|v| v.as_str().map(str::to_string))
				.unwrap_or_default();
			format!("{old} {suffix}").into()
		})
	}

	#[test]
	fn test_merged_props_are_caller_biased() {
		let binding = ForwardBinding::new()
			.caller_props(Props::new().with("variant", "caller"))
			.callee_default_props(Props::new().with("variant", "callee").with("size", "sm"));

		let merged = binding.merged_props();
		assert_eq!(merged.get("variant"), Some(&Value::String("caller".into())));
		assert_eq!(merged.get("size"), Some(&Value::String("sm".into())));
	}

	#[test]
	fn test_provided_content_wins_over_fallbacks() {
		let binding = ForwardBinding::new()
			.content(SlotNode::new("provided"))
			.caller_fallback(SlotContent::from("caller fallback"));

		let resolution = resolve_forward("body", &binding).unwrap().unwrap();
		assert_eq!(resolution.nodes, vec![Content::text("provided")]);
	}

	#[test]
	fn test_caller_fallback_used_when_nothing_provided() {
		let binding = ForwardBinding::new().caller_fallback(SlotContent::from("caller fallback"));

		let resolution = resolve_forward("body", &binding).unwrap().unwrap();
		assert_eq!(resolution.nodes, vec![Content::text("caller fallback")]);
	}

	#[test]
	fn test_empty_binding_defers_to_callee() {
		let binding = ForwardBinding::new();
		assert!(resolve_forward("body", &binding).unwrap().is_none());
	}

	#[test]
	fn test_caller_chain_applies_to_caller_fallback() {
		let fallback = Element::new("span")
			.prop("id", "fallback-id")
			.child("Parent's fallback");
		let binding = ForwardBinding::new()
			.caller_fallback(SlotContent::from(id_suffix("parent-added").wrap(fallback)));

		let resolution = resolve_forward("body", &binding).unwrap().unwrap();
		let Content::Element(el) = &resolution.nodes[0] else {
			panic!("expected element");
		};
		assert_eq!(
			el.props().get("id"),
			Some(&Value::String("fallback-id parent-added".into()))
		);
	}

	#[test]
	fn test_deferred_payload_is_rejected_at_merge() {
		let binding = ForwardBinding::new()
			.caller_fallback(SlotNode::deferred("x", |_| Content::Empty));

		let err = resolve_forward("title", &binding).unwrap_err();
		assert!(matches!(
			err,
			SlotError::InvalidForwardPayload { slot } if slot == "title"
		));
	}
}
