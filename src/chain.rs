//! Override chain engine.
//!
//! An [`OverrideSpec`] is one declarative transformation unit: a set of
//! matchers a node must satisfy, an enforcement mode for mismatches, and
//! either prop transforms or a whole-node transform applied on match. A
//! chain of specs is applied left-to-right in declaration order, each
//! spec's output feeding the next spec's input, independently per node.
//!
//! Markers may wrap child content. Wrapped content acts as the slot's
//! fallback and is only rendered when the caller supplied nothing.

use std::fmt;

use serde_json::Value;

use crate::callback::{NodeTransform, PropTransform};
use crate::content::Content;
use crate::error::{Result, SlotError};
use crate::node::{SlotContent, SlotItem, SlotNode};

/// A type matcher an input node must satisfy.
///
/// Matchers are explicit enumerable tags compared by value; matching never
/// introspects the node beyond its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
	/// Matches an element or component node by name.
	Element(std::borrow::Cow<'static, str>),
	/// Matches a text node.
	Text,
	/// Matches a numeric node.
	Number,
}

impl Matcher {
	/// Creates an element matcher.
	pub fn element(name: impl Into<std::borrow::Cow<'static, str>>) -> Self {
		Matcher::Element(name.into())
	}

	/// Returns whether the matcher accepts the given node.
	pub fn matches(&self, content: &Content) -> bool {
		match (self, content) {
			(Matcher::Element(name), Content::Element(el)) => el.name() == name.as_ref(),
			(Matcher::Text, Content::Text(_)) => true,
			(Matcher::Number, Content::Number(_)) => true,
			_ => false,
		}
	}
}

impl fmt::Display for Matcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Matcher::Element(name) => write!(f, "element `{name}`"),
			Matcher::Text => write!(f, "string"),
			Matcher::Number => write!(f, "number"),
		}
	}
}

/// How a spec treats a node outside its match set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Enforcement {
	/// A mismatch is an error for the whole resolution pass.
	#[default]
	Strict,
	/// A mismatch passes the node through unchanged.
	Permissive,
}

/// One transformation unit of an override chain.
///
/// An empty match set accepts every node, so a spec with only transforms
/// applies unconditionally.
#[derive(Clone, Default)]
pub struct OverrideSpec {
	match_set: Vec<Matcher>,
	enforcement: Enforcement,
	prop_transforms: Vec<(String, PropTransform)>,
	node_transform: Option<NodeTransform>,
	wrapped: Vec<SlotNode>,
}

impl OverrideSpec {
	/// Creates an empty spec.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a matcher to the match set.
	pub fn allow(mut self, matcher: Matcher) -> Self {
		self.match_set.push(matcher);
		self
	}

	/// Adds an element matcher to the match set.
	pub fn allow_element(self, name: impl Into<std::borrow::Cow<'static, str>>) -> Self {
		self.allow(Matcher::element(name))
	}

	/// Adds a text matcher to the match set.
	pub fn allow_text(self) -> Self {
		self.allow(Matcher::Text)
	}

	/// Adds a numeric matcher to the match set.
	pub fn allow_number(self) -> Self {
		self.allow(Matcher::Number)
	}

	/// Sets the enforcement mode.
	pub fn enforce(mut self, enforcement: Enforcement) -> Self {
		self.enforcement = enforcement;
		self
	}

	/// Sets permissive enforcement (mismatches pass through untouched).
	pub fn permissive(self) -> Self {
		self.enforce(Enforcement::Permissive)
	}

	/// Adds a prop transform applied on match.
	///
	/// The transform receives the old value (`None` when the prop is
	/// absent) and produces the new value. Props the spec does not name
	/// are left untouched.
	pub fn prop<F>(mut self, name: impl Into<String>, f: F) -> Self
	where
		F: Fn(Option<Value>) -> Value + Send + Sync + 'static,
	{
		self.prop_transforms.push((name.into(), PropTransform::new(f)));
		self
	}

	/// Sets a whole-node transform applied on match.
	///
	/// Takes precedence over prop transforms.
	pub fn replace<F>(mut self, f: F) -> Self
	where
		F: Fn(Content) -> Content + Send + Sync + 'static,
	{
		self.node_transform = Some(NodeTransform::new(f));
		self
	}

	/// Wraps fallback content inside the marker.
	///
	/// Wrapped content is rendered only when the slot's bucket received no
	/// caller content.
	pub fn wrap(mut self, content: impl Into<SlotContent>) -> Self {
		self.wrapped = content.into().into_nodes();
		self
	}

	/// Returns the wrapped fallback content.
	pub fn wrapped(&self) -> &[SlotNode] {
		&self.wrapped
	}

	/// Returns the enforcement mode.
	pub fn enforcement(&self) -> Enforcement {
		self.enforcement
	}

	/// Returns the match set.
	pub fn match_set(&self) -> &[Matcher] {
		&self.match_set
	}

	/// Applies the spec to one node.
	pub fn apply(&self, node: Content) -> Result<Content> {
		let matched = self.match_set.is_empty() || self.match_set.iter().any(|m| m.matches(&node));
		if !matched {
			return match self.enforcement {
				Enforcement::Strict => Err(SlotError::StructuralMismatch {
					expected: self.expected_description(),
					actual: node.descriptor(),
				}),
				Enforcement::Permissive => Ok(node),
			};
		}

		if let Some(transform) = &self.node_transform {
			return Ok(transform.call(node));
		}

		match node {
			Content::Element(mut el) => {
				for (name, transform) in &self.prop_transforms {
					let old = el.props().get(name).cloned();
					el.props_mut().set(name.clone(), transform.call(old));
				}
				Ok(Content::Element(el))
			}
			// Prop transforms only make sense on elements.
			other => Ok(other),
		}
	}

	fn expected_description(&self) -> String {
		if self.match_set.is_empty() {
			return "any node".to_string();
		}
		self.match_set
			.iter()
			.map(Matcher::to_string)
			.collect::<Vec<_>>()
			.join(" | ")
	}
}

impl fmt::Debug for OverrideSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OverrideSpec")
			.field("match_set", &self.match_set)
			.field("enforcement", &self.enforcement)
			.field(
				"prop_transforms",
				&self
					.prop_transforms
					.iter()
					.map(|(name, _)| name.as_str())
					.collect::<Vec<_>>(),
			)
			.field(
				"node_transform",
				&self.node_transform.as_ref().map(|_| "<closure>"),
			)
			.field("wrapped", &self.wrapped)
			.finish()
	}
}

/// A spec collected from a marker, with its wrapping role.
pub(crate) struct CollectedSpec<'a> {
	pub(crate) spec: &'a OverrideSpec,
	/// Whether the marker's wrapped subtree holds any content node.
	pub(crate) wraps_content: bool,
}

/// The markers and content nodes found at the top level of a child list.
///
/// Markers contribute their specs in declaration order, outer before inner
/// for nested markers; ordinary and forward nodes contribute content in
/// the same order.
#[derive(Default)]
pub(crate) struct ChainParts<'a> {
	pub(crate) specs: Vec<CollectedSpec<'a>>,
	pub(crate) content: Vec<&'a SlotNode>,
}

impl<'a> ChainParts<'a> {
	/// Returns every collected spec.
	pub(crate) fn all_specs(&self) -> Vec<&'a OverrideSpec> {
		self.specs.iter().map(|c| c.spec).collect()
	}

	/// Returns the specs whose markers wrap no content of their own.
	pub(crate) fn bare_specs(&self) -> Vec<&'a OverrideSpec> {
		self.specs
			.iter()
			.filter(|c| !c.wraps_content)
			.map(|c| c.spec)
			.collect()
	}
}

/// Walks a child list, collecting override specs and content nodes.
pub(crate) fn collect(nodes: &[SlotNode]) -> ChainParts<'_> {
	let mut parts = ChainParts::default();
	walk(nodes, &mut parts);
	parts
}

fn walk<'a>(nodes: &'a [SlotNode], parts: &mut ChainParts<'a>) -> bool {
	let mut found_content = false;
	for node in nodes {
		match node.item() {
			SlotItem::Ordinary(_) | SlotItem::Forward(_) => {
				parts.content.push(node);
				found_content = true;
			}
			SlotItem::Override(spec) => {
				let index = parts.specs.len();
				parts.specs.push(CollectedSpec {
					spec,
					wraps_content: false,
				});
				let wrapped = walk(spec.wrapped(), parts);
				parts.specs[index].wraps_content = wrapped;
				found_content |= wrapped;
			}
		}
	}
	found_content
}

/// Applies a chain of specs to each node independently, left-to-right.
pub(crate) fn apply_chain(specs: &[&OverrideSpec], nodes: Vec<Content>) -> Result<Vec<Content>> {
	nodes
		.into_iter()
		.map(|node| specs.iter().try_fold(node, |acc, spec| spec.apply(acc)))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::content::Element;
	use crate::content::IntoContent;
	use rstest::rstest;

	#[rstest]
	fn test_matcher_matches_by_tag() {
		let button = Element::new("button").child("Trigger").into_content();
		assert!(Matcher::element("button").matches(&button));
		assert!(!Matcher::element("a").matches(&button));
		assert!(Matcher::Text.matches(&Content::text("x")));
		assert!(Matcher::Number.matches(&Content::number(1.0)));
		assert!(!Matcher::Text.matches(&button));
	}

	#[rstest]
	fn test_strict_mismatch_names_both_sides() {
		let spec = OverrideSpec::new().allow_text().allow_element("button");

		let err = spec.apply(Element::new("a").into_content()).unwrap_err();
		let message = err.to_string();
		assert!(message.contains("string | element `button`"));
		assert!(message.contains("element `a`"));
	}

	#[rstest]
	fn test_permissive_mismatch_is_identity() {
		let spec = OverrideSpec::new()
			.allow_text()
			.permissive()
			.prop("id", |_| "changed".into());

		let input = Element::new("button").prop("id", "orig").into_content();
		assert_eq!(spec.apply(input.clone()).unwrap(), input);
	}

	#[rstest]
	fn test_prop_transform_sees_absent_prop_as_none() {
		let spec = OverrideSpec::new().allow_element("button").prop("id", |old| {
			assert!(old.is_none());
			"fresh".into()
		});

		let out = spec.apply(Element::new("button").into_content()).unwrap();
		let Content::Element(el) = out else {
			panic!("expected element");
		};
		assert_eq!(el.props().get("id"), Some(&Value::String("fresh".into())));
	}

	#[rstest]
	fn test_node_transform_takes_precedence() {
		let spec = OverrideSpec::new()
			.allow_element("button")
			.prop("id", |_| "ignored".into())
			.replace(|_| Content::text("replaced"));

		let out = spec.apply(Element::new("button").into_content()).unwrap();
		assert_eq!(out, Content::text("replaced"));
	}

	#[rstest]
	fn test_empty_match_set_accepts_everything() {
		let spec = OverrideSpec::new().replace(|_| Content::text("always"));
		assert_eq!(spec.apply(Content::number(3.0)).unwrap(), Content::text("always"));
	}

	#[rstest]
	fn test_chain_applies_left_to_right() {
		let first = OverrideSpec::new().prop("id", |_| "one".into());
		let second = OverrideSpec::new().prop("id", |old| {
			let old = old.and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default();
			format!("{old} two").into()
		});

		let out = apply_chain(
			&[&first, &second],
			vec![Element::new("button").into_content()],
		)
		.unwrap();

		let Content::Element(el) = &out[0] else {
			panic!("expected element");
		};
		assert_eq!(el.props().get("id"), Some(&Value::String("one two".into())));
	}

	#[rstest]
	fn test_collect_orders_nested_specs_outer_first() {
		let inner = OverrideSpec::new().allow_element("button").wrap("Trigger");
		let outer = OverrideSpec::new().allow_text().wrap(inner);

		let nodes = vec![SlotNode::override_marker(outer)];
		let parts = collect(&nodes);

		assert_eq!(parts.specs.len(), 2);
		assert_eq!(parts.specs[0].spec.match_set(), &[Matcher::Text]);
		assert_eq!(
			parts.specs[1].spec.match_set(),
			&[Matcher::element("button")]
		);
		assert_eq!(parts.content.len(), 1);
	}

	#[rstest]
	fn test_collect_flags_wrapping_markers() {
		let wrapping = OverrideSpec::new().wrap("fallback");
		let bare = OverrideSpec::new();

		let nodes = vec![
			SlotNode::override_marker(wrapping),
			SlotNode::override_marker(bare),
		];
		let parts = collect(&nodes);

		assert!(parts.specs[0].wraps_content);
		assert!(!parts.specs[1].wraps_content);
		assert_eq!(parts.bare_specs().len(), 1);
		assert_eq!(parts.all_specs().len(), 2);
	}
}
