//! Slot definitions and the per-name accessor surface.
//!
//! A [`SlotDef`] is a component definition's declared slot set, built once
//! per definition. Resolving a child list against it runs the classifier
//! once and yields a [`ResolvedSlots`]: the per-name accessors plus the
//! read-only `has_slot` presence map. Slot names are an explicit, closed
//! set; accessing an undeclared name is an error rather than a silently
//! absent lookup.
//!
//! Resolution is pure: repeated calls with identical arguments within one
//! pass produce structurally identical output, and nothing is cached or
//! carried across passes.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::chain::{apply_chain, collect};
use crate::classify::{Buckets, classify};
use crate::content::Content;
use crate::error::{Result, SlotError};
use crate::forward::resolve_forward;
use crate::node::{DEFAULT_SLOT, SlotContent, SlotItem, SlotNode};
use crate::props::Props;

/// A component definition's declared slot names.
///
/// The reserved default slot is always declared, listed or not.
///
/// # Example
///
/// ```ignore
/// use quintette::{Props, SlotDef, SlotNode};
///
/// let def = SlotDef::new(["leftIcon", "rightIcon"])?;
/// let slots = def.resolve(vec![SlotNode::new("Add")]);
/// let body = slots.render("default", (), &Props::new())?;
/// ```
#[derive(Debug, Clone)]
pub struct SlotDef {
	names: Vec<Cow<'static, str>>,
}

impl SlotDef {
	/// Creates a definition from a list of slot names.
	///
	/// Fails with [`SlotError::DuplicateSlot`] when a name repeats.
	pub fn new<I, S>(names: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<Cow<'static, str>>,
	{
		let mut declared: Vec<Cow<'static, str>> = Vec::new();
		for name in names {
			let name = name.into();
			if declared.contains(&name) {
				return Err(SlotError::DuplicateSlot {
					name: name.into_owned(),
				});
			}
			declared.push(name);
		}
		if !declared.iter().any(|name| name == DEFAULT_SLOT) {
			declared.push(Cow::Borrowed(DEFAULT_SLOT));
		}
		Ok(Self { names: declared })
	}

	/// Returns whether a name is declared.
	pub fn declares(&self, name: &str) -> bool {
		self.names.iter().any(|declared| declared == name)
	}

	/// Iterates over the declared names.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.names.iter().map(Cow::as_ref)
	}

	/// Classifies a child list against this definition.
	///
	/// Children targeting undeclared names are silently dropped; their
	/// slots render fallback content instead.
	pub fn resolve(&self, children: impl Into<SlotContent>) -> ResolvedSlots<'_> {
		let mut buckets = Buckets::new();
		for (name, bucket) in classify(children) {
			if self.declares(&name) {
				buckets.insert(name, bucket);
			} else {
				tracing::debug!(
					"dropping {} child(ren) targeting undeclared slot `{}`",
					bucket.len(),
					name
				);
			}
		}

		let mut present = HashMap::new();
		for (name, bucket) in &buckets {
			if !collect(bucket).content.is_empty() {
				present.insert(name.clone(), true);
			}
		}

		ResolvedSlots {
			def: self,
			buckets,
			present,
		}
	}
}

/// A classified child list, ready for per-slot rendering.
pub struct ResolvedSlots<'d> {
	def: &'d SlotDef,
	buckets: Buckets,
	present: HashMap<Cow<'static, str>, bool>,
}

impl ResolvedSlots<'_> {
	/// Returns the accessor for a declared slot.
	pub fn slot(&self, name: &str) -> Result<SlotHandle<'_>> {
		let Some(declared) = self.def.names.iter().find(|declared| *declared == name) else {
			return Err(SlotError::UnknownSlot {
				name: name.to_string(),
			});
		};
		Ok(SlotHandle {
			name: declared.as_ref(),
			bucket: self.buckets.get(name).map(Vec::as_slice),
		})
	}

	/// Renders a declared slot directly, the call shape the syntax
	/// transform lowers slot-access expressions into.
	pub fn render(
		&self,
		name: &str,
		fallback: impl Into<SlotContent>,
		props: &Props,
	) -> Result<Content> {
		self.slot(name)?.render(fallback, props)
	}

	/// Returns whether a slot received caller content.
	///
	/// Bare override markers are instructions, not content; a bucket
	/// holding only markers reads as absent.
	pub fn has_slot(&self, name: &str) -> bool {
		self.present.get(name).copied().unwrap_or(false)
	}

	/// Returns the presence map: a slot name appears here only when it
	/// received caller content.
	pub fn has_slots(&self) -> &HashMap<Cow<'static, str>, bool> {
		&self.present
	}
}

/// The lazily-evaluated accessor for one slot occurrence.
#[derive(Debug, Clone, Copy)]
pub struct SlotHandle<'r> {
	name: &'r str,
	bucket: Option<&'r [SlotNode]>,
}

impl SlotHandle<'_> {
	/// Returns the slot name.
	pub fn name(&self) -> &str {
		self.name
	}

	/// Resolves the slot to renderable output.
	///
	/// When the bucket is empty the fallback declaration is the active
	/// content; otherwise the bucket's nodes are, in declaration order,
	/// with deferred payloads realized against `props`. The active content
	/// then runs through the override chain assembled from the markers of
	/// the same occurrence. Output shape: no nodes renders
	/// [`Content::Empty`], one node renders itself, several render a
	/// [`Content::Fragment`] in declaration order.
	pub fn render(&self, fallback: impl Into<SlotContent>, props: &Props) -> Result<Content> {
		let fallback = fallback.into();
		let declared = collect(fallback.nodes());
		let supplied = collect(self.bucket.unwrap_or_default());

		let (provided, forwarded) = realize_nodes(self.name, &supplied.content, props)?;

		let output = if !provided.is_empty() {
			// Provided path: the caller's markers run first, then the
			// declaration's. Markers wrapping fallback content stay scoped
			// to that fallback, except across a forward boundary, where
			// the declaration chain applies to the forwarded result as a
			// whole.
			let mut specs = supplied.all_specs();
			if forwarded {
				specs.extend(declared.all_specs());
			} else {
				specs.extend(declared.bare_specs());
			}
			apply_chain(&specs, provided)?
		} else {
			let (active, _) = realize_nodes(self.name, &declared.content, props)?;
			let mut specs = supplied.all_specs();
			specs.extend(declared.all_specs());
			apply_chain(&specs, active)?
		};

		Ok(shape(output))
	}
}

/// Realizes content nodes in order, resolving forward markers through the
/// merger. Returns the realized nodes and whether any forward contributed.
fn realize_nodes(slot: &str, nodes: &[&SlotNode], props: &Props) -> Result<(Vec<Content>, bool)> {
	let mut out = Vec::with_capacity(nodes.len());
	let mut forwarded = false;
	for node in nodes {
		match node.item() {
			SlotItem::Ordinary(payload) => out.push(payload.realize(props)),
			SlotItem::Forward(binding) => {
				if let Some(resolution) = resolve_forward(slot, binding)? {
					forwarded = true;
					out.extend(resolution.nodes);
				}
			}
			SlotItem::Override(_) => {}
		}
	}
	Ok((out, forwarded))
}

fn shape(mut nodes: Vec<Content>) -> Content {
	match nodes.len() {
		0 => Content::Empty,
		1 => nodes.remove(0),
		_ => Content::Fragment(nodes),
	}
}
