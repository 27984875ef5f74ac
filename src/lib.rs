//! # quintette
//!
//! Named-slot resolution, override chains, and template forwarding for
//! component views.
//!
//! A component exposes named insertion points ("slots") its caller fills
//! with content. This crate is the engine behind that surface: it
//! partitions a component's raw child list into named buckets, lazily
//! resolves each bucket against runtime props and fallback content,
//! applies ordered chains of declarative override transformations to
//! whatever content ends up active, and merges a caller's forwarded slot
//! declaration with the target component's own defaults and overrides.
//!
//! The engine is pure and synchronous: resolution is a side-effect-free
//! transformation from (children, props, fallbacks) to named renderable
//! outputs, rebuilt from scratch on every pass. Rendering the output tree
//! is the host framework's business, not this crate's.
//!
//! ## Example
//!
//! ```ignore
//! use quintette::{Element, Props, SlotDef, SlotNode};
//!
//! // A button component declaring two icon slots beside its default slot.
//! let def = SlotDef::new(["leftIcon", "rightIcon"])?;
//!
//! // The caller supplies a right icon and a label.
//! let slots = def.resolve(vec![
//! 	SlotNode::new(Element::new("Icon").prop("slot", "rightIcon")),
//! 	SlotNode::new("Add"),
//! ]);
//!
//! let props = Props::new();
//! let left = slots.render("leftIcon", (), &props)?;   // Content::Empty
//! let label = slots.render("default", (), &props)?;   // "Add"
//! let right = slots.render("rightIcon", (), &props)?; // the icon, annotation stripped
//! ```
//!
//! ## Modules
//!
//! - [`accessor`] - Slot definitions, resolution, and the per-name accessor
//! - [`classify`] - Child classification into named buckets
//! - [`chain`] - Override specs and chain application
//! - [`forward`] - Template forwarding ("template-as-slot") composition
//! - [`content`] - The content tree the engine rewrites
//! - [`node`] - Slot children, payloads, and the template factory
//! - [`props`] - Runtime props and prop merging
//! - [`callback`] - Cloneable pure-function wrappers
//! - [`error`] - Error taxonomy

pub mod accessor;
pub mod callback;
pub mod chain;
pub mod classify;
pub mod content;
pub mod error;
pub mod forward;
pub mod node;
pub mod props;

pub use accessor::{ResolvedSlots, SlotDef, SlotHandle};
pub use callback::{Callback, NodeTransform, PropTransform, RenderFn};
pub use chain::{Enforcement, Matcher, OverrideSpec};
pub use classify::{Buckets, classify};
pub use content::{Content, Element, IntoContent};
pub use error::{Result, SlotError};
pub use forward::ForwardBinding;
pub use node::{
	DEFAULT_SLOT, Payload, SLOT_PROP, SlotContent, SlotItem, SlotNode, Template, TemplateSlot,
	TypedTemplate,
};
pub use props::Props;
