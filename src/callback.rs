//! Callback types for deferred payloads and override transforms.
//!
//! All engine transformations are pure functions wrapped in `Arc` so they
//! are cheaply cloneable and stable across render passes.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::content::Content;
use crate::props::Props;

/// A type-safe, cloneable wrapper for a pure transformation function.
///
/// `Callback` wraps a function in an `Arc`, making it cheaply cloneable
/// while keeping the wrapped function itself immutable and shareable.
///
/// ## Type Parameters
///
/// - `Args`: the argument type the callback receives
/// - `Ret`: the return type of the callback (defaults to `()`)
pub struct Callback<Args, Ret = ()> {
	inner: Arc<dyn Fn(Args) -> Ret + Send + Sync + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + Send + Sync + 'static,
	{
		Self { inner: Arc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<closure>")
			.finish()
	}
}

/// A per-prop override transform: old value (`None` if absent) to new value.
pub type PropTransform = Callback<Option<Value>, Value>;

/// A whole-node override transform, replacing the matched node.
pub type NodeTransform = Callback<Content, Content>;

/// A deferred slot payload: a pure function from pass-up props to content.
///
/// Deferred payloads are realized by the slot accessor with the runtime
/// props of the resolving component.
pub struct RenderFn {
	inner: Arc<dyn Fn(&Props) -> Content + Send + Sync + 'static>,
}

impl RenderFn {
	/// Creates a new deferred payload from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Props) -> Content + Send + Sync + 'static,
	{
		Self { inner: Arc::new(f) }
	}

	/// Realizes the payload against the given runtime props.
	pub fn render(&self, props: &Props) -> Content {
		(self.inner)(props)
	}
}

impl Clone for RenderFn {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl fmt::Debug for RenderFn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RenderFn")
			.field("inner", &"<closure>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_callback_call() {
		let double: Callback<i32, i32> = Callback::new(|n| n * 2);
		assert_eq!(double.call(21), 42);
	}

	#[test]
	fn test_callback_clone_shares_function() {
		let upper: Callback<String, String> = Callback::new(|s: String| s.to_uppercase());
		let cloned = upper.clone();
		assert_eq!(cloned.call("abc".to_string()), "ABC");
	}

	#[test]
	fn test_render_fn_reads_props() {
		let greet = RenderFn::new(|props: &Props| {
			let name = props
				.get("name")
				.and_then(|v| v.as_str())
				.unwrap_or("world");
			Content::text(format!("Hello, {name}!"))
		});

		let props = Props::new().with("name", "slots");
		assert_eq!(greet.render(&props), Content::text("Hello, slots!"));
	}

	#[test]
	fn test_debug_hides_closure() {
		let cb: Callback<(), ()> = Callback::new(|_| {});
		assert!(format!("{cb:?}").contains("<closure>"));
	}
}
