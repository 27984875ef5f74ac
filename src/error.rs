//! Error types for slot resolution

use thiserror::Error;

/// Error type for slot resolution and override application
#[derive(Debug, Error)]
pub enum SlotError {
	/// A strictly-enforced override was applied to a node outside its match set
	#[error("override expected {expected}, found {actual}")]
	StructuralMismatch {
		/// Human-readable description of the match set
		expected: String,
		/// Descriptor of the node that was actually present
		actual: String,
	},

	/// A deferred (pass-up prop) payload was bound through template forwarding
	#[error("slot `{slot}` cannot forward a deferred payload; bind a concrete value instead")]
	InvalidForwardPayload {
		/// The slot the binding targeted
		slot: String,
	},

	/// A slot name outside the component's declared set was accessed
	#[error("unknown slot: `{name}`")]
	UnknownSlot {
		/// The undeclared name
		name: String,
	},

	/// A slot name was declared more than once in one definition
	#[error("duplicate slot declaration: `{name}`")]
	DuplicateSlot {
		/// The repeated name
		name: String,
	},
}

/// Result type for slot resolution
pub type Result<T> = std::result::Result<T, SlotError>;
