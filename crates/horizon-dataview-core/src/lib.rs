//! Core systems for Horizon Dataview.
//!
//! This crate provides the foundational component of the Horizon Dataview
//! engine:
//!
//! - **Signal/Slot System**: Type-safe change notification, used by the view
//!   controller and the selection model to report state changes to whatever
//!   rendering layer hosts them
//!
//! Unlike a full GUI framework there is no event loop here: the data-view
//! engine is synchronous, so signal emission always invokes connected slots
//! directly in the emitting thread.
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_dataview_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
