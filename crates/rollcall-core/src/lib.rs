//! Core systems for Rollcall.
//!
//! This crate provides the foundational components shared by the Rollcall
//! selection toolkit:
//!
//! - **Signal/Slot System**: Type-safe change notification between the
//!   selection state machine and the views that render it
//! - **Cancellation**: Cooperative cancellation handles for in-flight
//!   asynchronous work (behind the `tokio` feature)
//!
//! # Signal/Slot Example
//!
//! ```
//! use rollcall_core::Signal;
//!
//! // Create a signal that notifies when a count changes
//! let count_changed = Signal::<usize>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = count_changed.connect(|count| {
//!     println!("Selected items: {}", count);
//! });
//!
//! // Emit the signal
//! count_changed.emit(42);
//!
//! // Disconnect when done
//! count_changed.disconnect(conn_id);
//! ```

pub mod signal;

#[cfg(feature = "tokio")]
pub mod cancel;

pub use signal::{ConnectionGuard, ConnectionId, Signal};

#[cfg(feature = "tokio")]
pub use cancel::{cancel_pair, CancelHandle, CancelToken};
