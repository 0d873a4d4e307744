//! SwipeKit Stroke Tracker
//!
//! Accumulates the raw pointer points of a single contact into a decimated
//! stroke, decides when the motion qualifies as the start of a swipe-style
//! gesture, and releases the sampled path to a downstream recognizer in
//! exactly-once batches — incrementally while the contact is still down, or
//! all at once when it lifts.
//!
//! The crate is pure computation with no I/O and no platform dependencies;
//! point times are milliseconds on whatever clock the caller's event
//! pipeline uses.

pub mod batch;
pub mod stroke;

pub use batch::{PointerBuffer, PointerSink};
pub use stroke::{has_recognition_time_past, GestureStroke, DEFAULT_CAPACITY};
