//! # Events Module
//!
//! Event-driven progress reporting.
//!
//! ## Design
//! The core engine emits events through channels, allowing any UI
//! (CLI, GUI, web) to subscribe and display progress.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! // In a separate thread, listen for events
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Hash(HashEvent::Progress(p)) => {
//!                 println!("Hashed {}/{}", p.completed, p.total)
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! // Run detection with the sender
//! detector.find_duplicates_with_events(&root, mode, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
