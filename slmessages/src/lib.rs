//! Logger capture library
//!
//! Reads and writes the multiplexed MessagePack captures produced by the
//! data logger:
//! - Capture stream reader yielding one record at a time
//! - Capture writer for producing captures (synthetic ones included)
//! - Source and channel ID constants
//! - Message sink that follows per-source names, channel maps and timestamps
//! - Message handler trait for components consuming records
//!
//! # Example
//!
//! ```no_run
//! use slmessages::{MessageHandler, MessageSink, SlStreamReader};
//!
//! let mut sink = MessageSink::new();
//! for record in SlStreamReader::open("capture.dat")? {
//!     sink.handle_message(&record?);
//! }
//! for (id, source) in sink.sources() {
//!     println!("0x{:02x}: {:?} ({} messages)", id, source.name, source.messages);
//! }
//! # Ok::<(), slmessages::DecodeError>(())
//! ```

pub mod error;
pub mod message;
pub mod message_handler;
pub mod sink;
pub mod sources;
pub mod stream_reader;
pub mod writer;

// Re-export commonly used types
pub use error::DecodeError;
pub use message::{MessageData, MessageRecord};
pub use message_handler::MessageHandler;
pub use sink::{MessageSink, SourceInfo};
pub use stream_reader::SlStreamReader;
