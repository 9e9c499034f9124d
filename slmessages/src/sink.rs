use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};

use crate::message::MessageRecord;
use crate::message_handler::MessageHandler;
use crate::sources::{
    CHANNEL_LOG_ERR, CHANNEL_LOG_INFO, CHANNEL_LOG_WARN, CHANNEL_MAP, CHANNEL_NAME, CHANNEL_TSTAMP,
};

/// What the capture has told us about one source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceInfo {
    pub name: Option<String>,
    pub channels: Vec<String>,
    pub last_timestamp: Option<u64>,
    pub messages: u64,
}

impl SourceInfo {
    pub fn channel_name(&self, channel: u8) -> Option<&str> {
        self.channels.get(channel as usize).map(String::as_str)
    }
}

/// Tracks per-source metadata as records pass through
///
/// Records are never altered: the sink only watches the shared channels
/// (name, channel map, timestamp) and relays the log channels to `tracing`.
#[derive(Debug, Default)]
pub struct MessageSink {
    sources: BTreeMap<u8, SourceInfo>,
}

impl MessageSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, source: u8) -> Option<&SourceInfo> {
        self.sources.get(&source)
    }

    /// Sources seen so far, by ascending ID
    pub fn sources(&self) -> impl Iterator<Item = (u8, &SourceInfo)> {
        self.sources.iter().map(|(id, info)| (*id, info))
    }

    fn label(&self, source: u8) -> String {
        match self.sources.get(&source).and_then(|s| s.name.as_deref()) {
            Some(name) => format!("{} (0x{:02x})", name, source),
            None => format!("0x{:02x}", source),
        }
    }
}

impl MessageHandler for MessageSink {
    fn handle_message(&mut self, record: &MessageRecord) {
        match record.channel {
            CHANNEL_LOG_INFO => info!(target: "messages", "{}: {}", self.label(record.source), record.data),
            CHANNEL_LOG_WARN => warn!(target: "messages", "{}: {}", self.label(record.source), record.data),
            CHANNEL_LOG_ERR => error!(target: "messages", "{}: {}", self.label(record.source), record.data),
            _ => {}
        }

        let info = self.sources.entry(record.source).or_default();
        info.messages += 1;

        match record.channel {
            CHANNEL_NAME => match record.data.as_text() {
                Some(name) => {
                    debug!("Source 0x{:02x} is named {:?}", record.source, name);
                    info.name = Some(name.to_owned());
                }
                None => debug!("Source 0x{:02x} sent a non-text name: {}", record.source, record.data),
            },
            CHANNEL_MAP => match record.data.as_string_array() {
                Some(channels) => {
                    debug!("Source 0x{:02x} channel map: {:?}", record.source, channels);
                    info.channels = channels;
                }
                None => debug!("Source 0x{:02x} sent a malformed channel map", record.source),
            },
            CHANNEL_TSTAMP => {
                if let Some(ts) = record.data.as_timestamp() {
                    debug!("Source 0x{:02x} timestamp {}", record.source, ts);
                    info.last_timestamp = Some(ts);
                }
            }
            _ => {}
        }
    }
}
