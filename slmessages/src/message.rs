use std::fmt;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, SeqAccess, Visitor};

use crate::sources::MESSAGE_MARKER;

fn format_data_bytes(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Payload carried by a record
#[derive(Debug, Clone, PartialEq)]
pub enum MessageData {
    Bytes(Vec<u8>),
    Text(String),
    Float(f64),
    Unsigned(u64),
    Signed(i64),
    Bool(bool),
    Array(Vec<MessageData>),
    Nil,
}

impl MessageData {
    /// Raw bytes of a binary or string payload, `None` for everything else
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            MessageData::Bytes(bytes) => Some(bytes.as_slice()),
            MessageData::Text(text) => Some(text.as_bytes()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageData::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Timestamps are written as unsigned integers, but tolerate signed ones
    pub fn as_timestamp(&self) -> Option<u64> {
        match self {
            MessageData::Unsigned(value) => Some(*value),
            MessageData::Signed(value) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Array of strings, as used for channel name maps
    pub fn as_string_array(&self) -> Option<Vec<String>> {
        match self {
            MessageData::Array(items) => items
                .iter()
                .map(|item| item.as_text().map(str::to_owned))
                .collect(),
            _ => None,
        }
    }
}

impl fmt::Display for MessageData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MessageData::Bytes(bytes) => write!(f, "[{}]", format_data_bytes(bytes)),
            MessageData::Text(text) => write!(f, "{:?}", text),
            MessageData::Float(value) => write!(f, "{}", value),
            MessageData::Unsigned(value) => write!(f, "{}", value),
            MessageData::Signed(value) => write!(f, "{}", value),
            MessageData::Bool(value) => write!(f, "{}", value),
            MessageData::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            MessageData::Nil => write!(f, "nil"),
        }
    }
}

struct MessageDataVisitor;

impl<'de> Visitor<'de> for MessageDataVisitor {
    type Value = MessageData;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a binary, string, numeric, boolean, nil or array payload")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MessageData, E> {
        Ok(MessageData::Bool(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MessageData, E> {
        Ok(MessageData::Unsigned(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MessageData, E> {
        Ok(MessageData::Signed(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MessageData, E> {
        Ok(MessageData::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MessageData, E> {
        Ok(MessageData::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<MessageData, E> {
        Ok(MessageData::Text(v))
    }

    // Invalid UTF-8 strings are handed over as bytes by the decoder
    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<MessageData, E> {
        Ok(MessageData::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<MessageData, E> {
        Ok(MessageData::Bytes(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<MessageData, E> {
        Ok(MessageData::Nil)
    }

    fn visit_none<E: de::Error>(self) -> Result<MessageData, E> {
        Ok(MessageData::Nil)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<MessageData, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(MessageData::Array(items))
    }
}

impl<'de> Deserialize<'de> for MessageData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MessageDataVisitor)
    }
}

/// A single record from a capture
///
/// `source` identifies the acquisition source instance, `channel` the role of
/// the record relative to that source.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    pub source: u8,
    pub channel: u8,
    pub data: MessageData,
}

impl MessageRecord {
    pub fn new(source: u8, channel: u8, data: MessageData) -> Self {
        Self { source, channel, data }
    }

    pub fn bytes(source: u8, channel: u8, payload: &[u8]) -> Self {
        Self::new(source, channel, MessageData::Bytes(payload.to_vec()))
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.data.as_bytes()
    }
}

impl fmt::Display for MessageRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:02x}:0x{:02x} {}", self.source, self.channel, self.data)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = MessageRecord;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a four element array [0x55, source, channel, data]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<MessageRecord, A::Error> {
        let marker: u8 = match seq.next_element()? {
            Some(marker) => marker,
            None => return Err(de::Error::invalid_length(0, &self)),
        };
        if marker != MESSAGE_MARKER {
            return Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(marker as u64),
                &"sync marker 0x55",
            ));
        }
        let source: u8 = match seq.next_element()? {
            Some(source) => source,
            None => return Err(de::Error::invalid_length(1, &self)),
        };
        let channel: u8 = match seq.next_element()? {
            Some(channel) => channel,
            None => return Err(de::Error::invalid_length(2, &self)),
        };
        let data: MessageData = match seq.next_element()? {
            Some(data) => data,
            None => return Err(de::Error::invalid_length(3, &self)),
        };
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(5, &self));
        }
        Ok(MessageRecord { source, channel, data })
    }
}

impl<'de> Deserialize<'de> for MessageRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_of_bytes_and_text() {
        let record = MessageRecord::bytes(0x10, 3, &[0xB5, 0x62, 0x01, 0x07]);
        assert_eq!(record.payload(), Some(&[0xB5, 0x62, 0x01, 0x07][..]));

        let record = MessageRecord::new(0x30, 3, MessageData::Text("$GPGGA".to_string()));
        assert_eq!(record.payload(), Some(&b"$GPGGA"[..]));
    }

    #[test]
    fn test_non_byte_payload_has_no_bytes() {
        assert_eq!(MessageData::Float(1.5).as_bytes(), None);
        assert_eq!(MessageData::Unsigned(7).as_bytes(), None);
        assert_eq!(MessageData::Nil.as_bytes(), None);
        assert_eq!(MessageData::Array(vec![]).as_bytes(), None);
    }

    #[test]
    fn test_string_array() {
        let data = MessageData::Array(vec![
            MessageData::Text("Name".to_string()),
            MessageData::Text("Channels".to_string()),
        ]);
        assert_eq!(
            data.as_string_array(),
            Some(vec!["Name".to_string(), "Channels".to_string()])
        );

        let mixed = MessageData::Array(vec![MessageData::Text("a".to_string()), MessageData::Unsigned(1)]);
        assert_eq!(mixed.as_string_array(), None);
    }

    #[test]
    fn test_timestamp() {
        assert_eq!(MessageData::Unsigned(1234).as_timestamp(), Some(1234));
        assert_eq!(MessageData::Signed(55).as_timestamp(), Some(55));
        assert_eq!(MessageData::Signed(-1).as_timestamp(), None);
        assert_eq!(MessageData::Float(1.0).as_timestamp(), None);
    }

    #[test]
    fn test_display() {
        let record = MessageRecord::bytes(0x10, 3, &[0x01, 0xAB]);
        assert_eq!(record.to_string(), "0x10:0x03 [01 AB]");
    }
}
