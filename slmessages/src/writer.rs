//! Capture writer
//!
//! Serialises records in the same `[0x55, source, channel, data]` layout the
//! stream reader consumes.

use std::io::{self, Write};

use rmp::encode;

use crate::message::{MessageData, MessageRecord};
use crate::sources::MESSAGE_MARKER;

/// Append one record to `wr`
pub fn write_record<W: Write>(wr: &mut W, record: &MessageRecord) -> io::Result<()> {
    encode::write_array_len(wr, 4)?;
    encode::write_uint(wr, MESSAGE_MARKER as u64)?;
    encode::write_uint(wr, record.source as u64)?;
    encode::write_uint(wr, record.channel as u64)?;
    write_data(wr, &record.data)
}

fn write_data<W: Write>(wr: &mut W, data: &MessageData) -> io::Result<()> {
    match data {
        MessageData::Bytes(bytes) => encode::write_bin(wr, bytes)?,
        MessageData::Text(text) => encode::write_str(wr, text)?,
        MessageData::Float(value) => encode::write_f64(wr, *value)?,
        MessageData::Unsigned(value) => {
            encode::write_uint(wr, *value)?;
        }
        MessageData::Signed(value) => {
            encode::write_sint(wr, *value)?;
        }
        MessageData::Bool(value) => encode::write_bool(wr, *value)?,
        MessageData::Array(items) => {
            encode::write_array_len(wr, items.len() as u32)?;
            for item in items {
                write_data(wr, item)?;
            }
        }
        MessageData::Nil => encode::write_nil(wr)?,
    }
    Ok(())
}

/// Serialise a sequence of records into an in-memory capture
pub fn to_capture<'a, I>(records: I) -> io::Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let mut buf = Vec::new();
    for record in records {
        write_record(&mut buf, record)?;
    }
    Ok(buf)
}
