//! Source and channel identifiers used by the logger
//!
//! Source IDs are best read as two hex digits: the first names the device
//! type, the second is free for a local device number. IDs `0x00..=0x0F` are
//! software sources. Channel IDs `0x00..=0x03` and the log channels are shared
//! by every source; the rest are source specific.

use std::ops::Range;

/// Messages generated by the logging software
pub const SOURCE_LOCAL: u8 = 0x00;
/// Messages generated by data conversion tools
pub const SOURCE_CONV: u8 = 0x01;
/// Local/software timers
pub const SOURCE_TIMER: u8 = 0x02;
pub const SOURCE_TEST1: u8 = 0x05;
pub const SOURCE_TEST2: u8 = 0x06;
pub const SOURCE_TEST3: u8 = 0x07;
/// GPS (or other satellite navigation) sources
pub const SOURCE_GPS: u8 = 0x10;
/// Generic analogue inputs
pub const SOURCE_ADC: u8 = 0x20;
/// NMEA 0183 bus
pub const SOURCE_NMEA: u8 = 0x30;
pub const SOURCE_I2C: u8 = 0x40;
/// External data recorded but not interpreted by the logger
pub const SOURCE_EXT: u8 = 0x60;
/// MessagePack devices returning single value channels (IMUs among them)
pub const SOURCE_MP: u8 = 0x70;

/// Block of source IDs allocated to GPS receivers
pub const GPS_SOURCES: Range<u8> = SOURCE_GPS..SOURCE_ADC;
/// Block of source IDs allocated to NMEA 0183 inputs
pub const NMEA_SOURCES: Range<u8> = SOURCE_NMEA..SOURCE_I2C;

/// Name of the source device
pub const CHANNEL_NAME: u8 = 0x00;
/// Channel name map (excludes log channels)
pub const CHANNEL_MAP: u8 = 0x01;
/// Source timestamp (milliseconds, arbitrary epoch)
pub const CHANNEL_TSTAMP: u8 = 0x02;
/// Raw device data
pub const CHANNEL_RAW: u8 = 0x03;
pub const CHANNEL_LOG_INFO: u8 = 0x7D;
pub const CHANNEL_LOG_WARN: u8 = 0x7E;
pub const CHANNEL_LOG_ERR: u8 = 0x7F;

/// Sync byte leading every record in a capture
pub const MESSAGE_MARKER: u8 = 0x55;
