use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::trace;

use crate::error::DecodeError;
use crate::message::MessageRecord;

/// Capture stream reader
///
/// Decodes one MessagePack record per call to `next()`. A clean end of input
/// between two records ends the stream; anything else that stops a record from
/// decoding is reported once as a `DecodeError`, after which the reader is
/// exhausted.
///
/// # Usage
///
/// ```no_run
/// use slmessages::SlStreamReader;
///
/// let reader = SlStreamReader::open("capture.dat")?;
/// for record in reader {
///     let record = record?;
///     println!("{}", record);
/// }
/// # Ok::<(), slmessages::DecodeError>(())
/// ```
pub struct SlStreamReader<R> {
    reader: R,
    records_read: u64,
    finished: bool,
}

impl SlStreamReader<BufReader<File>> {
    /// Open a capture file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> SlStreamReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            records_read: 0,
            finished: false,
        }
    }

    /// Number of records decoded so far
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    fn at_end(&mut self) -> Result<bool, DecodeError> {
        Ok(self.reader.fill_buf()?.is_empty())
    }
}

impl<R: BufRead> Iterator for SlStreamReader<R> {
    type Item = Result<MessageRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.at_end() {
            Ok(true) => {
                self.finished = true;
                return None;
            }
            Ok(false) => {}
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        }

        match rmp_serde::from_read::<_, MessageRecord>(&mut self.reader) {
            Ok(record) => {
                self.records_read += 1;
                trace!("Decoded record #{}: {}", self.records_read - 1, record);
                Some(Ok(record))
            }
            Err(source) => {
                self.finished = true;
                Some(Err(DecodeError::Corrupt {
                    record: self.records_read,
                    source,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageData;
    use crate::writer::to_capture;

    fn sample_records() -> Vec<MessageRecord> {
        vec![
            MessageRecord::new(0x10, 0x00, MessageData::Text("GPS".to_string())),
            MessageRecord::bytes(0x10, 0x03, &[0xB5, 0x62, 0x01, 0x07, 0x5C, 0x00]),
            MessageRecord::new(0x30, 0x02, MessageData::Unsigned(123_456)),
            MessageRecord::new(0x30, 0x03, MessageData::Text("$GPGGA,1234".to_string())),
            MessageRecord::new(
                0x30,
                0x01,
                MessageData::Array(vec![
                    MessageData::Text("Name".to_string()),
                    MessageData::Text("Channels".to_string()),
                ]),
            ),
            MessageRecord::new(0x70, 0x04, MessageData::Float(-2.5)),
        ]
    }

    #[test]
    fn test_reads_all_records() {
        let records = sample_records();
        let capture = to_capture(&records).unwrap();

        let mut reader = SlStreamReader::new(&capture[..]);
        let decoded: Vec<MessageRecord> = reader.by_ref().map(|r| r.unwrap()).collect();
        assert_eq!(decoded, records);
        assert_eq!(reader.records_read(), records.len() as u64);
    }

    #[test]
    fn test_empty_capture() {
        let mut reader = SlStreamReader::new(&b""[..]);
        assert!(reader.next().is_none());
        assert_eq!(reader.records_read(), 0);
    }

    #[test]
    fn test_truncated_record_is_error() {
        let records = sample_records();
        let capture = to_capture(&records).unwrap();
        let truncated = &capture[..capture.len() - 3];

        let mut reader = SlStreamReader::new(truncated);
        let mut ok = 0;
        let mut errors = Vec::new();
        for item in reader.by_ref() {
            match item {
                Ok(_) => ok += 1,
                Err(e) => errors.push(e),
            }
        }
        assert_eq!(ok, records.len() - 1);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            DecodeError::Corrupt { record, .. } if *record == (records.len() - 1) as u64
        ));
        // Fused after the error
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_bad_marker_is_error() {
        // [0x56, 0x10, 0x03, bin "A"]
        let capture = [0x94, 0x56, 0x10, 0x03, 0xC4, 0x01, b'A'];
        let mut reader = SlStreamReader::new(&capture[..]);
        assert!(matches!(reader.next(), Some(Err(DecodeError::Corrupt { record: 0, .. }))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_wrong_shape_is_error() {
        // Three element array
        let capture = [0x93, 0x55, 0x10, 0x03];
        let mut reader = SlStreamReader::new(&capture[..]);
        assert!(matches!(reader.next(), Some(Err(DecodeError::Corrupt { .. }))));

        // Bare integer instead of an array
        let capture = [0x07];
        let mut reader = SlStreamReader::new(&capture[..]);
        assert!(matches!(reader.next(), Some(Err(DecodeError::Corrupt { .. }))));
    }

    #[test]
    fn test_invalid_utf8_string_becomes_bytes() {
        // str8 of length 2 holding invalid UTF-8
        let capture = [0x94, 0x55, 0x30, 0x03, 0xA2, 0xFF, 0xFE];
        let mut reader = SlStreamReader::new(&capture[..]);
        let record = reader.next().unwrap().unwrap();
        assert_eq!(record.data, MessageData::Bytes(vec![0xFF, 0xFE]));
    }

    #[test]
    fn test_reads_from_file() {
        let records = sample_records();
        let capture = to_capture(&records).unwrap();
        let path = std::env::temp_dir().join(format!("slmessages-reader-{}.dat", std::process::id()));
        std::fs::write(&path, &capture).unwrap();

        let reader = SlStreamReader::open(&path).unwrap();
        let decoded: Vec<MessageRecord> = reader.map(|r| r.unwrap()).collect();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_missing_file() {
        let result = SlStreamReader::open("/nonexistent/capture.dat");
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }
}
