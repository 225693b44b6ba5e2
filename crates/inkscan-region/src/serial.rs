//! Compact binary serialization for ConnectedComponent
//!
//! # Format
//!
//! ```text
//! [width - 1: u8] [height - 1: u8]
//! ( [row offset: u8] [column offset: u8] [count: u8] )*
//! [255: u8]
//! ```
//!
//! Offsets are relative to the top-left corner of the bounding box.  Every
//! value is truncated to a byte, so a component must be at most 256
//! pixels wide and at most 255 rows tall to survive a round trip: a run on
//! row offset 255 reads as the sentinel, ending the component early and
//! leaving the rest of its bytes in the stream.  Larger components are
//! written anyway, with a warning.
//!
//! Reading restarts the box at (0, 0): a decoded component lives in
//! local coordinates.

use std::io::{Read, Write};

use inkscan_core::BoundBox;
use tracing::warn;

use crate::conncomp::ConnectedComponent;
use crate::error::RegionResult;
use crate::runlength::RunLength;

/// Byte terminating the run list
const SENTINEL: u8 = 255;

/// Largest width that fits the format
pub const MAX_SERIAL_EXTENT: i32 = 256;

/// Largest height that fits the format; row offset 255 is the sentinel
pub const MAX_SERIAL_HEIGHT: i32 = 255;

impl ConnectedComponent {
    /// Write the component to a writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - Destination stream; nothing else is written to it
    ///
    /// # Errors
    ///
    /// Only errors from `writer` are returned.  A component wider than
    /// [`MAX_SERIAL_EXTENT`] or taller than [`MAX_SERIAL_HEIGHT`] is still
    /// written, after a warning, and will not read back intact.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> RegionResult<()> {
        if self.width() > MAX_SERIAL_EXTENT || self.height() > MAX_SERIAL_HEIGHT {
            warn!(
                width = self.width(),
                height = self.height(),
                max_width = MAX_SERIAL_EXTENT,
                max_height = MAX_SERIAL_HEIGHT,
                "component too large for the byte format, it will not read back intact"
            );
        }
        let left = self.bounds.left;
        let top = self.bounds.top;
        writer.write_all(&[(self.width() - 1) as u8, (self.height() - 1) as u8])?;
        for run in &self.runs {
            writer.write_all(&[
                (run.row() - top) as u8,
                (run.start() - left) as u8,
                run.count() as u8,
            ])?;
        }
        writer.write_all(&[SENTINEL])?;
        Ok(())
    }

    /// Write the component to bytes.
    pub fn write_to_bytes(&self) -> RegionResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(3 + 3 * self.runs.len());
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }

    /// Read a component from a reader.
    ///
    /// Reads run triples until the sentinel byte.  A stream that ends
    /// first fails with the reader's `UnexpectedEof` error.
    pub fn read_from_reader(reader: &mut impl Read) -> RegionResult<Self> {
        let mut header = [0u8; 2];
        reader.read_exact(&mut header)?;
        let mut cc = ConnectedComponent::with_bounds(BoundBox::new(
            0,
            header[0] as i32,
            0,
            header[1] as i32,
        ));
        loop {
            let mut row = [0u8; 1];
            reader.read_exact(&mut row)?;
            if row[0] == SENTINEL {
                break;
            }
            let mut rest = [0u8; 2];
            reader.read_exact(&mut rest)?;
            cc.push_run(RunLength::new_unchecked(
                row[0] as i32,
                rest[0] as i32,
                rest[1] as i32,
            ));
        }
        Ok(cc)
    }

    /// Read a component from bytes.
    pub fn read_from_bytes(data: &[u8]) -> RegionResult<Self> {
        let mut reader = data;
        Self::read_from_reader(&mut reader)
    }
}
