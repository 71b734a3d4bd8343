//! A library for reading the MikuMikuDance VMD motion capture format.
//!
//! VMD files store the keyframes recorded against a model or the scene
//! camera: bone poses, morph (blend shape) weights, camera motion, and the
//! lighting, shadow, and IK toggles applied alongside them.
//!
//! # Getting Started
//! [vmd::Vmd] represents the root of the file
//! and is the only type that supports reading from files.
//!
//! ```rust no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let vmd = vmd_lib::vmd::Vmd::from_file("motion.vmd")?;
//! println!("{}", vmd.model_name);
//! println!("{} camera frames", vmd.camera_frames.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! vmd_lib parses the container in a single forward pass with no seeking
//! between sections. Every section is fully consumed even when callers
//! ignore its contents, so the cursor always lands exactly on the next
//! section boundary. Invalid input fails the whole parse and no partial
//! document is returned.
use std::{
    io::{Cursor, Read, Seek, SeekFrom},
    path::Path,
};

use binrw::{BinRead, BinReaderExt, BinResult, VecArgs};
use log::trace;

pub mod error;
pub mod vmd;

use error::ReadFileError;

/// Read a fixed width NUL padded Shift-JIS string of `len` bytes.
fn parse_shift_jis<R: Read + Seek>(
    reader: &mut R,
    _endian: binrw::Endian,
    (len,): (usize,),
) -> BinResult<String> {
    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes)?;

    // Some writers leave uninitialized bytes after the terminator.
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    let (decoded, _, _) = encoding_rs::SHIFT_JIS.decode(&bytes[..end]);
    Ok(decoded.into_owned())
}

/// Read a `u32` count followed by that many records,
/// or nothing at all when the reader ends exactly at the section boundary.
///
/// Files written before a section was added to the format
/// simply end at the previous section.
fn parse_trailing_count32<T, R>(
    reader: &mut R,
    endian: binrw::Endian,
    _args: (),
) -> BinResult<Vec<T>>
where
    for<'a> T: BinRead<Args<'a> = ()> + 'static,
    R: Read + Seek,
{
    let pos = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(pos))?;
    if pos == end {
        return Ok(Vec::new());
    }

    let count = u32::read_options(reader, endian, ())?;
    trace!("{}: {count} frames", std::any::type_name::<T>());

    Vec::<T>::read_options(
        reader,
        endian,
        VecArgs {
            count: count as usize,
            inner: (),
        },
    )
}

macro_rules! file_read_impl {
    ($($type_name:path),*) => {
        $(
            impl $type_name {
                pub fn read<R: Read + Seek>(reader: &mut R) -> BinResult<Self> {
                    reader.read_le().map_err(Into::into)
                }

                /// Read from `path` using a fully buffered reader for performance.
                pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadFileError> {
                    let path = path.as_ref();
                    std::fs::read(path)
                        .map_err(binrw::Error::Io)
                        .and_then(Self::from_bytes)
                        .map_err(|source| ReadFileError {
                            path: path.to_owned(),
                            source,
                        })
                }

                /// Read from `bytes` using a fully buffered reader for performance.
                pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> BinResult<Self> {
                    Self::read(&mut Cursor::new(bytes))
                }
            }
        )*
    };
}

file_read_impl!(vmd::Vmd);
