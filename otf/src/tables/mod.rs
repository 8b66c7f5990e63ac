pub mod cmap;
pub mod glyf;
pub mod head;
pub mod hhea;
pub mod hmtx;
pub mod kern;
pub mod loca;
pub mod maxp;
pub mod name;
pub mod os2;
pub mod post;

use std::io::{self, Cursor};

/// A structure that can be decoded from a big-endian font data blob. `UnpackDep` carries values
/// of previously decoded tables the structure depends upon (e.g. `hmtx` needs `hhea` and `maxp`).
pub trait FontData<'a>: Sized {
    type UnpackDep;

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, dep: Self::UnpackDep)
        -> Result<Self, io::Error>;
}

/// A top-level font table, identified by its tag inside the table directory.
pub trait FontTable<'a>: FontData<'a> {
    fn name() -> &'static str;
}

pub(crate) fn error(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

pub(crate) fn skip<R: AsRef<[u8]>>(rd: &mut Cursor<R>, n: u64) {
    rd.set_position(rd.position() + n);
}
