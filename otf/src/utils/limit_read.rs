use std::io::{self, Cursor};

/// A read-only window over the next `limit` bytes of a cursor. Creating the window advances the
/// wrapped cursor past those bytes, so reading can continue right after the window.
pub struct LimitRead<'a> {
    data: &'a [u8],
}

impl<'a> LimitRead<'a> {
    pub fn from_cursor<R: AsRef<[u8]>>(
        cursor: &'a mut Cursor<R>,
        limit: usize,
    ) -> Result<Self, io::Error> {
        let start = cursor.position() as usize;
        let len = cursor.get_ref().as_ref().len();
        if start > len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Cannot read {} bytes at offset {}", limit, start),
            ));
        }

        // some fonts report slightly too large lengths for their last table
        let end = start.saturating_add(limit).min(len);
        cursor.set_position(end as u64);

        let cursor: &'a Cursor<R> = cursor;
        Ok(LimitRead {
            data: &cursor.get_ref().as_ref()[start..end],
        })
    }
}

impl<'a> AsRef<[u8]> for LimitRead<'a> {
    fn as_ref(&self) -> &[u8] {
        self.data
    }
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, Read};

    use super::*;

    #[test]
    fn limit_read() {
        let data = "foobar".as_bytes().to_vec();
        let mut cursor = Cursor::new(data);
        cursor.set_position(1);
        let mut rd = Cursor::new(LimitRead::from_cursor(&mut cursor, 3).unwrap());

        let mut buf = [0; 2];
        assert_eq!((rd.read(&mut buf).unwrap(), &buf), (2, b"oo"));
        assert_eq!((rd.read(&mut buf).unwrap(), &buf[..1]), (1, &b"b"[..]));
        assert_eq!(rd.read(&mut buf).unwrap(), 0);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn limit_read_clamps_to_available_data() {
        let mut cursor = Cursor::new(b"foobar".to_vec());
        cursor.set_position(4);
        let window = LimitRead::from_cursor(&mut cursor, 10).unwrap();
        assert_eq!(window.as_ref(), b"ar");
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn limit_read_out_of_bounds() {
        let mut cursor = Cursor::new(b"foo".to_vec());
        cursor.set_position(5);
        assert!(LimitRead::from_cursor(&mut cursor, 1).is_err());
    }
}
