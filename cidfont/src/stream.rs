use miniz_oxide::deflate::compress_to_vec_zlib;
use serde::Serialize;

const COMPRESSION_LEVEL: u8 = 6;

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub enum Filter {
    FlateDecode,
}

/// Entries of the dictionary of a stream.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
#[serde(rename = "")]
pub struct StreamMeta {
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Length of an embedded TrueType font program before it was compressed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length1: Option<usize>,
}

/// The content of a stream object that is part of an embedded font (the font program or its
/// ToUnicode CMap), optionally zlib compressed.
#[derive(Debug, PartialEq, Clone)]
pub struct FontStream {
    data: Vec<u8>,
    filter: Option<Filter>,
    length1: Option<usize>,
}

impl FontStream {
    pub(crate) fn new(data: Vec<u8>, compress: bool) -> Self {
        if compress {
            FontStream {
                data: compress_to_vec_zlib(&data, COMPRESSION_LEVEL),
                filter: Some(Filter::FlateDecode),
                length1: None,
            }
        } else {
            FontStream {
                data,
                filter: None,
                length1: None,
            }
        }
    }

    /// A stream holding a TrueType font program, which records its uncompressed length.
    pub(crate) fn font_file(data: Vec<u8>, compress: bool) -> Self {
        let length1 = data.len();
        FontStream {
            length1: Some(length1),
            ..FontStream::new(data, compress)
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn is_compressed(&self) -> bool {
        self.filter.is_some()
    }

    pub fn meta(&self) -> StreamMeta {
        StreamMeta {
            length: self.data.len(),
            filter: self.filter,
            length1: self.length1,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use miniz_oxide::inflate::decompress_to_vec_zlib;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_uncompressed() {
        let stream = FontStream::font_file(b"font data".to_vec(), false);
        assert_eq!(stream.data(), b"font data");
        assert!(!stream.is_compressed());
        assert_eq!(
            serde_json::to_value(stream.meta()).unwrap(),
            serde_json::json!({ "Length": 9, "Length1": 9 })
        );
    }

    #[test]
    fn test_compressed() {
        let data = b"begincmap endcmap ".repeat(20);
        let stream = FontStream::new(data.clone(), true);
        assert!(stream.is_compressed());
        assert!(stream.data().len() < data.len());
        assert_eq!(decompress_to_vec_zlib(stream.data()).unwrap(), data);
        assert_eq!(
            serde_json::to_value(stream.meta()).unwrap(),
            serde_json::json!({ "Length": stream.data().len(), "Filter": "FlateDecode" })
        );
    }
}
