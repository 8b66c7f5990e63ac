use std::io;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Font does not contain any supported character map")]
    MissingCharacterMap,
    #[error("Font does not provide a PostScript, full or family name")]
    MissingFontName,
    #[error("Error reading font or writing font data")]
    Io(#[from] io::Error),
}
