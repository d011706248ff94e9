//! Magic-number detection of common file types.
//!
//! Only the leading bytes of a payload are inspected. Text formats without a
//! signature (HTML, JSON, JavaScript...) are not detected here; the filename
//! resolver falls back to the `Content-Type` for those.

const TAR_MAGIC_OFFSET: usize = 257;
const TAR_MAGIC: &[u8] = b"ustar";

/// A fixed byte sequence expected at a fixed offset.
struct Signature {
    offset: usize,
    magic: &'static [u8],
    ext: &'static str,
}

const fn sig(offset: usize, magic: &'static [u8], ext: &'static str) -> Signature {
    Signature { offset, magic, ext }
}

// Longer and more specific signatures come first.
const SIGNATURES: &[Signature] = &[
    // Archives and compressed streams.
    sig(0, b"PK\x03\x04", "zip"),
    sig(0, b"PK\x05\x06", "zip"),
    sig(0, b"PK\x07\x08", "zip"),
    sig(0, b"7z\xbc\xaf\x27\x1c", "7z"),
    sig(0, b"Rar!\x1a\x07", "rar"),
    sig(0, b"\xfd7zXZ\x00", "xz"),
    sig(0, b"\x1f\x8b\x08", "gz"),
    sig(0, b"BZh", "bz2"),
    sig(0, b"\x28\xb5\x2f\xfd", "zst"),
    sig(0, b"\x04\x22\x4d\x18", "lz4"),
    sig(0, b"LZIP", "lz"),
    sig(0, b"MSCF", "cab"),
    sig(0, b"!<arch>\ndebian-binary", "deb"),
    sig(0, b"!<arch>", "ar"),
    sig(0, b"\xed\xab\xee\xdb", "rpm"),
    sig(TAR_MAGIC_OFFSET, TAR_MAGIC, "tar"),
    // Documents.
    sig(0, b"%PDF", "pdf"),
    sig(0, b"%!", "ps"),
    sig(0, b"{\\rtf", "rtf"),
    sig(0, b"<?xml ", "xml"),
    sig(0, b"SQLite format 3\x00", "sqlite"),
    // Images.
    sig(0, b"\x89PNG\r\n\x1a\n", "png"),
    sig(0, b"\xff\xd8\xff", "jpg"),
    sig(0, b"GIF87a", "gif"),
    sig(0, b"GIF89a", "gif"),
    sig(0, b"8BPS", "psd"),
    sig(0, b"II\x2a\x00", "tif"),
    sig(0, b"MM\x00\x2a", "tif"),
    sig(0, b"\x00\x00\x01\x00", "ico"),
    sig(0, b"BM", "bmp"),
    // Audio and video.
    sig(0, b"fLaC", "flac"),
    sig(0, b"OggS", "ogg"),
    sig(0, b"ID3", "mp3"),
    sig(0, b"\xff\xfb", "mp3"),
    sig(0, b"MThd", "mid"),
    sig(0, b"FLV\x01", "flv"),
    sig(0, b"FWS", "swf"),
    sig(0, b"CWS", "swf"),
    // Fonts.
    sig(0, b"wOFF", "woff"),
    sig(0, b"wOF2", "woff2"),
    sig(0, b"OTTO", "otf"),
    sig(0, b"\x00\x01\x00\x00\x00", "ttf"),
    // Executables and bytecode.
    sig(0, b"\x00asm", "wasm"),
    sig(0, b"\x7fELF", "elf"),
    sig(0, b"\xca\xfe\xba\xbe", "class"),
    sig(0, b"MZ", "exe"),
];

/// Guess a file extension from the leading bytes of `bytes`.
///
/// Returns `None` when no known signature matches.
///
/// ```rust
/// use downl::sniff::extension_from_bytes;
///
/// assert_eq!(extension_from_bytes(b"PK\x03\x04rest-of-zip"), Some("zip"));
/// assert_eq!(extension_from_bytes(b"console.log(1)"), None);
/// ```
pub fn extension_from_bytes(bytes: &[u8]) -> Option<&'static str> {
    if let Some(ext) = riff_container(bytes)
        .or_else(|| iso_media(bytes))
        .or_else(|| matroska(bytes))
    {
        return Some(ext);
    }

    SIGNATURES
        .iter()
        .find(|s| matches_at(bytes, s.offset, s.magic))
        .map(|s| s.ext)
}

/// Check whether `magic` appears in `bytes` at `offset`.
pub(crate) fn matches_at(bytes: &[u8], offset: usize, magic: &[u8]) -> bool {
    bytes
        .get(offset..offset + magic.len())
        .is_some_and(|window| window == magic)
}

/// Whether the tar header magic sits at its usual place.
pub(crate) fn is_tar_header(bytes: &[u8]) -> bool {
    matches_at(bytes, TAR_MAGIC_OFFSET, TAR_MAGIC)
}

fn riff_container(bytes: &[u8]) -> Option<&'static str> {
    if !matches_at(bytes, 0, b"RIFF") {
        return None;
    }
    match bytes.get(8..12)? {
        b"WEBP" => Some("webp"),
        b"WAVE" => Some("wav"),
        b"AVI " => Some("avi"),
        _ => None,
    }
}

fn iso_media(bytes: &[u8]) -> Option<&'static str> {
    if !matches_at(bytes, 4, b"ftyp") {
        return None;
    }
    let brand = bytes.get(8..12)?;
    let ext = match brand {
        b"M4A " | b"M4B " => "m4a",
        b"qt  " => "mov",
        b"heic" | b"heix" | b"mif1" | b"msf1" => "heic",
        b"avif" => "avif",
        b"3gp4" | b"3gp5" | b"3gp6" => "3gp",
        _ => "mp4",
    };
    Some(ext)
}

fn matroska(bytes: &[u8]) -> Option<&'static str> {
    if !matches_at(bytes, 0, b"\x1a\x45\xdf\xa3") {
        return None;
    }
    let head = &bytes[..bytes.len().min(64)];
    if head.windows(4).any(|w| w == b"webm") {
        Some("webm")
    } else {
        Some("mkv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_archives() {
        assert_eq!(extension_from_bytes(b"PK\x03\x04\x14\x00"), Some("zip"));
        assert_eq!(extension_from_bytes(b"PK\x05\x06"), Some("zip"));
        assert_eq!(extension_from_bytes(b"\x1f\x8b\x08\x00"), Some("gz"));
        assert_eq!(extension_from_bytes(b"BZh91AY"), Some("bz2"));
        assert_eq!(extension_from_bytes(b"7z\xbc\xaf\x27\x1c\x00"), Some("7z"));
        assert_eq!(extension_from_bytes(b"!<arch>\ndebian-binary   "), Some("deb"));
        assert_eq!(extension_from_bytes(b"!<arch>\nfoo.o"), Some("ar"));
    }

    #[test]
    fn test_detects_tar_by_header_magic() {
        let mut header = vec![0u8; 512];
        header[257..262].copy_from_slice(b"ustar");
        assert_eq!(extension_from_bytes(&header), Some("tar"));
        assert!(is_tar_header(&header));
    }

    #[test]
    fn test_detects_media_containers() {
        assert_eq!(extension_from_bytes(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("webp"));
        assert_eq!(extension_from_bytes(b"RIFF\x00\x00\x00\x00WAVEfmt "), Some("wav"));
        assert_eq!(extension_from_bytes(b"\x00\x00\x00\x18ftypmp42"), Some("mp4"));
        assert_eq!(extension_from_bytes(b"\x00\x00\x00\x18ftypM4A "), Some("m4a"));
        assert_eq!(
            extension_from_bytes(b"\x1a\x45\xdf\xa3\x9f\x42\x86\x81\x01\x42\x82\x84webm"),
            Some("webm")
        );
    }

    #[test]
    fn test_unknown_riff_is_not_guessed() {
        assert_eq!(extension_from_bytes(b"RIFF\x00\x00\x00\x00XXXX"), None);
    }

    #[test]
    fn test_short_or_text_input() {
        assert_eq!(extension_from_bytes(b""), None);
        assert_eq!(extension_from_bytes(b"P"), None);
        assert_eq!(extension_from_bytes(b"export default function () {}"), None);
    }
}
