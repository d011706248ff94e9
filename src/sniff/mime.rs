//! `Content-Type` to extension mapping.
//!
//! Every MIME type lists all the extensions it is commonly registered
//! with. When a type has several candidates there is no reliable way to pick
//! one, so [`extension_from_mime`] gives up instead of guessing.

const MIME_EXTENSIONS: &[(&str, &[&str])] = &[
    // Archives.
    ("application/zip", &["zip"]),
    ("application/x-zip-compressed", &["zip"]),
    ("application/gzip", &["gz"]),
    ("application/x-gzip", &["gz"]),
    ("application/x-tar", &["tar"]),
    ("application/x-bzip2", &["bz2"]),
    ("application/x-xz", &["xz"]),
    ("application/x-7z-compressed", &["7z"]),
    ("application/vnd.rar", &["rar"]),
    ("application/x-rar-compressed", &["rar"]),
    ("application/zstd", &["zst"]),
    ("application/vnd.debian.binary-package", &["deb"]),
    ("application/x-rpm", &["rpm"]),
    ("application/java-archive", &["jar", "war", "ear"]),
    // Documents.
    ("application/pdf", &["pdf"]),
    ("application/rtf", &["rtf"]),
    ("application/postscript", &["ai", "eps", "ps"]),
    ("application/msword", &["doc", "dot"]),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        &["docx"],
    ),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &["xlsx"],
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        &["pptx"],
    ),
    ("application/vnd.ms-excel", &["xls", "xlm", "xla", "xlc", "xlt", "xlw"]),
    ("application/epub+zip", &["epub"]),
    ("application/x-sqlite3", &["sqlite"]),
    // Text and code.
    ("text/plain", &["txt", "text", "conf", "def", "list", "log", "in", "ini"]),
    ("text/html", &["html", "htm", "shtml"]),
    ("text/css", &["css"]),
    ("text/csv", &["csv"]),
    ("text/markdown", &["md", "markdown"]),
    ("text/xml", &["xml"]),
    ("application/xml", &["xml", "xsl", "xsd", "rng"]),
    ("text/javascript", &["js", "mjs"]),
    ("application/javascript", &["js", "mjs"]),
    ("application/json", &["json", "map"]),
    ("application/ld+json", &["jsonld"]),
    ("application/x-yaml", &["yaml", "yml"]),
    ("application/toml", &["toml"]),
    ("application/wasm", &["wasm"]),
    // Images.
    ("image/png", &["png"]),
    ("image/jpeg", &["jpeg", "jpg", "jpe"]),
    ("image/gif", &["gif"]),
    ("image/webp", &["webp"]),
    ("image/bmp", &["bmp"]),
    ("image/svg+xml", &["svg", "svgz"]),
    ("image/tiff", &["tif", "tiff"]),
    ("image/x-icon", &["ico"]),
    ("image/vnd.microsoft.icon", &["ico"]),
    ("image/avif", &["avif"]),
    ("image/heic", &["heic"]),
    ("image/vnd.adobe.photoshop", &["psd"]),
    // Audio and video.
    ("audio/mpeg", &["mpga", "mp2", "mp2a", "mp3", "m2a", "m3a"]),
    ("audio/ogg", &["oga", "ogg", "spx", "opus"]),
    ("audio/flac", &["flac"]),
    ("audio/wav", &["wav"]),
    ("audio/x-wav", &["wav"]),
    ("audio/midi", &["mid", "midi", "kar", "rmi"]),
    ("video/mp4", &["mp4", "mp4v", "mpg4"]),
    ("video/webm", &["webm"]),
    ("video/x-matroska", &["mkv", "mk3d", "mks"]),
    ("video/quicktime", &["qt", "mov"]),
    ("video/x-msvideo", &["avi"]),
    ("video/x-flv", &["flv"]),
    // Fonts.
    ("font/woff", &["woff"]),
    ("font/woff2", &["woff2"]),
    ("font/ttf", &["ttf"]),
    ("font/otf", &["otf"]),
    // Binaries.
    (
        "application/octet-stream",
        &[
            "bin", "dms", "lrf", "mar", "so", "dist", "distz", "pkg", "bpk", "dump", "elc",
            "deploy", "exe", "dll", "deb", "dmg", "iso", "img", "msi", "msp", "msm", "buffer",
        ],
    ),
    ("application/x-msdownload", &["exe", "dll", "com", "bat", "msi"]),
    ("application/java-vm", &["class"]),
];

/// Normalise a `Content-Type` header value to its bare, lowercase essence.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// All extensions registered for the MIME type in `content_type`.
///
/// Parameters such as `charset` are ignored. Unknown types yield an empty
/// slice.
pub fn extensions_for_mime(content_type: &str) -> &'static [&'static str] {
    let mime = essence(content_type);
    MIME_EXTENSIONS
        .iter()
        .find(|(name, _)| *name == mime)
        .map(|(_, exts)| *exts)
        .unwrap_or(&[])
}

/// The single extension registered for `content_type`.
///
/// Returns `None` when the type is unknown or maps to more than one
/// extension.
pub fn extension_from_mime(content_type: &str) -> Option<&'static str> {
    match extensions_for_mime(content_type) {
        [ext] => Some(*ext),
        _ => None,
    }
}
