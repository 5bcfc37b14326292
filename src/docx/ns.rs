//! XML namespaces used by the part parsers.

pub(crate) const WML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const DML: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const WPD: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub(crate) const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
pub(crate) const REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const WPS: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingShape";
pub(crate) const VML: &str = "urn:schemas-microsoft-com:vml";
pub(crate) const W14: &str = "http://schemas.microsoft.com/office/word/2010/wordml";
pub(crate) const MC: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";

/// Short prefix -> namespace URI, in the order the prefixes conventionally appear
/// on `w:document`.
pub const PREFIXES: &[(&str, &str)] = &[
    ("w", WML),
    ("a", DML),
    ("wp", WPD),
    ("pic", PIC),
    ("r", REL),
    ("wps", WPS),
    ("v", VML),
    ("w14", W14),
    ("mc", MC),
];

pub fn uri(prefix: &str) -> Option<&'static str> {
    PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
}

pub fn prefix(uri: &str) -> Option<&'static str> {
    PREFIXES
        .iter()
        .find(|(_, u)| *u == uri)
        .map(|(p, _)| *p)
}
