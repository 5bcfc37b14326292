#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;

pub const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape" "#,
    r#"xmlns:v="urn:schemas-microsoft-com:vml" "#,
    r#"xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml" "#,
    r#"xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006""#,
);

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="xml" ContentType="application/xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A complete `w:document` part around `body`.
pub fn document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NAMESPACES}><w:body>{body}</w:body></w:document>"#
    )
}

/// A header part holding `body`.
pub fn header(body: &str) -> String {
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:hdr {NAMESPACES}>{body}</w:hdr>"#)
}

/// Zips `parts` after the package boilerplate. Entries are stored uncompressed so
/// tests can find and damage their bytes.
pub fn package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let boilerplate = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
    ];
    for (name, content) in boilerplate.iter().chain(parts) {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// A package whose only content part is `word/document.xml` with `body`.
pub fn docx(body: &str) -> Vec<u8> {
    package(&[("word/document.xml", &document(body))])
}

/// Flips the last byte of the first occurrence of `marker`, breaking that entry's CRC.
pub fn corrupt(mut bytes: Vec<u8>, marker: &str) -> Vec<u8> {
    let marker = marker.as_bytes();
    let at = bytes
        .windows(marker.len())
        .position(|w| w == marker)
        .expect("marker not found in archive");
    bytes[at + marker.len() - 1] ^= 0x01;
    bytes
}

pub fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
}

pub fn styled_paragraph(text: &str, rpr: &str) -> String {
    format!("<w:p><w:r><w:rPr>{rpr}</w:rPr><w:t>{text}</w:t></w:r></w:p>")
}

pub fn picture(blip: &str) -> String {
    format!(
        r#"<w:p><w:r><w:drawing><wp:inline>
            <wp:extent cx="1800000" cy="900000"/>
            <wp:docPr id="1" name="Picture"/>
            <a:graphic><a:graphicData><pic:pic>
                <pic:nvPicPr><pic:cNvPr id="0" name="photo.png"/></pic:nvPicPr>
                <pic:blipFill>{blip}</pic:blipFill>
                <pic:spPr/>
            </pic:pic></a:graphicData></a:graphic>
        </wp:inline></w:drawing></w:r></w:p>"#
    )
}

pub fn modern_word_art(text: &str) -> String {
    format!(
        r#"<w:p><w:r><w:rPr>
            <w:rFonts w:ascii="Impact"/><w:sz w:val="72"/>
            <w14:textOutline w14:w="9525"><w14:solidFill><w14:srgbClr w14:val="FF0000"/></w14:solidFill></w14:textOutline>
            <w14:textEffect w14:val="glow" w14:fillColor="00FF00" w14:kern="250"/>
        </w:rPr><w:t>{text}</w:t></w:r></w:p>"#
    )
}

pub fn intermediate_word_art(text: &str) -> String {
    format!(
        r#"<w:p><w:r><w:drawing><wp:anchor>
            <wp:extent cx="3600000" cy="720000"/>
            <a:graphic><a:graphicData><wps:wsp>
                <wps:spPr><a:xfrm rot="600000"/><a:solidFill><a:srgbClr val="0000FF"/></a:solidFill></wps:spPr>
                <wps:txbx><w:txbxContent>
                    <w:p><w:r><w:rPr><w:rFonts w:ascii="Arial Black"/><w:sz w:val="48"/></w:rPr><w:t>{text}</w:t></w:r></w:p>
                </w:txbxContent></wps:txbx>
                <wps:bodyPr><a:prstTxWarp prst="textArchUp"/></wps:bodyPr>
            </wps:wsp></a:graphicData></a:graphic>
        </wp:anchor></w:drawing></w:r></w:p>"#
    )
}

pub fn legacy_word_art(text: &str) -> String {
    format!(
        r##"<w:p><w:r><w:pict>
            <v:shape type="#_x0000_t136" fillcolor="#ff9900" strokecolor="black">
                <v:textpath style="font-family:&quot;Georgia&quot;;font-size:40pt" string="{text}"/>
            </v:shape>
        </w:pict></w:r></w:p>"##
    )
}
