use crate::error::SkipReason;
use crate::model::{
    Diagnostic, DiagnosticKind, DrawingImage, Image, ImageFlag, ImageKind, ImageMetadata, VmlImage,
};
use crate::units::percent_to_ratio;

use super::drawing::{css_declarations, vml_color};
use super::effects::interpret_effects;
use super::{
    DML, PIC, REL, VML, WML, WPD, descendant, in_fallback, is_element, parse_geometry,
    parse_position,
};

/// DrawingML pictures and VML image shapes, in document order.
///
/// A drawing without a `a:blip` is not a picture and is passed over silently. A picture
/// whose reference is missing is reported and omitted; the images after it are still read.
pub(super) fn parse_images(
    source: &str,
    root: roxmltree::Node,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Image> {
    let mut images = Vec::new();

    for node in root.descendants().filter(|n| n.is_element() && !in_fallback(*n)) {
        let parsed = if is_element(node, WML, "drawing") {
            parse_drawing(node)
        } else if is_element(node, WML, "pict") {
            parse_pict(node)
        } else {
            continue;
        };

        match parsed {
            Ok(Some((relationship_id, kind, flags))) => images.push(Image {
                source: source.to_string(),
                index: images.len() + 1,
                relationship_id,
                kind,
                flags,
            }),
            Ok(None) => {}
            Err(reason) => {
                log::warn!("{source}: skipping image: {reason}");
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::ElementSkipped,
                    source: Some(source.to_string()),
                    message: format!("image skipped: {reason}"),
                });
            }
        }
    }

    images
}

type Parsed = Option<(String, ImageKind, Vec<ImageFlag>)>;

fn parse_drawing(drawing: roxmltree::Node) -> Result<Parsed, SkipReason> {
    // Pictures inside a nested text box belong to their own w:drawing.
    let Some(blip) = drawing.descendants().find(|n| {
        is_element(*n, DML, "blip")
            && !in_fallback(*n)
            && n.ancestors().find(|a| is_element(*a, WML, "drawing")) == Some(drawing)
    }) else {
        return Ok(None);
    };
    let relationship_id = blip
        .attribute((REL, "embed"))
        .or_else(|| blip.attribute((REL, "link")))
        .filter(|id| !id.is_empty())
        .ok_or(SkipReason::MissingRelationshipId("a:blip"))?
        .to_string();

    let properties = descendant(drawing, PIC, "cNvPr").or_else(|| descendant(drawing, WPD, "docPr"));
    let text_attr = |name: &str| {
        properties
            .and_then(|p| p.attribute(name))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let transparency = blip
        .children()
        .find(|n| is_element(*n, DML, "alphaModFix") || is_element(*n, DML, "alphaMod"))
        .and_then(|n| n.attribute("amt"))
        .and_then(percent_to_ratio);

    let geometry = parse_geometry(drawing);

    let mut flags = Vec::new();
    if descendant(drawing, DML, "srcRect").is_some_and(|r| r.attributes().next().is_some()) {
        flags.push(ImageFlag::Cropped);
    }
    if geometry.rotation_deg.is_some_and(|r| r != 0.0) {
        flags.push(ImageFlag::Rotated);
    }
    if descendant(drawing, DML, "effectLst").is_some() {
        flags.push(ImageFlag::HasEffects);
    }
    if descendant(drawing, WPD, "cNvGraphicFramePr").is_some() {
        flags.push(ImageFlag::HasTextFrame);
    }

    let image = DrawingImage {
        geometry,
        position: parse_position(drawing),
        metadata: ImageMetadata {
            name: text_attr("name"),
            description: text_attr("descr"),
            title: text_attr("title"),
            transparency,
        },
        effects: interpret_effects(drawing),
    };
    Ok(Some((relationship_id, ImageKind::Modern(image), flags)))
}

fn parse_pict(pict: roxmltree::Node) -> Result<Parsed, SkipReason> {
    let Some(shape) = descendant(pict, VML, "shape") else {
        return Ok(None);
    };
    let Some(image_data) = descendant(shape, VML, "imagedata") else {
        return Ok(None);
    };
    let relationship_id = image_data
        .attribute((REL, "id"))
        .filter(|id| !id.is_empty())
        .ok_or(SkipReason::MissingRelationshipId("v:imagedata"))?
        .to_string();

    let style = css_declarations(shape.attribute("style").unwrap_or(""));
    let lookup = |key: &str| {
        style
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    let image = VmlImage {
        width: lookup("width"),
        height: lookup("height"),
        coord_size: shape.attribute("coordsize").map(str::to_string),
        fill_color: shape.attribute("fillcolor").and_then(vml_color),
        stroke_color: shape.attribute("strokecolor").and_then(vml_color),
        stroke_weight: shape.attribute("strokeweight").map(str::to_string),
        style,
    };

    let mut flags = Vec::new();
    if image.style.iter().any(|(k, _)| k == "rotation") {
        flags.push(ImageFlag::HasRotation);
    }
    if image.fill_color.is_some() {
        flags.push(ImageFlag::HasFill);
    }
    if image.stroke_color.is_some() {
        flags.push(ImageFlag::HasStroke);
    }

    Ok(Some((relationship_id, ImageKind::Legacy(image), flags)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
        xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"
        xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
        xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"
        xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
        xmlns:v="urn:schemas-microsoft-com:vml""#;

    fn images(body: &str) -> (Vec<Image>, Vec<Diagnostic>) {
        let xml = format!(r#"<w:document {NS}><w:body>{body}</w:body></w:document>"#);
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let mut diagnostics = Vec::new();
        let out = parse_images("word/document.xml", doc.root_element(), &mut diagnostics);
        (out, diagnostics)
    }

    fn picture(blip: &str) -> String {
        format!(
            r#"<w:p><w:r><w:drawing><wp:inline>
                <wp:extent cx="720000" cy="360000"/>
                <wp:docPr id="1" name="Picture 1"/>
                <a:graphic><a:graphicData><pic:pic>
                    <pic:nvPicPr><pic:cNvPr id="0" name="logo.png" descr="Company logo"/></pic:nvPicPr>
                    <pic:blipFill>{blip}<a:srcRect l="1000"/></pic:blipFill>
                    <pic:spPr><a:xfrm rot="1800000"/>
                        <a:effectLst><a:softEdge rad="63500"/></a:effectLst></pic:spPr>
                </pic:pic></a:graphicData></a:graphic>
            </wp:inline></w:drawing></w:r></w:p>"#
        )
    }

    #[test]
    fn modern_picture() {
        let (imgs, diagnostics) =
            images(&picture(r#"<a:blip r:embed="rId5"><a:alphaModFix amt="50000"/></a:blip>"#));
        assert!(diagnostics.is_empty());
        assert_eq!(imgs.len(), 1);
        let img = &imgs[0];
        assert_eq!(img.relationship_id, "rId5");
        let ImageKind::Modern(d) = &img.kind else {
            panic!("expected DrawingML image");
        };
        assert_eq!(d.geometry.width_cm, Some(2.0));
        assert_eq!(d.geometry.height_cm, Some(1.0));
        assert_eq!(d.geometry.rotation_deg, Some(30.0));
        assert_eq!(d.metadata.name.as_deref(), Some("logo.png"));
        assert_eq!(d.metadata.description.as_deref(), Some("Company logo"));
        assert_eq!(d.metadata.transparency, Some(0.5));
        assert_eq!(d.effects.soft_edge.as_ref().unwrap().radius_pt, Some(5.0));
        assert_eq!(
            img.flags,
            vec![ImageFlag::Cropped, ImageFlag::Rotated, ImageFlag::HasEffects]
        );
    }

    #[test]
    fn malformed_picture_does_not_stop_the_rest() {
        let body = [
            picture(r#"<a:blip r:embed="rId1"/>"#),
            picture(r#"<a:blip/>"#),
            picture(r#"<a:blip r:embed="rId3"/>"#),
        ]
        .concat();
        let (imgs, diagnostics) = images(&body);
        assert_eq!(imgs.len(), 2);
        assert_eq!(imgs[1].relationship_id, "rId3");
        assert_eq!(imgs[1].index, 2);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ElementSkipped);
    }

    #[test]
    fn drawing_without_blip_is_not_an_image() {
        let (imgs, diagnostics) =
            images(r#"<w:p><w:r><w:drawing><wp:inline><wp:extent cx="1" cy="1"/></wp:inline></w:drawing></w:r></w:p>"#);
        assert!(imgs.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn legacy_vml_image() {
        let (imgs, _) = images(
            r##"<w:p><w:r><w:pict><v:shape style="width:100pt;height:50pt;rotation:45"
                    coordsize="21600,21600" fillcolor="#00ff00" strokeweight="1pt">
                <v:imagedata r:id="rId9"/>
            </v:shape></w:pict></w:r></w:p>"##,
        );
        assert_eq!(imgs.len(), 1);
        let ImageKind::Legacy(vml) = &imgs[0].kind else {
            panic!("expected VML image");
        };
        assert_eq!(vml.width.as_deref(), Some("100pt"));
        assert_eq!(vml.height.as_deref(), Some("50pt"));
        assert_eq!(vml.coord_size.as_deref(), Some("21600,21600"));
        assert_eq!(vml.fill_color.as_deref(), Some("#00FF00"));
        assert_eq!(vml.stroke_weight.as_deref(), Some("1pt"));
        assert_eq!(imgs[0].flags, vec![ImageFlag::HasRotation, ImageFlag::HasFill]);
    }
}
