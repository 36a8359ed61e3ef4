//! Generates the HTML document for the current design. Pure functions over
//! `Document`; no state of its own.
//!
//! Property values are inserted into the markup verbatim, without HTML
//! escaping. Projects are single-user local files, and the generated text is
//! part of the output contract, so escaping is deliberately not applied here.

use crate::document::Document;
use crate::element::{Element, ElementKind};

const BASE_STYLE: &str = "body { font-family: Arial, sans-serif; margin: 20px; }";

/// Fixed element-kind to HTML tag mapping. Structural kinds without a more
/// specific tag fall back to `div`.
pub(crate) fn tag_name(kind: &ElementKind) -> &'static str {
    match kind {
        ElementKind::Heading1 => "h1",
        ElementKind::Heading2 => "h2",
        ElementKind::Heading3 => "h3",
        ElementKind::Text => "p",
        ElementKind::Button => "button",
        ElementKind::Image => "img",
        ElementKind::Link => "a",
        ElementKind::List => "ul",
        ElementKind::Input => "input",
        ElementKind::Textarea => "textarea",
        ElementKind::Form => "form",
        _ => "div",
    }
}

/// Renders one element as an HTML fragment. The `id`, `class` and `style`
/// attributes appear in that order and only when non-empty; `img` and
/// `input` are self-closing with their kind-specific attributes.
pub(crate) fn element_html(el: &Element) -> String {
    let tag = tag_name(el.kind());
    let mut out = String::new();
    out.push('<');
    out.push_str(tag);

    if !el.props.id.is_empty() {
        out.push_str(&format!(" id=\"{}\"", el.props.id));
    }
    if !el.props.class.is_empty() {
        out.push_str(&format!(" class=\"{}\"", el.props.class));
    }
    if !el.props.style.is_empty() {
        out.push_str(&format!(" style=\"{}\"", el.props.style));
    }

    match el.kind() {
        ElementKind::Image => {
            out.push_str(&format!(" src=\"{}\"", el.props.src));
            out.push_str(&format!(" alt=\"{}\"", el.props.alt));
            out.push_str(" />");
        }
        ElementKind::Input => {
            let input_type = if el.props.input_type.is_empty() {
                "text"
            } else {
                el.props.input_type.as_str()
            };
            out.push_str(&format!(" type=\"{input_type}\""));
            out.push_str(&format!(" value=\"{}\"", el.props.value));
            out.push_str(" />");
        }
        kind => {
            if matches!(kind, ElementKind::Link) && !el.props.href.is_empty() {
                out.push_str(&format!(" href=\"{}\"", el.props.href));
            }
            out.push('>');
            out.push_str(&el.props.text);
            out.push_str(&format!("</{tag}>"));
        }
    }

    out
}

/// Renders the whole page: fixed skeleton, one `<style>` block (base rule
/// plus the document's global CSS verbatim), then every element fragment in
/// document order.
pub(crate) fn page_html(doc: &Document) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<title>Generated Page</title>\n");
    out.push_str("<style>\n");
    out.push_str(BASE_STYLE);
    out.push('\n');
    out.push_str(&doc.global_css);
    out.push_str("\n</style>\n</head>\n<body>\n");

    for el in &doc.elements {
        out.push_str(&element_html(el));
        out.push('\n');
    }

    out.push_str("\n</body>\n</html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementId};
    use egui::pos2;
    use pretty_assertions::assert_eq;

    fn element(kind: ElementKind) -> Element {
        Element::new(ElementId::new(1), kind, pos2(0.0, 0.0))
    }

    #[test]
    fn test_tag_mapping() {
        assert_eq!(tag_name(&ElementKind::Heading1), "h1");
        assert_eq!(tag_name(&ElementKind::Heading3), "h3");
        assert_eq!(tag_name(&ElementKind::Text), "p");
        assert_eq!(tag_name(&ElementKind::Button), "button");
        assert_eq!(tag_name(&ElementKind::List), "ul");
        assert_eq!(tag_name(&ElementKind::Container), "div");
        assert_eq!(tag_name(&ElementKind::Navigation), "div");
        assert_eq!(tag_name(&ElementKind::Other("Widget".into())), "div");
    }

    #[test]
    fn test_button_fragment_scenario() {
        let mut el = element(ElementKind::Button);
        el.props.id = "b1".into();
        el.props.text = "Go".into();
        el.props.style = "".into();
        assert_eq!(element_html(&el), "<button id=\"b1\">Go</button>");
    }

    #[test]
    fn test_attribute_order_and_omission() {
        let mut el = element(ElementKind::Text);
        el.props.text = "Hello".into();
        assert_eq!(element_html(&el), "<p>Hello</p>");

        el.props.style = "color: blue".into();
        el.props.class = "lead".into();
        el.props.id = "intro".into();
        assert_eq!(
            element_html(&el),
            "<p id=\"intro\" class=\"lead\" style=\"color: blue\">Hello</p>"
        );
    }

    #[test]
    fn test_image_self_closing() {
        let mut el = element(ElementKind::Image);
        el.props.alt = "Logo".into();
        assert_eq!(
            element_html(&el),
            "<img src=\"placeholder.png\" alt=\"Logo\" />"
        );
    }

    #[test]
    fn test_input_self_closing() {
        let mut el = element(ElementKind::Input);
        el.props.value = "hello".into();
        assert_eq!(element_html(&el), "<input type=\"text\" value=\"hello\" />");

        el.props.input_type = "email".into();
        assert_eq!(element_html(&el), "<input type=\"email\" value=\"hello\" />");
    }

    #[test]
    fn test_link_href() {
        let mut el = element(ElementKind::Link);
        el.props.text = "Home".into();
        assert_eq!(element_html(&el), "<a>Home</a>");

        el.props.href = "/index.html".into();
        assert_eq!(element_html(&el), "<a href=\"/index.html\">Home</a>");
    }

    #[test]
    fn test_values_inserted_verbatim() {
        // No escaping; the output contract is the literal property values.
        let mut el = element(ElementKind::Text);
        el.props.text = "a < b & \"c\"".into();
        assert_eq!(element_html(&el), "<p>a < b & \"c\"</p>");
    }

    #[test]
    fn test_page_skeleton_and_order() {
        let mut doc = Document::default();
        let h = doc.add_element(ElementKind::Heading1, pos2(0.0, 0.0));
        doc.get_mut(h).unwrap().props.text = "Title".into();
        let b = doc.add_element(ElementKind::Button, pos2(0.0, 0.0));
        doc.get_mut(b).unwrap().props.text = "Go".into();
        doc.global_css = "h1 { color: teal; }".into();

        let html = page_html(&doc);
        assert_eq!(
            html,
            "<!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <title>Generated Page</title>\n\
             <style>\n\
             body { font-family: Arial, sans-serif; margin: 20px; }\n\
             h1 { color: teal; }\n\
             </style>\n\
             </head>\n\
             <body>\n\
             <h1>Title</h1>\n\
             <button>Go</button>\n\
             \n\
             </body>\n\
             </html>"
        );
    }

    #[test]
    fn test_page_empty_document() {
        let doc = Document::default();
        let html = page_html(&doc);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>\nbody { font-family: Arial, sans-serif; margin: 20px; }\n\n</style>"));
        assert!(html.ends_with("<body>\n\n</body>\n</html>"));
    }
}
