use crate::element::{Element, ElementId, ElementKind};
use egui::{Pos2, Vec2, pos2, vec2};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// One open design: the ordered elements (insertion order = z-order) plus
/// page-global CSS. There is exactly one `Document` per editor session; New
/// and Load replace it wholesale.
#[derive(Clone, Debug)]
pub(crate) struct Document {
    pub(crate) elements: Vec<Element>,
    pub(crate) global_css: String,
    pub(crate) canvas_size: Vec2,
    next_id: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            global_css: String::new(),
            canvas_size: vec2(1200.0, 800.0),
            next_id: 1,
        }
    }
}

impl Document {
    /// Creates an element of `kind` with kind-derived defaults and appends
    /// it. The caller is expected to make it the sole selection.
    pub(crate) fn add_element(&mut self, kind: ElementKind, pos: Pos2) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        self.elements.push(Element::new(id, kind, pos));
        id
    }

    pub(crate) fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn remove(&mut self, id: ElementId) {
        self.elements.retain(|e| e.id != id);
    }

    /// Removes every element and resets the global CSS.
    pub(crate) fn clear(&mut self) {
        self.elements.clear();
        self.global_css.clear();
    }

    /// Duplicates an element, offset slightly, and returns the copy's id.
    pub(crate) fn duplicate(&mut self, id: ElementId) -> Option<ElementId> {
        let source = self.get(id)?.clone();
        let new_id = ElementId::new(self.next_id);
        self.next_id += 1;
        let mut copy = source;
        copy.id = new_id;
        copy.pos.x += 20.0;
        copy.pos.y += 20.0;
        self.elements.push(copy);
        Some(new_id)
    }
}

/// On-disk record for one element. All base fields are written on save;
/// everything is optional on load (missing means empty/zero). The
/// kind-specific fields are only written when set.
#[derive(Serialize, Deserialize)]
struct ElementRecord {
    #[serde(rename = "type")]
    kind: ElementKind,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    id: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    style: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    src: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    alt: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    href: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    input_type: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    extra: BTreeMap<String, String>,
}

impl From<&Element> for ElementRecord {
    fn from(e: &Element) -> Self {
        Self {
            kind: e.kind().clone(),
            x: e.pos.x,
            y: e.pos.y,
            width: e.size.x,
            height: e.size.y,
            id: e.props.id.clone(),
            class: e.props.class.clone(),
            text: e.props.text.clone(),
            style: e.props.style.clone(),
            src: e.props.src.clone(),
            alt: e.props.alt.clone(),
            href: e.props.href.clone(),
            value: e.props.value.clone(),
            input_type: e.props.input_type.clone(),
            extra: e.props.extra.clone(),
        }
    }
}

#[derive(Default, Serialize, Deserialize)]
struct GlobalProperties {
    #[serde(default)]
    global_css: String,
}

/// The project file shape: `{"elements": [...], "properties": {...}}`.
/// No schema version field is written or checked.
#[derive(Serialize, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    elements: Vec<ElementRecord>,
    #[serde(default)]
    properties: GlobalProperties,
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let file = ProjectFile {
            elements: self.elements.iter().map(ElementRecord::from).collect(),
            properties: GlobalProperties {
                global_css: self.global_css.clone(),
            },
        };
        file.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let file = ProjectFile::deserialize(deserializer)?;
        let mut doc = Document::default();
        for record in file.elements {
            // Construct with kind-derived defaults, then overwrite every
            // field from the stored record.
            let id = ElementId::new(doc.next_id);
            doc.next_id += 1;
            let mut el = Element::new(id, record.kind, pos2(record.x, record.y));
            el.size = vec2(record.width, record.height);
            el.props.id = record.id;
            el.props.class = record.class;
            el.props.text = record.text;
            el.props.style = record.style;
            el.props.src = record.src;
            el.props.alt = record.alt;
            el.props.href = record.href;
            el.props.value = record.value;
            el.props.input_type = record.input_type;
            el.props.extra = record.extra;
            doc.elements.push(el);
        }
        doc.global_css = file.properties.global_css;
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_and_remove() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementKind::Button, pos2(10.0, 10.0));
        let b = doc.add_element(ElementKind::Text, pos2(50.0, 50.0));
        assert_eq!(doc.elements.len(), 2);
        assert_ne!(a, b);

        doc.remove(a);
        assert_eq!(doc.elements.len(), 1);
        assert_eq!(doc.elements[0].id, b);
    }

    #[test]
    fn test_add_element_uses_default_geometry() {
        let mut doc = Document::default();
        let id = doc.add_element(ElementKind::Container, pos2(5.0, 6.0));
        let el = doc.get(id).unwrap();
        assert_eq!(el.size, vec2(300.0, 200.0));
        assert_eq!(el.pos, pos2(5.0, 6.0));

        let id = doc.add_element(ElementKind::Other("Unknown".into()), pos2(0.0, 0.0));
        assert_eq!(doc.get(id).unwrap().size, vec2(200.0, 80.0));
    }

    #[test]
    fn test_clear_resets_elements_and_css() {
        let mut doc = Document::default();
        doc.add_element(ElementKind::Form, pos2(0.0, 0.0));
        doc.global_css = "p { color: red; }".into();
        doc.clear();
        assert!(doc.elements.is_empty());
        assert!(doc.global_css.is_empty());
    }

    #[test]
    fn test_duplicate_offsets_copy() {
        let mut doc = Document::default();
        let id = doc.add_element(ElementKind::Button, pos2(100.0, 100.0));
        doc.get_mut(id).unwrap().props.text = "Go".into();

        let copy = doc.duplicate(id).unwrap();
        assert_ne!(copy, id);
        let el = doc.get(copy).unwrap();
        assert_eq!(el.pos, pos2(120.0, 120.0));
        assert_eq!(el.props.text, "Go");
    }

    #[test]
    fn test_serialize_scenario_button() {
        let mut doc = Document::default();
        let id = doc.add_element(ElementKind::Button, pos2(0.0, 0.0));
        {
            let el = doc.get_mut(id).unwrap();
            el.props.id = "b1".into();
            el.props.text = "Go".into();
        }

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "elements": [{
                    "type": "Button",
                    "x": 0.0, "y": 0.0, "width": 120.0, "height": 40.0,
                    "id": "b1", "class": "", "text": "Go", "style": ""
                }],
                "properties": { "global_css": "" }
            })
        );
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let mut doc = Document::default();
        let a = doc.add_element(ElementKind::Heading1, pos2(10.0, 20.0));
        doc.get_mut(a).unwrap().props.text = "Welcome".into();
        let b = doc.add_element(ElementKind::Image, pos2(30.0, 40.0));
        {
            let el = doc.get_mut(b).unwrap();
            el.size = vec2(640.0, 480.0);
            el.props.src = "hero.jpg".into();
            el.props.alt = "Hero".into();
        }
        let c = doc.add_element(ElementKind::Other("Marquee".into()), pos2(1.0, 2.0));
        doc.get_mut(c).unwrap().props.style = "color: red".into();
        doc.global_css = "h1 { margin: 0; }".into();

        let json = serde_json::to_string(&doc).unwrap();
        let loaded: Document = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.elements.len(), 3);
        assert_eq!(loaded.global_css, doc.global_css);
        for (orig, back) in doc.elements.iter().zip(loaded.elements.iter()) {
            assert_eq!(back.kind(), orig.kind());
            assert_eq!(back.pos, orig.pos);
            assert_eq!(back.size, orig.size);
            assert_eq!(back.props, orig.props);
        }
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        // Minimal record: only the type. Geometry zero, strings empty.
        let doc: Document = serde_json::from_value(json!({
            "elements": [{"type": "Button"}]
        }))
        .unwrap();
        assert_eq!(doc.elements.len(), 1);
        let el = &doc.elements[0];
        assert_eq!(el.kind(), &ElementKind::Button);
        assert_eq!(el.pos, pos2(0.0, 0.0));
        assert_eq!(el.size, vec2(0.0, 0.0));
        assert!(el.props.text.is_empty());
        assert!(doc.global_css.is_empty());
    }

    #[test]
    fn test_deserialize_unknown_type() {
        let doc: Document = serde_json::from_value(json!({
            "elements": [
                {"type": "Hologram", "x": 5.0, "y": 6.0,
                 "width": 70.0, "height": 80.0, "text": "hi"}
            ],
            "properties": {"global_css": ""}
        }))
        .unwrap();
        let el = &doc.elements[0];
        assert_eq!(el.kind(), &ElementKind::Other("Hologram".into()));
        assert_eq!(el.size, vec2(70.0, 80.0));
        assert_eq!(el.props.text, "hi");
    }

    #[test]
    fn test_ids_continue_after_load() {
        let mut doc = Document::default();
        doc.add_element(ElementKind::Button, pos2(0.0, 0.0));
        doc.add_element(ElementKind::Text, pos2(0.0, 0.0));

        let json = serde_json::to_string(&doc).unwrap();
        let mut loaded: Document = serde_json::from_str(&json).unwrap();
        let fresh = loaded.add_element(ElementKind::Form, pos2(0.0, 0.0));
        assert!(loaded.elements.iter().filter(|e| e.id == fresh).count() == 1);
    }
}
