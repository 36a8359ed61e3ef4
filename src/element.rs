use egui::{Color32, Pos2, Vec2, vec2};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) struct ElementId(u64);

impl ElementId {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The kind of a page element. Unrecognized type strings from older or
/// foreign project files are preserved as `Other` rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ElementKind {
    Container,
    Section,
    Article,
    Heading1,
    Heading2,
    Heading3,
    Text,
    Button,
    Image,
    Link,
    List,
    Input,
    Textarea,
    Form,
    Footer,
    Navigation,
    Other(String),
}

impl ElementKind {
    #[allow(dead_code)] // exercised by tests
    pub(crate) const ALL: [ElementKind; 16] = [
        ElementKind::Container,
        ElementKind::Section,
        ElementKind::Article,
        ElementKind::Heading1,
        ElementKind::Heading2,
        ElementKind::Heading3,
        ElementKind::Text,
        ElementKind::Button,
        ElementKind::Image,
        ElementKind::Link,
        ElementKind::List,
        ElementKind::Input,
        ElementKind::Textarea,
        ElementKind::Form,
        ElementKind::Footer,
        ElementKind::Navigation,
    ];

    /// Canonical type string, as written into project files.
    pub(crate) fn as_str(&self) -> &str {
        match self {
            ElementKind::Container => "Container",
            ElementKind::Section => "Section",
            ElementKind::Article => "Article",
            ElementKind::Heading1 => "Heading1",
            ElementKind::Heading2 => "Heading2",
            ElementKind::Heading3 => "Heading3",
            ElementKind::Text => "Text",
            ElementKind::Button => "Button",
            ElementKind::Image => "Image",
            ElementKind::Link => "Link",
            ElementKind::List => "List",
            ElementKind::Input => "Input",
            ElementKind::Textarea => "Textarea",
            ElementKind::Form => "Form",
            ElementKind::Footer => "Footer",
            ElementKind::Navigation => "Navigation",
            ElementKind::Other(s) => s,
        }
    }

    /// Never fails: anything we don't recognize becomes `Other`.
    pub(crate) fn parse(s: &str) -> ElementKind {
        match s {
            "Container" => ElementKind::Container,
            "Section" => ElementKind::Section,
            "Article" => ElementKind::Article,
            "Heading1" | "Heading 1" => ElementKind::Heading1,
            "Heading2" | "Heading 2" => ElementKind::Heading2,
            "Heading3" | "Heading 3" => ElementKind::Heading3,
            "Text" | "Paragraph" => ElementKind::Text,
            "Button" => ElementKind::Button,
            "Image" => ElementKind::Image,
            "Link" => ElementKind::Link,
            "List" => ElementKind::List,
            "Input" => ElementKind::Input,
            "Textarea" => ElementKind::Textarea,
            "Form" => ElementKind::Form,
            "Footer" => ElementKind::Footer,
            "Navigation" => ElementKind::Navigation,
            other => ElementKind::Other(other.to_string()),
        }
    }

    /// Human-readable label, used in the palette and as the default text.
    pub(crate) fn label(&self) -> &str {
        match self {
            ElementKind::Heading1 => "Heading 1",
            ElementKind::Heading2 => "Heading 2",
            ElementKind::Heading3 => "Heading 3",
            other => other.as_str(),
        }
    }

    /// Returns the default canvas size for an element of this kind.
    /// Centralized to avoid duplication between spawning and the ghost preview.
    pub(crate) fn default_size(&self) -> Vec2 {
        match self {
            ElementKind::Container | ElementKind::Section | ElementKind::Article => {
                vec2(300.0, 200.0)
            }
            ElementKind::Heading1 | ElementKind::Heading2 | ElementKind::Heading3 => {
                vec2(400.0, 60.0)
            }
            ElementKind::Text => vec2(400.0, 100.0),
            ElementKind::Button => vec2(120.0, 40.0),
            ElementKind::Image => vec2(200.0, 150.0),
            _ => vec2(200.0, 80.0),
        }
    }

    /// Returns the default properties for an element of this kind.
    pub(crate) fn default_props(&self) -> ElementProps {
        let mut p = ElementProps {
            text: self.label().to_string(),
            ..Default::default()
        };
        match self {
            ElementKind::Image => {
                p.src = "placeholder.png".into();
            }
            ElementKind::Input => {
                p.input_type = "text".into();
            }
            _ => {}
        }
        p
    }

    /// Canvas fill color per kind.
    pub(crate) fn fill_color(&self) -> Color32 {
        match self {
            ElementKind::Container => Color32::from_rgb(230, 230, 250),
            ElementKind::Section => Color32::from_rgb(230, 250, 230),
            ElementKind::Article => Color32::from_rgb(250, 230, 230),
            ElementKind::Heading1 | ElementKind::Heading2 | ElementKind::Heading3 => {
                Color32::from_rgb(255, 200, 200)
            }
            ElementKind::Text => Color32::from_rgb(200, 230, 255),
            ElementKind::Button => Color32::from_rgb(200, 255, 200),
            ElementKind::Image => Color32::from_rgb(255, 255, 200),
            ElementKind::Form => Color32::from_rgb(220, 220, 220),
            _ => Color32::from_rgb(240, 240, 240),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementKind::parse(&s))
    }
}

/// String-valued properties of an element. Empty means unset; no field is
/// ever null. `extra` preserves property names we don't know about so they
/// survive an edit/save cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct ElementProps {
    pub(crate) id: String,
    pub(crate) class: String,
    pub(crate) text: String,
    pub(crate) style: String,
    // Image
    pub(crate) src: String,
    pub(crate) alt: String,
    // Link
    pub(crate) href: String,
    // Input
    pub(crate) value: String,
    pub(crate) input_type: String,
    pub(crate) extra: BTreeMap<String, String>,
}

#[derive(Clone, Debug)]
pub(crate) struct Element {
    pub(crate) id: ElementId,
    kind: ElementKind,
    pub(crate) pos: Pos2, // Top-left relative to canvas
    pub(crate) size: Vec2,
    pub(crate) props: ElementProps,
}

impl Element {
    pub(crate) fn new(id: ElementId, kind: ElementKind, pos: Pos2) -> Self {
        let size = kind.default_size();
        let props = kind.default_props();
        Self {
            id,
            kind,
            pos,
            size,
            props,
        }
    }

    /// Kind is fixed at creation time.
    pub(crate) fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Sets one named field. Unknown names go into the open property map;
    /// unparsable geometry values are ignored. Never fails.
    pub(crate) fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.props.id = value.to_string(),
            "class" => self.props.class = value.to_string(),
            "text" => self.props.text = value.to_string(),
            "style" => self.props.style = value.to_string(),
            "src" => self.props.src = value.to_string(),
            "alt" => self.props.alt = value.to_string(),
            "href" => self.props.href = value.to_string(),
            "value" => self.props.value = value.to_string(),
            "input_type" => self.props.input_type = value.to_string(),
            "x" => {
                if let Ok(v) = value.parse() {
                    self.pos.x = v;
                }
            }
            "y" => {
                if let Ok(v) = value.parse() {
                    self.pos.y = v;
                }
            }
            "width" => {
                if let Ok(v) = value.parse() {
                    self.size.x = v;
                }
            }
            "height" => {
                if let Ok(v) = value.parse() {
                    self.size.y = v;
                }
            }
            other => {
                self.props.extra.insert(other.to_string(), value.to_string());
            }
        }
    }
}
