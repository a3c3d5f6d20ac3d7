//! Notion wire format: request bodies the API accepts and the parts of its
//! responses we read back.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::block::Block;

/// Title shown for pages that have no title text.
pub const UNTITLED: &str = "Untitled";

/// A block serialized the way the `children` array expects it:
/// `{"object": "block", "type": K, K: {"rich_text": [...]}}`.
#[derive(Debug, Clone, Copy)]
pub struct BlockObject<'a>(pub &'a Block);

impl Serialize for BlockObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let block = self.0;
        let kind = block.kind();
        let language = match block {
            Block::Code { language, .. } => Some(language.as_str()),
            _ => None,
        };

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("type", kind)?;
        map.serialize_entry(
            kind,
            &BlockBody {
                rich_text: [RichText::new(block.text())],
                language,
            },
        )?;
        map.end()
    }
}

#[derive(Serialize)]
struct BlockBody<'a> {
    rich_text: [RichText<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

#[derive(Serialize)]
struct RichText<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextContent<'a>,
}

impl<'a> RichText<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            kind: "text",
            text: TextContent { content },
        }
    }
}

#[derive(Serialize)]
struct TextContent<'a> {
    content: &'a str,
}

/// Body of `POST /pages`.
#[derive(Serialize)]
pub struct CreatePageRequest<'a> {
    parent: Parent<'a>,
    properties: PageProperties<'a>,
    children: Vec<BlockObject<'a>>,
}

impl<'a> CreatePageRequest<'a> {
    pub fn new(parent_id: &'a str, title: &'a str, blocks: &'a [Block]) -> Self {
        Self {
            parent: Parent { page_id: parent_id },
            properties: PageProperties {
                title: TitleProperty {
                    title: [TitleText {
                        text: TextContent { content: title },
                    }],
                },
            },
            children: blocks.iter().map(BlockObject).collect(),
        }
    }

    pub fn children_len(&self) -> usize {
        self.children.len()
    }
}

#[derive(Serialize)]
struct Parent<'a> {
    page_id: &'a str,
}

#[derive(Serialize)]
struct PageProperties<'a> {
    title: TitleProperty<'a>,
}

#[derive(Serialize)]
struct TitleProperty<'a> {
    title: [TitleText<'a>; 1],
}

#[derive(Serialize)]
struct TitleText<'a> {
    text: TextContent<'a>,
}

/// Body of `POST /search`: pages only, most recently edited first.
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    filter: SearchFilter,
    sort: SearchSort,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            filter: SearchFilter {
                value: "page",
                property: "object",
            },
            sort: SearchSort {
                direction: "descending",
                timestamp: "last_edited_time",
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchFilter {
    value: &'static str,
    property: &'static str,
}

#[derive(Debug, Serialize)]
struct SearchSort {
    direction: &'static str,
    timestamp: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<PageObject>,
}

#[derive(Debug, Deserialize)]
pub struct PageObject {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

#[derive(Debug, Deserialize)]
pub struct PropertyValue {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Vec<RichTextItem>,
}

#[derive(Debug, Deserialize)]
pub struct RichTextItem {
    #[serde(default)]
    pub plain_text: String,
}

impl PageObject {
    /// First text run of the property whose id is `title`.
    pub fn title(&self) -> &str {
        self.properties
            .values()
            .find(|property| property.id == "title")
            .and_then(|property| property.title.first())
            .map(|run| run.plain_text.as_str())
            .unwrap_or(UNTITLED)
    }
}

/// A search hit reduced to what gets displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub id: String,
    pub title: String,
}

impl From<PageObject> for PageSummary {
    fn from(page: PageObject) -> Self {
        let title = page.title().to_string();
        Self { id: page.id, title }
    }
}

/// Response of `POST /pages`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPage {
    pub id: String,
    pub url: String,
}
