/// Language tag used when a fence doesn't name one.
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

/// Block-level elements produced from Markdown.
///
/// Every variant except `Code` carries a single run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading1(String),
    Heading2(String),
    Heading3(String),
    BulletedListItem(String),
    Paragraph(String),
    Code { content: String, language: String },
}

impl Block {
    /// Notion's `type` discriminator for this block.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::Paragraph(_) => "paragraph",
            Block::Code { .. } => "code",
        }
    }

    /// The text carried by the block.
    pub fn text(&self) -> &str {
        match self {
            Block::Heading1(text)
            | Block::Heading2(text)
            | Block::Heading3(text)
            | Block::BulletedListItem(text)
            | Block::Paragraph(text) => text,
            Block::Code { content, .. } => content,
        }
    }
}
