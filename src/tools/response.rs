use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};

/// One content block of a tool response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Uniform `{content, isError}` envelope returned by every tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Pretty-printed JSON (two-space indent) as a single text block.
    pub fn json<T: Serialize>(data: &T) -> anyhow::Result<Self> {
        Ok(Self::text(serde_json::to_string_pretty(data)?))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// Text of the first block, if any
    pub fn text_content(&self) -> Option<&str> {
        self.content.first().map(|block| match block {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

impl From<ToolResponse> for CallToolResult {
    fn from(response: ToolResponse) -> Self {
        let content = response
            .content
            .into_iter()
            .map(|block| match block {
                ToolContent::Text { text } => Content::text(text),
            })
            .collect();

        if response.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}
