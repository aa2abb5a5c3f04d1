use std::{path::Path, sync::Arc};

use rmcp::{
    ServerHandler,
    ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult,
        Content,
        Implementation,
        ServerCapabilities,
        ServerInfo,
    },
    tool,
    tool_handler,
    tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::Configuration,
    corpus::VaultCorpus,
    document::Document,
    error,
    links,
    navigator,
    workspace::PaneWorkspace,
};

struct RelatedNotesState {
    corpus: VaultCorpus,
    config: Configuration,
}

#[derive(Clone)]
pub struct RelatedNotesMcpServer {
    state: Arc<RelatedNotesState>,
    tool_router: ToolRouter<Self>,
}

impl RelatedNotesMcpServer {
    fn new(state: RelatedNotesState) -> Self {
        Self {
            state: Arc::new(state),
            tool_router: Self::tool_router(),
        }
    }

    fn resolve(&self, reference: &str) -> Result<Document, rmcp::ErrorData> {
        self.state
            .corpus
            .resolve(Path::new(reference))
            .map_err(|e| {
                rmcp::ErrorData::invalid_params(
                    e.to_string(),
                    Some(json!({ "note": reference })),
                )
            })
    }
}

#[tool_router(router = tool_router)]
impl RelatedNotesMcpServer {
    /// Suggest notes to link from a note, grouped by keyword.
    #[tool(
        name = "possible_links",
        description = "Extract keywords from a note (or a selection of it) and list the notes whose titles contain each keyword."
    )]
    pub async fn possible_links(
        &self,
        params: Parameters<PossibleLinksParams>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let params = params.0;
        let note = self.resolve(&params.note)?;
        let workspace =
            PaneWorkspace::new(Some(note.clone())).with_selection(params.selection);

        let match_set =
            links::possible_links(&workspace, &self.state.corpus, &self.state.config)
                .map_err(|e| mcp_error("scan failed", e))?
                .unwrap_or_default();

        let list = navigator::keyword_list(&match_set);
        let keywords: Vec<KeywordItem> = list
            .items
            .iter()
            .filter_map(|item| match &item.action {
                navigator::Action::ShowKeyword(keyword) => {
                    let notes: Vec<String> = match_set
                        .get(keyword)
                        .unwrap_or_default()
                        .iter()
                        .map(|d| d.path.clone())
                        .collect();
                    Some(KeywordItem {
                        keyword: keyword.clone(),
                        count: notes.len(),
                        notes,
                    })
                }
                _ => None,
            })
            .collect();

        let summary = std::iter::once(list.title.clone())
            .chain(list.items.iter().map(|i| i.label.clone()))
            .collect::<Vec<_>>()
            .join("\n");
        let structured = serde_json::to_value(PossibleLinksResponse {
            note: note.path,
            keyword_count: keywords.len(),
            keywords,
        })
        .map_err(|e| mcp_error("failed to serialize keywords", e))?;

        let mut result = CallToolResult::success(vec![Content::text(summary)]);
        result.structured_content = Some(structured);
        Ok(result)
    }

    /// Append a wiki link to `target` at the end of `note`.
    #[tool(
        name = "append_link",
        description = "Append a [[wiki link]] to the target note at the end of the given note."
    )]
    pub async fn append_link(
        &self,
        params: Parameters<AppendLinkParams>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let params = params.0;
        let note = self.resolve(&params.note)?;
        let target = self.resolve(&params.target)?;

        let notice = navigator::append_link(&self.state.corpus, &note, &target)
            .map_err(|e| mcp_error("append failed", e))?;

        Ok(CallToolResult::success(vec![Content::text(notice)]))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for RelatedNotesMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_server_info(
                Implementation::new("related-notes", env!("CARGO_PKG_VERSION"))
                    .with_title("related-notes MCP"),
            )
            .with_instructions(
                "Use possible_links to find notes worth linking from a note, then append_link to insert a link.",
            )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PossibleLinksParams {
    /// Note to scan, relative to the vault root.
    pub note: String,
    /// Only scan this text instead of the whole note.
    pub selection: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppendLinkParams {
    /// Note that receives the link, relative to the vault root.
    pub note: String,
    /// Note being linked to, relative to the vault root.
    pub target: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PossibleLinksResponse {
    note: String,
    keyword_count: usize,
    keywords: Vec<KeywordItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeywordItem {
    keyword: String,
    count: usize,
    notes: Vec<String>,
}

fn mcp_error(message: &str, error: impl std::fmt::Display) -> rmcp::ErrorData {
    rmcp::ErrorData::internal_error(
        message.to_string(),
        Some(json!({ "error": error.to_string() })),
    )
}

pub fn run_mcp(corpus: VaultCorpus, config: Configuration) -> error::Result<()> {
    let server = RelatedNotesMcpServer::new(RelatedNotesState { corpus, config });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            error::Error::Config(format!("failed to start tokio runtime: {e}"))
        })?;

    runtime.block_on(async move {
        let transport = rmcp::transport::stdio();
        let running = server.serve(transport).await.map_err(|e| {
            error::Error::Config(format!(
                "MCP server initialization failed: {e}"
            ))
        })?;
        running.waiting().await.map_err(|e| {
            error::Error::Config(format!("MCP server error: {e}"))
        })?;
        Ok(())
    })
}
