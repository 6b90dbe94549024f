use super::render;
use super::rpc::{RpcError, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND};
use crate::error::NewsError;
use crate::service::NewsService;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Tools offered over MCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    GetRssFeed,
    ListNewsSources,
    GetNewsByCategory,
    GetNewsBySource,
    GetArticleContent,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::GetRssFeed,
        Tool::ListNewsSources,
        Tool::GetNewsByCategory,
        Tool::GetNewsBySource,
        Tool::GetArticleContent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::GetRssFeed => "get_rss_feed",
            Tool::ListNewsSources => "list_news_sources",
            Tool::GetNewsByCategory => "get_news_by_category",
            Tool::GetNewsBySource => "get_news_by_source",
            Tool::GetArticleContent => "get_article_content",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// MCP tool descriptor with its JSON input schema.
    pub fn definition(self) -> Value {
        let (description, properties, required): (&str, Value, Vec<&str>) = match self {
            Tool::GetRssFeed => (
                "Retrieve the content of the specified RSS feed",
                json!({
                    "feed_url": {
                        "type": "string",
                        "description": "The URL of the RSS feed to fetch"
                    }
                }),
                vec!["feed_url"],
            ),
            Tool::ListNewsSources => (
                "List all available news sources, optionally filtered by category",
                json!({
                    "category": {
                        "type": "string",
                        "description": "Optional: Filter sources by category (general, tech, business, crypto, science, health, sports, entertainment, politics, environment)"
                    }
                }),
                vec![],
            ),
            Tool::GetNewsByCategory => (
                "Fetch news from all sources in a specific category",
                json!({
                    "category": {
                        "type": "string",
                        "description": "Category name (general, tech, business, crypto, science, health, sports, entertainment, politics, environment, social, education)"
                    },
                    "max_items_per_source": {
                        "type": "number",
                        "description": "Maximum items to fetch per source (default: 5)"
                    }
                }),
                vec!["category"],
            ),
            Tool::GetNewsBySource => (
                "Fetch news from a specific source by name",
                json!({
                    "source_name": {
                        "type": "string",
                        "description": "Name of the news source (e.g., \"Google News - Top Stories\", \"TechCrunch\")"
                    },
                    "max_items": {
                        "type": "number",
                        "description": "Maximum items to fetch (default: 10)"
                    }
                }),
                vec!["source_name"],
            ),
            Tool::GetArticleContent => (
                "Fetch and parse full article content from a URL (server-side, no CORS issues)",
                json!({
                    "article_url": {
                        "type": "string",
                        "description": "The URL of the article to fetch and parse"
                    }
                }),
                vec!["article_url"],
            ),
        };

        json!({
            "name": self.name(),
            "description": description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

/// Descriptors for every tool, in listing order.
pub fn definitions() -> Vec<Value> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}

pub fn names() -> Vec<&'static str> {
    Tool::ALL.into_iter().map(Tool::name).collect()
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Map<String, Value>>,
}

/// Handles `tools/call`, returning the MCP result object.
pub async fn call(service: &NewsService, params: Option<Value>) -> Result<Value, RpcError> {
    let params: CallParams = params
        .ok_or_else(|| RpcError::new(INVALID_PARAMS, "Invalid params: missing tool name"))
        .and_then(|p| {
            serde_json::from_value(p)
                .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))
        })?;

    let tool = Tool::from_name(&params.name).ok_or_else(|| {
        RpcError::new(METHOD_NOT_FOUND, format!("Unknown tool: {}", params.name))
    })?;
    let args = params.arguments.unwrap_or_default();

    tracing::debug!(tool = tool.name(), "Calling tool");
    let text = run(service, tool, &args).await?;

    Ok(json!({
        "content": [
            { "type": "text", "text": text }
        ]
    }))
}

async fn run(service: &NewsService, tool: Tool, args: &Map<String, Value>) -> Result<String, RpcError> {
    match tool {
        Tool::GetRssFeed => {
            let url = required_str(args, "feed_url")?;
            let feed = service.get_feed(url).await.map_err(|e| rpc_error(e, "Error"))?;
            Ok(render::feed(&feed))
        }
        Tool::ListNewsSources => {
            let category = optional_str(args, "category")?;
            Ok(render::source_listing(&service.list_sources(category)))
        }
        Tool::GetNewsByCategory => {
            let category = required_str(args, "category")?;
            let max_items = optional_count(args, "max_items_per_source")?;
            let report = service
                .get_category(category, max_items)
                .await
                .map_err(|e| rpc_error(e, "Error"))?;
            Ok(render::category(&report))
        }
        Tool::GetNewsBySource => {
            let name = required_str(args, "source_name")?;
            let max_items = optional_count(args, "max_items")?;
            let result = service
                .get_by_source_name(name, max_items)
                .await
                .map_err(|e| rpc_error(e, "Error"))?;
            Ok(render::source_feed(&result))
        }
        Tool::GetArticleContent => {
            let url = required_str(args, "article_url")?;
            let article = service
                .get_article(url)
                .await
                .map_err(|e| rpc_error(e, "Error fetching article"))?;
            render::article(&article)
                .map_err(|e| RpcError::new(INTERNAL_ERROR, format!("Error fetching article: {}", e)))
        }
    }
}

/// Maps a service failure onto a JSON-RPC error. Transport failures are
/// prefixed with `prefix`; the rest already carry a complete message.
fn rpc_error(err: NewsError, prefix: &str) -> RpcError {
    match err {
        NewsError::Transport(_) => RpcError::new(err.code(), format!("{}: {}", prefix, err)),
        _ => RpcError::new(err.code(), err.to_string()),
    }
}

fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str, RpcError> {
    match args.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.as_str()),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            Err(RpcError::new(INVALID_PARAMS, format!("{} is required", key)))
        }
        Some(_) => Err(RpcError::new(INVALID_PARAMS, format!("{} must be a string", key))),
    }
}

fn optional_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, RpcError> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(RpcError::new(INVALID_PARAMS, format!("{} must be a string", key))),
    }
}

/// Non-negative count. Fractions are truncated, as clients often send JSON
/// numbers as floats.
fn optional_count(args: &Map<String, Value>, key: &str) -> Result<Option<usize>, RpcError> {
    let invalid = || RpcError::new(INVALID_PARAMS, format!("{} must be a non-negative number", key));
    match args.get(key) {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                Ok(Some(usize::try_from(v).unwrap_or(usize::MAX)))
            } else {
                match n.as_f64() {
                    Some(f) if f >= 0.0 && f.is_finite() => Ok(Some(f as usize)),
                    _ => Err(invalid()),
                }
            }
        }
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(invalid()),
    }
}
