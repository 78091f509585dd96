use anyhow::Result;
use log::{debug, info};
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::error::SplitError;
use crate::pdf::PdfDocument;
use crate::split::SplitRequest;
use crate::worker::{self, SplitEvent};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "First page to include (1-based)")]
    pub start_page: i64,
    #[schemars(description = "Last page to include (1-based, inclusive)")]
    pub end_page: i64,
    #[schemars(
        description = "Output file path (default: <input>_pages_<start>_to_<end>.pdf in the working directory)"
    )]
    #[serde(default)]
    pub output: Option<String>,
}

impl From<PdfSplitRequest> for SplitRequest {
    fn from(req: PdfSplitRequest) -> Self {
        let request = SplitRequest::new(req.path, req.start_page, req.end_page);
        match req.output {
            Some(output) => request.with_output(output),
            None => request,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get the number of pages in a PDF, to choose a valid page range")]
    fn pdf_page_count(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let result = PageCountResult {
                    page_count: doc.page_count(),
                    path,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => render_error(&e),
        }
    }

    #[tool(description = "Copy pages start_page..=end_page (1-based, inclusive) of a PDF into a new PDF file")]
    async fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let request = SplitRequest::from(req);
        info!(
            "pdf_split {} pages {} to {}",
            request.input.display(),
            request.start_page,
            request.end_page
        );

        let mut events = worker::spawn(request);
        while let Some(event) = events.recv().await {
            match event {
                SplitEvent::Progress(p) => {
                    debug!("copied page {} ({}/{})", p.page, p.copied, p.total)
                }
                SplitEvent::Finished(Ok(outcome)) => {
                    let result = SplitResult {
                        output_path: outcome.output_path.display().to_string(),
                        page_count: outcome.page_count,
                    };
                    return serde_json::to_string_pretty(&result)
                        .unwrap_or_else(|e| format!("Error: {}", e));
                }
                SplitEvent::Finished(Err(e)) => return render_error(&e),
            }
        }

        "Error: split worker stopped without reporting a result".to_string()
    }
}

fn render_error(e: &SplitError) -> String {
    format!("Error: {}: {}", e.kind(), e)
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PageCountResult {
    pub path: String,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub output_path: String,
    pub page_count: u32,
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page range extraction. Use pdf_page_count to find how many pages a document \
                 has, then pdf_split to copy a contiguous 1-based inclusive page range into a new PDF."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::write_sample_pdf;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_request_conversion() {
        let req: PdfSplitRequest =
            serde_json::from_str(r#"{"path": "a/b.pdf", "start_page": 2, "end_page": 4}"#).unwrap();
        let request = SplitRequest::from(req);
        assert_eq!(request.input, PathBuf::from("a/b.pdf"));
        assert_eq!(request.output, None);
        assert_eq!(request.output_path(), PathBuf::from("b_pages_2_to_4.pdf"));
    }

    #[test]
    fn test_page_count_tool() {
        let dir = TempDir::new().unwrap();
        let input = write_sample_pdf(dir.path(), "in.pdf", 7);

        let server = PdfServer::new();
        let out = server.pdf_page_count(Parameters(PathRequest {
            path: input.display().to_string(),
        }));
        let result: PageCountResult = serde_json::from_str(&out).unwrap();
        assert_eq!(result.page_count, 7);
    }

    #[tokio::test]
    async fn test_split_tool() {
        let dir = TempDir::new().unwrap();
        let input = write_sample_pdf(dir.path(), "in.pdf", 10);
        let output = dir.path().join("out.pdf");

        let server = PdfServer::new();
        let out = server
            .pdf_split(Parameters(PdfSplitRequest {
                path: input.display().to_string(),
                start_page: 3,
                end_page: 5,
                output: Some(output.display().to_string()),
            }))
            .await;
        let result: SplitResult = serde_json::from_str(&out).unwrap();
        assert_eq!(result.page_count, 3);
        assert_eq!(result.output_path, output.display().to_string());
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_split_tool_names_error_kind() {
        let dir = TempDir::new().unwrap();
        let input = write_sample_pdf(dir.path(), "in.pdf", 10);

        let server = PdfServer::new();
        let out = server
            .pdf_split(Parameters(PdfSplitRequest {
                path: input.display().to_string(),
                start_page: 7,
                end_page: 3,
                output: Some(dir.path().join("out.pdf").display().to_string()),
            }))
            .await;
        assert_eq!(
            out,
            "Error: RangeError: Invalid page range: 7 to 3 for PDF with 10 pages"
        );
    }
}
