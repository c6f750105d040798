// ABOUTME: Document analysis tool - loads a document artifact, consults memory,
// ABOUTME: and saves the analysis as a new artifact.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::context::{Artifact, ToolContext};
use crate::tool::{FunctionTool, Outcome, Schema, ToolArgs};

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentArgs {
    pub document_name: String,
    pub analysis_query: String,
}

impl ToolArgs for DocumentArgs {
    fn schema() -> Value {
        Schema::object()
            .string("document_name", "The name of the document to be processed.", true)
            .string("analysis_query", "The query for the analysis.", true)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAnalysis {
    pub analysis_artifact: String,
    pub version: u64,
    pub memory_hits: usize,
}

/// Name under which the analysis of `document` is saved.
pub fn analysis_artifact_name(document: &str) -> String {
    format!("analysis_{}", document)
}

pub async fn process_document(
    ctx: ToolContext,
    args: DocumentArgs,
) -> anyhow::Result<Outcome<DocumentAnalysis>> {
    info!(document = %args.document_name, "loading document artifact");

    let available = match ctx.artifacts().list().await {
        Ok(names) => names,
        Err(e) => {
            warn!(error = %e, "failed to list artifacts");
            return Ok(Outcome::error("Failed to list artifacts."));
        }
    };
    info!(artifacts = ?available, "available artifacts");

    let document = match ctx.artifacts().load(&args.document_name).await {
        Ok(Some(doc)) => doc,
        Ok(None) => {
            return Ok(Outcome::error(format!(
                "Document '{}' not found.",
                args.document_name
            )));
        }
        Err(e) => {
            warn!(document = %args.document_name, error = %e, "failed to load document");
            return Ok(Outcome::error(format!(
                "Document '{}' not found.",
                args.document_name
            )));
        }
    };
    info!(
        document = %args.document_name,
        bytes = document.artifact.data.len(),
        version = document.version,
        "loaded document"
    );

    // A failed search counts as zero results.
    let memory_hits = match ctx.memory().search(&args.analysis_query).await {
        Ok(entries) => entries.len(),
        Err(e) => {
            warn!(query = %args.analysis_query, error = %e, "memory search failed");
            0
        }
    };
    info!(count = memory_hits, "memory results");

    let analysis = format!(
        "Analysis of '{}' regarding '{}' using memory context: [Placeholder Analysis Result]",
        args.document_name, args.analysis_query
    );
    let artifact_name = analysis_artifact_name(&args.document_name);
    let version = match ctx.artifacts().save(&artifact_name, Artifact::text(analysis)).await {
        Ok(v) => v,
        Err(e) => {
            warn!(artifact = %artifact_name, error = %e, "failed to save analysis");
            return Ok(Outcome::error("Failed to save artifact."));
        }
    };
    info!(artifact = %artifact_name, version, "saved analysis");

    Ok(Outcome::Success(DocumentAnalysis {
        analysis_artifact: artifact_name,
        version,
        memory_hits,
    }))
}

pub fn process_document_tool() -> FunctionTool<DocumentArgs> {
    FunctionTool::with_context(
        "process_document",
        "Analyzes a document using context from memory.",
        process_document,
    )
}
