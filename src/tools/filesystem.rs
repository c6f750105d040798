// ABOUTME: Filesystem toolset - the reference filesystem MCP server launched
// ABOUTME: through npx and confined to one directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::mcp::{McpServerConfig, McpToolset};
use crate::tool::ToolFilter;

pub const FILESYSTEM_SERVER_PACKAGE: &str = "@modelcontextprotocol/server-filesystem";

/// Make `root` absolute and create it if missing. The server requires an
/// absolute path.
pub fn prepare_root(root: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(root)?;
    std::path::absolute(root)
}

/// Server config for the filesystem server rooted at `root`.
pub fn filesystem_server(root: &Path, timeout: Duration) -> McpServerConfig {
    McpServerConfig::new("filesystem", "npx")
        .args(["-y", FILESYSTEM_SERVER_PACKAGE])
        .arg(root.to_string_lossy())
        .timeout(timeout)
}

/// A toolset over the files under `root`, limited to `allowed` server tools
/// when given. Nothing is spawned until the tools are first requested.
pub fn filesystem_toolset(
    root: &Path,
    timeout: Duration,
    allowed: Option<ToolFilter>,
) -> std::io::Result<McpToolset> {
    let root = prepare_root(root)?;
    let toolset = McpToolset::new(filesystem_server(&root, timeout));
    Ok(match allowed {
        Some(filter) => toolset.filter(filter),
        None => toolset,
    })
}
