//! User-supplied extractor plugins.
//!
//! A custom extractor is an executable that speaks a versioned JSON
//! protocol over stdin/stdout, one request per invocation:
//!
//! - `{"type":"handshake","version":1}` → `{"ok":true,"version":1}`
//! - `{"type":"extract","version":1,"file":"...","content":"..."}` →
//!   `[{"keyName":"...","namespace":"...","defaultValue":"..."}, ...]`
//!
//! Running plugins out of process keeps a crashing or misbehaving
//! extractor from taking down the orchestrator; the exchange is plain
//! data on both sides.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::Extract;
use crate::error::ExtractError;
use crate::extraction::keys::ExtractedKey;

/// Protocol version spoken by this build.
pub const PROTOCOL_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum PluginRequest<'a> {
    Handshake {
        version: u32,
    },
    Extract {
        version: u32,
        file: &'a str,
        content: &'a str,
    },
}

#[derive(Debug, Deserialize)]
struct HandshakeReply {
    ok: bool,
    version: u32,
}

/// An extractor implemented by an external executable.
pub struct CustomExtractor {
    path: PathBuf,
}

impl CustomExtractor {
    /// Load a plugin: verify the module exists and answers the handshake.
    ///
    /// Both checks happen here, before any file is submitted, so a missing
    /// or contract-violating plugin aborts the run pre-flight.
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        if !path.is_file() {
            return Err(ExtractError::extractor_load(
                path,
                "extractor module not found",
            ));
        }

        let plugin = Self {
            path: path.to_path_buf(),
        };

        let reply = plugin
            .invoke(&PluginRequest::Handshake {
                version: PROTOCOL_VERSION,
            })
            .and_then(|stdout| {
                serde_json::from_str::<HandshakeReply>(&stdout)
                    .context("handshake reply is not valid JSON")
            })
            .map_err(|e| ExtractError::extractor_load(path, format!("{:#}", e)))?;

        if !reply.ok || reply.version != PROTOCOL_VERSION {
            return Err(ExtractError::extractor_load(
                path,
                format!(
                    "protocol mismatch: plugin answered version {}, expected {}",
                    reply.version, PROTOCOL_VERSION
                ),
            ));
        }

        Ok(plugin)
    }

    /// Run the plugin once: request on stdin, reply on stdout.
    fn invoke(&self, request: &PluginRequest) -> Result<String> {
        let mut child = Command::new(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn '{}'", self.path.display()))?;

        let request_json = serde_json::to_string(request)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(request_json.as_bytes())?;
            stdin.write_all(b"\n")?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "plugin exited with {}: {}",
                output.status,
                stderr.trim_end()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Extract for CustomExtractor {
    fn extract(&self, file: &Path, source: &str) -> Result<Vec<ExtractedKey>> {
        let stdout = self.invoke(&PluginRequest::Extract {
            version: PROTOCOL_VERSION,
            file: &file.to_string_lossy(),
            content: source,
        })?;

        serde_json::from_str(&stdout).context("plugin reply is not a JSON array of keys")
    }
}
