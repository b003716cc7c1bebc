//! Share / open-link capability.
//!
//! A history entry's payload can be opened with the desktop's default handler
//! or handed to a share target. The payload is passed through untouched.

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::platform;
use crate::types::errors::LinkError;

#[async_trait]
pub trait LinkHandler: Send + Sync {
    async fn open(&self, payload: &str) -> Result<(), LinkError>;
    async fn share(&self, payload: &str) -> Result<(), LinkError>;
}

/// Opens payloads with the platform opener and shares them on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLinkHandler;

#[async_trait]
impl LinkHandler for SystemLinkHandler {
    async fn open(&self, payload: &str) -> Result<(), LinkError> {
        if payload.trim().is_empty() {
            return Err(LinkError::EmptyPayload);
        }
        if payload.trim_start().starts_with('-') {
            return Err(LinkError::UnsafePayload(payload.to_string()));
        }

        let (program, args) = platform::open_command(payload);
        tracing::debug!(program, payload, "opening scanned payload");

        let status = Command::new(program)
            .args(&args)
            .status()
            .await
            .map_err(|e| LinkError::OpenFailed(format!("{}: {}", program, e)))?;

        if !status.success() {
            return Err(LinkError::OpenFailed(format!(
                "{} exited with {}",
                program, status
            )));
        }
        Ok(())
    }

    async fn share(&self, payload: &str) -> Result<(), LinkError> {
        if payload.is_empty() {
            return Err(LinkError::EmptyPayload);
        }

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("{}\n", payload).as_bytes())
            .await
            .map_err(|e| LinkError::ShareFailed(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| LinkError::ShareFailed(e.to_string()))?;
        Ok(())
    }
}
