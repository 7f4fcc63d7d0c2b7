use anyhow::Result;

use crate::chat::{ChatSession, ProviderInfo};
use crate::config::ResolveOptions;

use super::{load_config, open_session};

/// Starts an interactive consultation.
pub async fn run_chat(options: ResolveOptions) -> Result<()> {
    let resolved = load_config(&options)?;
    let provider = ProviderInfo {
        name: resolved.provider_name.clone(),
        endpoint: resolved.endpoint.clone(),
    };

    let session = open_session(resolved)?;
    let mut chat = ChatSession::new(session, provider);
    chat.run().await
}
