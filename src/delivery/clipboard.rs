use super::{DeliveryContext, DeliveryError};

/// Put the rendered configuration on the system clipboard
pub fn copy_text(ctx: &mut DeliveryContext, text: &str) -> Result<(), DeliveryError> {
    ctx.clipboard()?
        .set_text(text)
        .map_err(|e| DeliveryError::Clipboard(e.to_string()))?;
    tracing::info!("Copied {} chars to clipboard", text.len());
    Ok(())
}
