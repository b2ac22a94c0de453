use crate::base::FormatSymbol;
use crate::registry::FormatNode;

use super::config::NegotiatorConfig;
use super::error::NegotiateError;
use super::offers::Offers;

/// What a renderer reports for one attempted format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// Nothing to render at exactly this format; try the next candidate.
    ResourceNotFound,
}

/// The host's rendering step.
///
/// Any `FnMut(&FormatNode) -> Result<RenderOutcome, E>` is a renderer.
pub trait Renderer {
    type Error;

    fn render(&mut self, format: &FormatNode) -> Result<RenderOutcome, Self::Error>;
}

impl<F, E> Renderer for F
where
    F: FnMut(&FormatNode) -> Result<RenderOutcome, E>,
{
    type Error = E;

    fn render(&mut self, format: &FormatNode) -> Result<RenderOutcome, E> {
        self(format)
    }
}

/// Render the first offered format the client accepts.
///
/// `accepted` is in client priority order. For each entry:
///
/// - the wildcard renders the offered root format, else the first offer, and
///   ends the cascade whatever the outcome
/// - an offered format is rendered; a missing resource moves on to the next
///   accepted entry
/// - anything else is skipped
///
/// When the list is exhausted, an offered wildcard gets the last attempt.
/// Returns the format that rendered.
pub fn respond<R>(
    config: &NegotiatorConfig,
    accepted: &[FormatSymbol],
    offers: &Offers,
    renderer: &mut R,
) -> Result<FormatNode, NegotiateError<R::Error>>
where
    R: Renderer + ?Sized,
{
    tracing::debug!(
        "[RESPOND] accepted {:?}, offered {:?}",
        accepted,
        offers.symbols()
    );
    let mut attempted = Vec::new();

    for symbol in accepted {
        if *symbol == config.wildcard_format {
            let answer = offers.get(&config.root_format).or_else(|| offers.first());
            if let Some(node) = answer {
                tracing::debug!("[RESPOND] wildcard accepted, answering '{}'", node.symbol);
                return render_final(renderer, node);
            }
            continue;
        }

        let Some(node) = offers.get(symbol) else {
            continue;
        };
        attempted.push(node.symbol.clone());
        tracing::debug!("[RESPOND] trying '{}' ({})", node.symbol, node.mime);
        match renderer.render(node).map_err(NegotiateError::Render)? {
            RenderOutcome::Rendered => return Ok(node.clone()),
            RenderOutcome::ResourceNotFound => {
                tracing::debug!("[RESPOND] no resource for '{}'", node.symbol);
            }
        }
    }

    if let Some(node) = offers.get(&config.wildcard_format) {
        tracing::debug!("[RESPOND] no suitable offer, using '{}'", node.symbol);
        return render_final(renderer, node);
    }

    tracing::debug!("[RESPOND] not acceptable");
    Err(NegotiateError::NotAcceptable { attempted })
}

fn render_final<R>(renderer: &mut R, node: &FormatNode) -> Result<FormatNode, NegotiateError<R::Error>>
where
    R: Renderer + ?Sized,
{
    match renderer.render(node).map_err(NegotiateError::Render)? {
        RenderOutcome::Rendered => Ok(node.clone()),
        RenderOutcome::ResourceNotFound => Err(NegotiateError::ResourceNotFound {
            format: node.symbol.clone(),
        }),
    }
}
