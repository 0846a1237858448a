//! Wizard controller: compose → preview → share.
//!
//! The controller owns the card while it is being edited. Its state is one
//! [`WizardStep`] plus independent per-action flags (an export in flight, the
//! "delivered" and "copied" acknowledgments). Acknowledgments are deadlines,
//! so they clear themselves without a timer firing.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::card::{utf16_len, Alignment, CardState, Theme, MAX_MESSAGE_LEN};
use crate::config::DEFAULT_ORIGIN;
use crate::delivery::{Clipboard, FileSink};
use crate::error::{CardError, CardResult};
use crate::export::{ExportFormat, ExportPipeline};
use crate::link::ShareLink;
use crate::raster::Rasterizer;

/// How long the copied / delivered acknowledgments stay visible
pub const ACK_DURATION: Duration = Duration::from_secs(2);

/// Current wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    #[default]
    Compose,
    Preview,
    Share,
}

impl WizardStep {
    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Compose => "compose",
            WizardStep::Preview => "preview",
            WizardStep::Share => "share",
        }
    }
}

/// Transient per-action state, orthogonal to the step
#[derive(Debug, Default)]
struct ActionFlags {
    export_in_flight: Option<ExportFormat>,
    delivered_until: Option<Instant>,
    copied_until: Option<Instant>,
}

/// Owns the card during editing and drives the three-step flow.
#[derive(Debug)]
pub struct WizardController {
    step: WizardStep,
    card: CardState,
    flags: ActionFlags,
    origin: String,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Compose,
            card: CardState::default(),
            flags: ActionFlags::default(),
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }

    /// Share links point at `origin` (builder pattern)
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.to_string();
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn card(&self) -> &CardState {
        &self.card
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    pub fn set_recipient(&mut self, recipient: &str) {
        self.card = std::mem::take(&mut self.card).with_recipient(recipient);
    }

    /// Replace the message. An edit past the limit is refused and the
    /// previous message is kept.
    pub fn set_message(&mut self, message: &str) -> CardResult<()> {
        let len = utf16_len(message);
        if len > MAX_MESSAGE_LEN {
            return Err(CardError::MessageTooLong {
                len,
                max: MAX_MESSAGE_LEN,
            });
        }
        self.card = std::mem::take(&mut self.card).with_message(message);
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.card = std::mem::take(&mut self.card).with_theme(theme);
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.card = std::mem::take(&mut self.card).with_alignment(alignment);
    }

    pub fn set_font(&mut self, font: &str) {
        self.card = std::mem::take(&mut self.card).with_font(font);
    }

    /// Replace the whole card, e.g. with one decoded from a share link
    pub fn load(&mut self, card: CardState) {
        self.card = card;
    }

    /// Return every card field to its default. The step is unchanged.
    pub fn reset(&mut self) {
        debug!(step = self.step.label(), "Resetting card");
        self.card = CardState::default();
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Move one step forward.
    ///
    /// # Errors
    ///
    /// - `CardError::GuardRejected` leaving compose without recipient and message
    /// - `CardError::ExportInProgress` while an export runs
    /// - `CardError::InvalidOperation` when already on the share step
    pub fn next(&mut self) -> CardResult<WizardStep> {
        self.ensure_no_export()?;
        let next = match self.step {
            WizardStep::Compose => {
                if self.card.recipient().is_empty() {
                    return Err(CardError::GuardRejected("Recipient is empty".to_string()));
                }
                if self.card.message().is_empty() {
                    return Err(CardError::GuardRejected("Message is empty".to_string()));
                }
                WizardStep::Preview
            }
            WizardStep::Preview => WizardStep::Share,
            WizardStep::Share => {
                return Err(CardError::InvalidOperation(
                    "Already on the last step".to_string(),
                ))
            }
        };
        info!(from = self.step.label(), to = next.label(), "Wizard step");
        self.step = next;
        Ok(next)
    }

    /// Move one step back. Refused with `CardError::ExportInProgress` while
    /// an export runs.
    pub fn back(&mut self) -> CardResult<WizardStep> {
        self.ensure_no_export()?;
        let previous = match self.step {
            WizardStep::Compose => {
                return Err(CardError::InvalidOperation(
                    "Already on the first step".to_string(),
                ))
            }
            WizardStep::Preview => WizardStep::Compose,
            WizardStep::Share => WizardStep::Preview,
        };
        info!(from = self.step.label(), to = previous.label(), "Wizard step");
        self.step = previous;
        Ok(previous)
    }

    /// The preview step cannot be left until its export has finished
    fn ensure_no_export(&self) -> CardResult<()> {
        match self.flags.export_in_flight {
            Some(running) => Err(CardError::ExportInProgress(running)),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Export actions (preview step)
    // ------------------------------------------------------------------

    /// Format of the export currently running, if any
    pub fn exporting(&self) -> Option<ExportFormat> {
        self.flags.export_in_flight
    }

    /// Mark an export as started and return the card to export.
    ///
    /// # Errors
    ///
    /// - `CardError::InvalidOperation` outside the preview step
    /// - `CardError::ExportInProgress` while another export runs
    pub fn begin_export(&mut self, format: ExportFormat) -> CardResult<CardState> {
        if self.step != WizardStep::Preview {
            return Err(CardError::InvalidOperation(format!(
                "Export is only available in preview, not {}",
                self.step.label()
            )));
        }
        if let Some(running) = self.flags.export_in_flight {
            return Err(CardError::ExportInProgress(running));
        }

        self.flags.export_in_flight = Some(format);
        self.flags.delivered_until = None;
        debug!(%format, "Export started");
        Ok(self.card.clone())
    }

    /// Clear the in-flight flag; arm the delivered acknowledgment on success.
    pub fn finish_export<T>(&mut self, result: &CardResult<T>) {
        let format = self.flags.export_in_flight.take();
        match result {
            Ok(_) => {
                self.flags.delivered_until = Some(Instant::now() + ACK_DURATION);
                debug!(?format, "Export delivered");
            }
            Err(e) => {
                self.flags.delivered_until = None;
                warn!(?format, error = %e, "Export failed");
            }
        }
    }

    /// Export the current card and deliver it as one awaited operation.
    pub async fn export<R, S>(
        &mut self,
        pipeline: &ExportPipeline<R>,
        sink: &S,
        format: ExportFormat,
    ) -> CardResult<String>
    where
        R: Rasterizer,
        S: FileSink + ?Sized,
    {
        let card = self.begin_export(format)?;
        let result = pipeline.deliver(&card, format, sink).await;
        self.finish_export(&result);
        result
    }

    /// "Card sealed & delivered" acknowledgment is showing
    pub fn is_delivered(&self) -> bool {
        self.flags
            .delivered_until
            .is_some_and(|until| Instant::now() < until)
    }

    // ------------------------------------------------------------------
    // Share actions (share step)
    // ------------------------------------------------------------------

    /// Share link for the current card
    pub fn share_link(&self) -> ShareLink {
        ShareLink::new(&self.origin, &self.card)
    }

    /// Write the share link to the clipboard and arm the copied acknowledgment.
    ///
    /// # Errors
    ///
    /// - `CardError::InvalidOperation` outside the share step
    /// - `CardError::DeliveryFailed` if the clipboard refuses the write
    pub fn copy_link<C>(&mut self, clipboard: &C) -> CardResult<ShareLink>
    where
        C: Clipboard + ?Sized,
    {
        if self.step != WizardStep::Share {
            return Err(CardError::InvalidOperation(format!(
                "Copy link is only available in share, not {}",
                self.step.label()
            )));
        }

        let link = self.share_link();
        if let Err(e) = clipboard.set_text(link.as_str()) {
            self.flags.copied_until = None;
            warn!(error = %e, "Copy link failed");
            return Err(match e {
                CardError::DeliveryFailed(_) => e,
                other => CardError::DeliveryFailed(other.to_string()),
            });
        }

        self.flags.copied_until = Some(Instant::now() + ACK_DURATION);
        info!(len = link.as_str().len(), "Share link copied");
        Ok(link)
    }

    /// "Copied" acknowledgment is showing
    pub fn is_copied(&self) -> bool {
        self.flags
            .copied_until
            .is_some_and(|until| Instant::now() < until)
    }

    /// Drop acknowledgments whose deadline has passed. Returns whether
    /// anything changed.
    pub fn clear_expired(&mut self) -> bool {
        let now = Instant::now();
        let mut changed = false;
        for slot in [&mut self.flags.copied_until, &mut self.flags.delivered_until] {
            if slot.is_some_and(|until| now >= until) {
                *slot = None;
                changed = true;
            }
        }
        changed
    }
}
