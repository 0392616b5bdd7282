//! Coarse progress reporting for layer uploads.

use tokio::sync::mpsc;

/// Number of ticks reported by one layer upload.
pub const UPLOAD_STEPS: u8 = 4;

/// Stage reached by a layer upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UploadStage {
    /// Asking Felt for upload permission.
    Requesting = 1,
    /// Presigned target received.
    Granted = 2,
    /// File content accepted by storage.
    Uploaded = 3,
    /// Felt notified, layer is processing.
    Finished = 4,
}

impl UploadStage {
    /// 1-based step number.
    pub fn step(self) -> u8 {
        self as u8
    }

    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Requesting => "requesting upload",
            Self::Granted => "upload granted",
            Self::Uploaded => "content uploaded",
            Self::Finished => "upload finished",
        }
    }
}

/// Receives upload progress ticks.
pub trait ProgressSink: Send + Sync {
    fn tick(&self, stage: UploadStage);
}

/// Logs each tick through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn tick(&self, stage: UploadStage) {
        tracing::info!("[{}/{}] {}", stage.step(), UPLOAD_STEPS, stage.label());
    }
}

/// Discards ticks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn tick(&self, _stage: UploadStage) {}
}

/// Forwards ticks over a channel, for a UI running elsewhere.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<UploadStage>,
}

impl ChannelProgress {
    /// Create a sink and the receiver that observes it.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<UploadStage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelProgress {
    fn tick(&self, stage: UploadStage) {
        // Receiver gone means nobody is watching.
        let _ = self.tx.send(stage);
    }
}
