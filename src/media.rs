//! Media attachment downloads.

use std::sync::Arc;

use crate::engine::{DownloadMediaCallback, ImEngine};
use crate::error::{ErrorCode, ImError};
use crate::rx::{Flow, FlowEmitter};
use crate::types::{ConversationType, DownloadEvent, MediaType};

/// Media operations.
#[derive(Clone)]
pub struct MediaManager {
    engine: Arc<dyn ImEngine>,
}

impl MediaManager {
    pub(crate) fn new(engine: Arc<dyn ImEngine>) -> Self {
        Self { engine }
    }

    /// Download a media attachment, observing progress.
    ///
    /// The flow emits [`DownloadEvent::Progress`] events, then one
    /// [`DownloadEvent::Done`] and closes.
    ///
    /// # Example
    /// ```no_run
    /// # use futures::StreamExt;
    /// # use rx_imlib::{ConversationType, DownloadEvent, MediaType, RxImClient};
    /// # async fn demo(client: &RxImClient) -> rx_imlib::Result<()> {
    /// let mut download = client
    ///     .media()
    ///     .download(
    ///         ConversationType::Private,
    ///         "peer-id",
    ///         MediaType::Image,
    ///         "https://cdn.example.com/img.png",
    ///     )
    ///     .subscribe();
    /// while let Some(event) = download.next().await {
    ///     match event? {
    ///         DownloadEvent::Progress(pct) => println!("{pct}%"),
    ///         DownloadEvent::Done { media_id } => println!("done: {media_id:?}"),
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn download(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        media_type: MediaType,
        url: impl Into<String>,
    ) -> Flow<DownloadEvent> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        let url = url.into();
        Flow::create(move |emitter| {
            engine.download_media(
                conversation_type,
                target_id,
                media_type,
                url,
                Box::new(DownloadForwarder { emitter }),
            );
        })
    }
}

struct DownloadForwarder {
    emitter: FlowEmitter<DownloadEvent>,
}

impl DownloadMediaCallback for DownloadForwarder {
    fn on_progress(&self, progress: u8) {
        self.emitter.emit(DownloadEvent::Progress(progress));
    }

    fn on_success(&self, media_id: Option<String>) {
        self.emitter.emit(DownloadEvent::Done { media_id });
        self.emitter.finish();
    }

    fn on_error(&self, code: Option<ErrorCode>) {
        self.emitter.fail(ImError::Operation { code });
    }
}
