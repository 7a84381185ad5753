use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use fakebuster_core::Generation;
use fakebuster_logging::{fb_debug, fb_warn};

use crate::{Classifier, EngineEvent, ReqwestClassifier};

enum EngineCommand {
    Classify {
        generation: Generation,
        article: String,
    },
    RelatedNews {
        query: String,
    },
}

/// Receives engine events on the worker thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs backend calls on a background tokio runtime.
///
/// Requests are never cancelled; each completion is reported through the
/// sink together with the generation it was issued for.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        classifier: Arc<ReqwestClassifier>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("fakebuster-engine".into())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let classifier = classifier.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(classifier.as_ref(), command, sink.as_ref()).await;
                    });
                }
                fb_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn classify(&self, generation: Generation, article: impl Into<String>) {
        self.send(EngineCommand::Classify {
            generation,
            article: article.into(),
        });
    }

    pub fn related_news(&self, query: impl Into<String>) {
        self.send(EngineCommand::RelatedNews {
            query: query.into(),
        });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            fb_warn!("engine worker is gone; command dropped");
        }
    }
}

async fn handle_command(
    classifier: &ReqwestClassifier,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::Classify {
            generation,
            article,
        } => {
            let result = classifier.classify(&article).await;
            sink.emit(EngineEvent::AnalysisCompleted { generation, result });
        }
        EngineCommand::RelatedNews { query } => {
            let result = classifier.related_news(&query).await;
            sink.emit(EngineEvent::RelatedNewsCompleted { query, result });
        }
    }
}
