use std::sync::{mpsc, Arc};

use fakebuster_core::{Effect, Notification};
use fakebuster_engine::{
    ClientSettings, EngineEvent, EngineHandle, EventSink, Notifier, ReqwestClassifier,
};
use fakebuster_logging::{fb_info, fb_warn};

use super::app::Inbox;

/// Executes core effects: backend calls go to the engine, notifications to stderr.
pub struct EffectRunner {
    engine: EngineHandle,
    notifier: Arc<dyn Notifier>,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, inbox: mpsc::Sender<Inbox>) -> anyhow::Result<Self> {
        let classifier = Arc::new(ReqwestClassifier::new(settings)?);
        let engine = EngineHandle::new(classifier, Arc::new(InboxSink { inbox }))?;
        Ok(Self {
            engine,
            notifier: Arc::new(StderrNotifier),
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Classify {
                    generation,
                    article,
                } => {
                    fb_info!(
                        "Classify generation={} article_len={}",
                        generation,
                        article.len()
                    );
                    self.engine.classify(generation, article);
                }
                Effect::Notify(notification) => self.notifier.notify(notification),
            }
        }
    }

    pub fn related_news(&self, query: String) {
        fb_info!("RelatedNews query_len={}", query.len());
        self.engine.related_news(query);
    }
}

struct InboxSink {
    inbox: mpsc::Sender<Inbox>,
}

impl EventSink for InboxSink {
    fn emit(&self, event: EngineEvent) {
        if let EngineEvent::AnalysisCompleted {
            generation,
            result: Err(err),
        } = &event
        {
            fb_warn!("Classification {} failed: {}", generation, err);
        }
        let _ = self.inbox.send(Inbox::Engine(event));
    }
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        fb_info!("Notify {:?}", notification);
        eprintln!("! {}", notification.message());
    }
}
