use std::{path::PathBuf, time::Duration};

use color_eyre::Result;
use engine::{
    ImgApiBox, OpenAiImages, PosterWorkflow, ShareBox,
    workflow::{FieldUpdate, Notification},
};
use iced::{Task, widget::image::Handle as ImgHandle};
use log::{debug, error, warn};

use crate::{
    StringError,
    message::{ContextMessage, Message},
};

const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(4);

/// Startup settings. The seed credential is the only value taken from outside.
#[derive(Clone)]
pub struct Config {
    pub api_base: String,
    pub download_dir: PathBuf,
    pub seed_credential: Option<String>,
}

/// Preview of the current poster. Only meaningful while the workflow holds a result.
#[derive(Debug, Clone, Default)]
pub enum Preview {
    #[default]
    Loading,
    Loaded(ImgHandle),
    Unavailable,
}

pub struct Context {
    pub config: Config,
    pub workflow: PosterWorkflow,
    pub preview: Preview,
    pub notification: Option<(u64, Notification)>,
    notification_counter: u64,
}

impl Context {
    pub fn from_config(config: Config, share: Option<ShareBox>) -> Self {
        let api: ImgApiBox = Box::new(OpenAiImages::new(config.api_base.clone()));
        Self::with_api(config, api, share)
    }

    pub fn with_api(config: Config, api: ImgApiBox, share: Option<ShareBox>) -> Self {
        let mut workflow = PosterWorkflow::new(api, share);
        if let Some(key) = &config.seed_credential {
            workflow.update_field(FieldUpdate::Credential(key.clone()));
        }
        Self {
            config,
            workflow,
            preview: Preview::Loading,
            notification: None,
            notification_counter: 0,
        }
    }

    pub fn update(&mut self, message: ContextMessage) -> Result<Task<Message>> {
        use ContextMessage::*;
        match message {
            PosterFinished(result) => {
                let notification = self.workflow.finish(result)?;
                let preview = self.load_preview();
                Ok(Task::batch([self.notify(notification), preview]))
            }

            PreviewLoaded { url, bytes } => {
                if self.workflow.result() != Some(url.as_str()) {
                    debug!("Dropping stale preview for {url}");
                    return Ok(Task::none());
                }
                self.preview = match bytes {
                    Ok(bytes) => Preview::Loaded(ImgHandle::from_bytes(bytes)),
                    Err(e) => {
                        warn!("Couldn't load poster preview: {e:?}");
                        Preview::Unavailable
                    }
                };
                Ok(Task::none())
            }

            DownloadFinished(Ok(path)) => {
                Ok(self.notify(Notification::success(format!(
                    "Saved poster to {}",
                    path.display()
                ))))
            }

            DownloadFinished(Err(e)) => {
                error!("Download failed: {e}");
                Ok(self.notify(Notification::error("Sorry, the poster couldn't be saved.")))
            }

            DismissNotification(id) => {
                if matches!(self.notification, Some((current, _)) if current == id) {
                    self.notification = None;
                }
                Ok(Task::none())
            }
        }
    }

    pub fn submit(&mut self) -> Task<Message> {
        match self.workflow.submit() {
            Ok(submission) => {
                self.preview = Preview::Loading;
                Task::perform(submission, |res| ContextMessage::PosterFinished(res).into())
            }
            Err(e) => self.notify(e.into()),
        }
    }

    pub fn download(&self) -> Task<Message> {
        match self.workflow.download(&self.config.download_dir) {
            Some(save) => Task::perform(save, |res| {
                ContextMessage::DownloadFinished(res.map_err(StringError::from)).into()
            }),
            None => Task::none(),
        }
    }

    /// Shows `notification` until it is replaced or times out.
    pub fn notify(&mut self, notification: Notification) -> Task<Message> {
        self.notification_counter += 1;
        let id = self.notification_counter;
        self.notification = Some((id, notification));
        Task::perform(
            async { tokio::time::sleep(NOTIFICATION_TIMEOUT).await },
            move |_| ContextMessage::DismissNotification(id).into(),
        )
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    fn load_preview(&mut self) -> Task<Message> {
        self.preview = Preview::Loading;
        let Some(url) = self.workflow.result().map(str::to_string) else {
            return Task::none();
        };
        let Some(fetch) = self.workflow.fetch_result() else {
            return Task::none();
        };
        Task::perform(fetch, move |bytes| {
            ContextMessage::PreviewLoaded { url, bytes }.into()
        })
    }
}


#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use engine::{
        InputError, RequestError,
        workflow::{FAILURE_DESCRIPTION, NotificationKind, SUCCESS_DESCRIPTION},
    };

    use super::{
        testing::{POSTER_URL, context},
        *,
    };

    fn description(ctx: &Context) -> Option<&str> {
        ctx.notification
            .as_ref()
            .map(|(_, n)| n.description.as_str())
    }

    #[tokio::test]
    async fn missing_key_only_notifies() {
        let mut ctx = context(None);
        let _ = ctx.submit();
        assert!(!ctx.workflow.is_busy());
        assert_eq!(
            description(&ctx),
            Some(InputError::MissingCredential.to_string().as_str())
        );
    }

    #[tokio::test]
    async fn seeded_key_allows_submission() -> Result<()> {
        let mut ctx = context(Some("sk-seed"));
        assert!(ctx.workflow.has_credential());
        let _ = ctx.submit();
        assert!(ctx.workflow.is_busy());

        let _ = ctx.update(ContextMessage::PosterFinished(Ok(POSTER_URL.into())))?;
        assert_eq!(ctx.workflow.result(), Some(POSTER_URL));
        assert_eq!(description(&ctx), Some(SUCCESS_DESCRIPTION));
        assert!(matches!(ctx.preview, Preview::Loading));

        let _ = ctx.update(ContextMessage::PreviewLoaded {
            url: "https://img.example/old.png".into(),
            bytes: Ok(Bytes::from_static(b"old")),
        })?;
        assert!(matches!(ctx.preview, Preview::Loading));

        let _ = ctx.update(ContextMessage::PreviewLoaded {
            url: POSTER_URL.into(),
            bytes: Ok(Bytes::from_static(b"png")),
        })?;
        assert!(matches!(ctx.preview, Preview::Loaded(_)));
        Ok(())
    }

    #[tokio::test]
    async fn failed_preview_is_reported_and_keeps_the_result() -> Result<()> {
        let mut ctx = context(Some("sk-seed"));
        let _ = ctx.submit();
        let _ = ctx.update(ContextMessage::PosterFinished(Ok(POSTER_URL.into())))?;

        let _ = ctx.update(ContextMessage::PreviewLoaded {
            url: POSTER_URL.into(),
            bytes: Err(RequestError::MissingUrl),
        })?;
        assert!(matches!(ctx.preview, Preview::Unavailable));
        assert_eq!(ctx.workflow.result(), Some(POSTER_URL));
        assert!(ctx.workflow.download(&ctx.config.download_dir).is_some());

        // a new submission starts loading again
        let _ = ctx.submit();
        assert!(matches!(ctx.preview, Preview::Loading));
        Ok(())
    }

    #[tokio::test]
    async fn failures_notify_and_reset_preview() -> Result<()> {
        let mut ctx = context(Some("sk-seed"));
        let _ = ctx.submit();
        let _ = ctx.update(ContextMessage::PosterFinished(Err(RequestError::NoImages)))?;

        let (_, notification) = ctx.notification.clone().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.description, FAILURE_DESCRIPTION);
        assert!(!matches!(ctx.preview, Preview::Loaded(_)));
        assert_eq!(ctx.workflow.result(), None);
        assert!(!ctx.workflow.is_busy());
        Ok(())
    }

    #[tokio::test]
    async fn only_the_current_notification_times_out() -> Result<()> {
        let mut ctx = context(None);
        let _ = ctx.notify(Notification::success("first"));
        let first = ctx.notification.as_ref().map(|(id, _)| *id).unwrap();
        let _ = ctx.notify(Notification::success("second"));

        let _ = ctx.update(ContextMessage::DismissNotification(first))?;
        assert_eq!(description(&ctx), Some("second"));

        let current = ctx.notification.as_ref().map(|(id, _)| *id).unwrap();
        let _ = ctx.update(ContextMessage::DismissNotification(current))?;
        assert!(ctx.notification.is_none());
        Ok(())
    }

    #[test]
    fn download_without_poster_does_nothing() {
        let ctx = context(Some("sk-seed"));
        assert!(ctx.workflow.download(&ctx.config.download_dir).is_none());
    }
}
