use std::{
    path::{Path, PathBuf},
    pin::Pin,
};

use bytes::Bytes;
use color_eyre::{
    Result,
    eyre::{WrapErr as _, bail},
};
use log::{debug, error, info, warn};
use nonempty::NonEmpty;

use crate::{
    error::{InputError, RequestError},
    image_api::{Credential, GenerationRequest, ImageDescriptor, ImgApiBox},
    poster::{ArtStyle, Model, PosterParams, build_prompt, poster_filename},
    share::{SharePayload, ShareBox},
};

pub type Submission = Pin<Box<dyn Future<Output = Result<String, RequestError>> + Send>>;
pub type Download = Pin<Box<dyn Future<Output = Result<PathBuf>> + Send>>;
pub type Fetch = Pin<Box<dyn Future<Output = Result<Bytes, RequestError>> + Send>>;

pub const SUCCESS_DESCRIPTION: &str = "Poster generated successfully!";
pub const FAILURE_DESCRIPTION: &str = "Sorry, an error occurred while generating the poster.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Style(ArtStyle),
    Model(Model),
    Credential(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Busy,
    Succeeded {
        url: String,
    },
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub description: String,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success",
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error",
            description: description.into(),
        }
    }
}

impl From<InputError> for Notification {
    fn from(e: InputError) -> Self {
        Notification::error(e.to_string())
    }
}

/// Holds the form inputs and drives one generation request at a time.
pub struct PosterWorkflow {
    params: PosterParams,
    credential: Credential,
    api: ImgApiBox,
    share: Option<ShareBox>,
    status: Status,
}

impl PosterWorkflow {
    pub fn new(api: ImgApiBox, share: Option<ShareBox>) -> Self {
        Self {
            params: PosterParams::default(),
            credential: Credential::default(),
            api,
            share,
            status: Status::Idle,
        }
    }

    pub fn update_field(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Title(title) => self.params.title = title,
            FieldUpdate::Style(style) => self.params.style = Some(style),
            FieldUpdate::Model(model) => self.params.model = model,
            FieldUpdate::Credential(secret) => self.credential = Credential::new(secret),
        }
    }

    pub fn params(&self) -> &PosterParams {
        &self.params
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status == Status::Busy
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_present()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// URL of the current poster, if the last submission succeeded.
    pub fn result(&self) -> Option<&str> {
        match &self.status {
            Status::Succeeded { url } => Some(url),
            _ => None,
        }
    }

    /// The prompt the current inputs would produce.
    pub fn prompt(&self) -> Option<String> {
        self.params
            .style
            .map(|style| build_prompt(&self.params.title, style))
    }

    /// Validates the inputs and starts a request. The returned future performs exactly one
    /// call to the image API; its output has to be handed to [`PosterWorkflow::finish`].
    pub fn submit(&mut self) -> Result<Submission, InputError> {
        if self.is_busy() {
            return Err(InputError::Busy);
        }
        if self.params.title.trim().is_empty() {
            return Err(InputError::EmptyTitle);
        }
        let style = self.params.style.ok_or(InputError::MissingStyle)?;
        if !self.credential.is_present() {
            return Err(InputError::MissingCredential);
        }

        let req = GenerationRequest {
            credential: self.credential.clone(),
            model: self.params.model,
            prompt: build_prompt(&self.params.title, style),
        };
        info!("Generating poster for {:?} with {}", self.params.title, req.model.id());
        self.status = Status::Busy;

        let api = self.api.clone();
        Ok(Box::pin(async move {
            let images = api.generate(&req).await?;
            first_image_url(images)
        }))
    }

    pub fn finish(&mut self, result: Result<String, RequestError>) -> Result<Notification> {
        if !self.is_busy() {
            bail!("Received a poster result without a submission in flight");
        }

        Ok(match result {
            Ok(url) => {
                info!("Poster ready: {url}");
                self.status = Status::Succeeded { url };
                Notification::success(SUCCESS_DESCRIPTION)
            }
            Err(e) => {
                error!("Poster generation failed: {e:?}");
                self.status = Status::Failed;
                Notification::error(FAILURE_DESCRIPTION)
            }
        })
    }

    pub fn filename(&self) -> String {
        poster_filename(&self.params.title)
    }

    /// Loads the bytes of the current poster.
    pub fn fetch_result(&self) -> Option<Fetch> {
        let url = self.result()?.to_string();
        let api = self.api.clone();
        Some(Box::pin(async move { api.fetch(&url).await }))
    }

    /// Saves the current poster into `dir`. `None` when there is nothing to save.
    pub fn download(&self, dir: &Path) -> Option<Download> {
        let fetch = self.fetch_result()?;
        let path = dir.join(self.filename());

        Some(Box::pin(async move {
            let bytes = fetch.await?;
            tokio::fs::write(&path, &bytes)
                .await
                .wrap_err_with(|| format!("Couldn't write {}", path.display()))?;
            info!("Saved poster to {}", path.display());
            Ok(path)
        }))
    }

    pub fn can_share(&self) -> bool {
        self.share.is_some()
    }

    pub fn share_payload(&self) -> Option<SharePayload> {
        self.result()
            .map(|url| SharePayload::for_poster(&self.params.title, self.params.style, url))
    }

    /// Best effort: failures are logged and otherwise dropped.
    pub fn share(&self) {
        let (Some(target), Some(payload)) = (&self.share, self.share_payload()) else {
            return;
        };
        if let Err(e) = target.share(&payload) {
            warn!("Error sharing: {e:?}");
        }
    }
}

fn first_image_url(images: Vec<ImageDescriptor>) -> Result<String, RequestError> {
    let first = NonEmpty::from_vec(images).ok_or(RequestError::NoImages)?.head;
    if let Some(revised) = &first.revised_prompt {
        debug!("Prompt revised by the image API: {revised}");
    }
    first.url.ok_or(RequestError::MissingUrl)
}
