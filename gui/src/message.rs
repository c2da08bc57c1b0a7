use std::path::PathBuf;

use bytes::Bytes;
use derive_more::{From, TryInto};
use engine::RequestError;

use crate::StringError;

#[derive(Debug, Clone, From)]
pub enum Message {
    Ui(UiMessage),
    Context(ContextMessage),
}

#[derive(Debug, Clone, From, TryInto)]
pub enum UiMessage {
    PosterForm(ui_messages::PosterForm),
    MessageDialog(ui_messages::MessageDialog),
    InputDialog(ui_messages::InputDialog),
}

/// Results of background work, handled by the context.
#[derive(Debug, Clone)]
pub enum ContextMessage {
    PosterFinished(Result<String, RequestError>),
    PreviewLoaded {
        url: String,
        bytes: Result<Bytes, RequestError>,
    },
    DownloadFinished(Result<PathBuf, StringError>),
    DismissNotification(u64),
}

pub mod ui_messages {
    use engine::poster::{ArtStyle, Model};
    use iced::widget::text_editor;

    #[derive(Debug, Clone)]
    pub enum PosterForm {
        TitleChanged(String),
        StyleSelected(ArtStyle),
        ModelSelected(Model),
        ApiKeyButtonPressed,
        ApiKeyEntered(String),
        Submit,
        Download,
        Share,
        DismissNotification,
    }

    #[derive(Debug, Clone)]
    pub enum MessageDialog {
        Confirm,
        EditAction(text_editor::Action),
    }

    #[derive(Debug, Clone)]
    pub enum InputDialog {
        Edit(String),
        Save,
        Cancel,
    }
}

macro_rules! into_message {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for Message {
            fn from(m: $t) -> Self {
                Message::Ui(m.into())
            }
        })+
    };
}

into_message!(
    ui_messages::PosterForm,
    ui_messages::MessageDialog,
    ui_messages::InputDialog,
);
