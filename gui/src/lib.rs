use std::{fmt, path::PathBuf};

use color_eyre::{Result, eyre::WrapErr as _};
use engine::{ShareBox, image_api::openai::DEFAULT_BASE_URL};
use iced::{
    Element, Font, Length, Task,
    font::{self},
    padding,
    widget::{container, scrollable, text},
};

use crate::{
    context::{Config, Context},
    message::Message,
    share::SystemShare,
    state::{Modal, PosterForm, State, StateExt},
};

pub mod context;
pub mod message;
pub mod share;
pub mod state;

pub const APP_NAME: &str = "AI Movie Poster Generator";

pub struct Gui {
    state: Box<dyn State>,
    ctx: Context,
}

impl Gui {
    pub fn new(cfg: Config) -> Self {
        let share = SystemShare::detect().map(|s| Box::new(s) as ShareBox);
        Gui {
            state: PosterForm::new().boxed(),
            ctx: Context::from_config(cfg, share),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match self.try_update(message) {
            Ok(task) => task,
            Err(e) => {
                self.state = Modal::error(self.state.clone(), &e).boxed();
                Task::none()
            }
        }
    }

    fn try_update(&mut self, message: Message) -> Result<Task<Message>> {
        match message {
            Message::Ui(ui_message) => {
                let cmd = self.state.update(ui_message, &mut self.ctx)?;
                if let Some(new_state) = cmd.transition {
                    self.state = new_state;
                }
                Ok(cmd.task.unwrap_or(Task::none()))
            }
            Message::Context(context_message) => self.ctx.update(context_message),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.state.view(&self.ctx).map(Message::from)
    }
}

/// Error type for results that have to travel inside (cloneable) messages.
#[derive(Debug, Clone)]
pub struct StringError(String);

impl From<color_eyre::Report> for StringError {
    fn from(e: color_eyre::Report) -> Self {
        Self(format!("{e:?}"))
    }
}

impl fmt::Display for StringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StringError {}

pub fn download_dir() -> Result<PathBuf> {
    dirs::download_dir()
        .map(Ok)
        .unwrap_or_else(std::env::current_dir)
        .wrap_err("Couldn't find a directory for downloads")
}

/// Nothing is read from disk. A key baked in at build time via `OPENAI_API_KEY` seeds the
/// credential field.
pub fn load_config() -> Result<Config> {
    let seed_credential = option_env!("OPENAI_API_KEY")
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(String::from);

    Ok(Config {
        api_base: DEFAULT_BASE_URL.to_string(),
        download_dir: download_dir()?,
        seed_credential,
    })
}

macro_rules! elem_list {
    ($($elems:expr),+ $(,)?) => {
        [$(iced::Element::from($elems)),*]
    };
}
pub(crate) use elem_list;

pub trait ElemHelper<'a, T> {
    fn into_elem(self) -> Element<'a, T>;
}

impl<'a, ElemT, T: Into<Element<'a, ElemT>>> ElemHelper<'a, ElemT> for T {
    fn into_elem(self) -> Element<'a, ElemT> {
        self.into()
    }
}

fn italic_text(t: &str) -> iced::widget::Text<'_> {
    iced::widget::text(t).font(italic_default_font())
}

fn italic_default_font() -> Font {
    Font {
        style: font::Style::Italic,
        ..Font::DEFAULT
    }
}

fn bold_text<'a>(t: impl text::IntoFragment<'a>) -> iced::widget::Text<'a> {
    iced::widget::text(t).font(bold_default_font())
}

fn bold_default_font() -> Font {
    Font {
        weight: font::Weight::Bold,
        ..Font::DEFAULT
    }
}

fn top_level_container<'a, T: Send + 'static>(
    elem: impl Into<Element<'a, T>>,
) -> container::Container<'a, T> {
    container(
        container(scrollable(
            container(elem).padding(padding::all(10).right(20)),
        ))
        .padding(20)
        .max_width(960),
    )
    .center(Length::Fill)
}

pub trait TryIntoExt<T> {
    fn try_into_ex(self) -> color_eyre::Result<T>;
}

impl<T, Target, E> TryIntoExt<Target> for T
where
    T: TryInto<Target, Error = E>,
    T: fmt::Debug,
    T: Clone,
    E: std::error::Error + Send + Sync + 'static,
{
    fn try_into_ex(self) -> color_eyre::Result<Target> {
        self.clone()
            .try_into()
            .with_context(|| format!("{self:#?}"))
    }
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::eyre;

    use super::*;
    use crate::message::{UiMessage, ui_messages};

    #[test]
    fn mismatched_message_is_an_error() {
        let msg: UiMessage = ui_messages::InputDialog::Save.into();
        let res: Result<ui_messages::PosterForm> = msg.try_into_ex();
        let err = res.unwrap_err();
        assert!(format!("{err:?}").contains("InputDialog"), "{err:?}");

        let msg: UiMessage = ui_messages::PosterForm::Submit.into();
        let res: Result<ui_messages::PosterForm> = msg.try_into_ex();
        assert!(matches!(res, Ok(ui_messages::PosterForm::Submit)));
    }

    #[test]
    fn string_error_keeps_the_report_chain() {
        let report = Err::<(), _>(eyre!("disk full"))
            .wrap_err("Couldn't write poster")
            .unwrap_err();
        let e = StringError::from(report);
        assert!(e.to_string().contains("Couldn't write poster"));
        assert!(e.to_string().contains("disk full"));
    }
}
