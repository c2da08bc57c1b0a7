use crate::{
    TryIntoExt,
    context::Context,
    message::{UiMessage, ui_messages::InputDialog as MyMessage},
    state::{Dialog, modal::DialogResult},
};
use color_eyre::Result;
use iced::{
    Element, Task,
    widget::{button, column, row, space, text, text_input},
};

use super::modal_outer_container;

/// A single-line input that produces a Task<UiMessage> when saved
#[derive(Clone)]
pub struct InputDialog<F> {
    title: String,
    description: Option<String>,
    input: String,
    placeholder: String,
    secure: bool,
    on_save: F,
}

impl<F> std::fmt::Debug for InputDialog<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let input = if self.secure { "<hidden>" } else { &self.input };
        f.debug_struct("InputDialog")
            .field("title", &self.title)
            .field("input", &input)
            .field("secure", &self.secure)
            .field("on_save", &"...")
            .finish()
    }
}

impl<F> InputDialog<F>
where
    F: Fn(String) -> Task<UiMessage> + Clone + Send + Sync + 'static,
{
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>, on_save: F) -> Self {
        Self {
            title: title.into(),
            description: None,
            input: String::new(),
            placeholder: placeholder.into(),
            secure: false,
            on_save,
        }
    }

    /// Masks the typed text, for passwords and keys.
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[cfg(test)]
    pub fn value(&self) -> &str {
        &self.input
    }

    /// Starts with `value` in the field, so saving unchanged keeps it.
    pub fn with_initial(mut self, value: impl Into<String>) -> Self {
        self.input = value.into();
        self
    }
}

impl<F> Dialog for InputDialog<F>
where
    F: Fn(String) -> Task<UiMessage> + Clone + Send + Sync + 'static,
{
    fn update(&mut self, event: UiMessage, _ctx: &mut Context) -> Result<DialogResult> {
        use MyMessage::*;
        match event.try_into_ex()? {
            Edit(content) => {
                self.input = content;
                Ok(DialogResult::Stay)
            }
            Save => {
                let task = (self.on_save)(std::mem::take(&mut self.input));
                Ok(DialogResult::Close(task))
            }
            Cancel => Ok(DialogResult::Close(Task::none())),
        }
    }

    fn view<'a>(&'a self, _ctx: &'a Context) -> Element<'a, UiMessage> {
        let mut content = column![text(&self.title).size(20)].spacing(10);
        if let Some(description) = &self.description {
            content = content.push(text(description));
        }

        modal_outer_container(
            content
                .push(
                    text_input(&self.placeholder, &self.input)
                        .secure(self.secure)
                        .on_submit(MyMessage::Save.into())
                        .on_input(|a| MyMessage::Edit(a).into()),
                )
                .push(
                    row![
                        space::horizontal(),
                        button("Cancel").on_press(MyMessage::Cancel.into()),
                        button("Ok").on_press(MyMessage::Save.into()),
                    ]
                    .spacing(10),
                ),
        )
        .into()
    }
}
