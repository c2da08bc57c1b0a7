use std::fmt;

use color_eyre::{Report, Result};
use iced::{
    Border, Color, Element, Length, Task,
    widget::{Container, container, opaque, scrollable, space, stack},
};

use crate::{
    context::Context,
    message::{Message, UiMessage},
    state::{
        State, StateCommand, cmd,
        modal::message::MessageDialog,
    },
};

pub mod input;
pub mod message;

pub trait Dialog: fmt::Debug {
    fn update(&mut self, event: UiMessage, ctx: &mut Context) -> Result<DialogResult>;
    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, UiMessage>;
}

pub enum DialogResult {
    Stay,
    Close(Task<UiMessage>),
}

#[derive(Debug)]
pub struct Modal<D: Dialog> {
    parent: Box<dyn State>,
    dialog: D,
}

/// Shows an error report, including its chain, above `parent`.
impl Modal<MessageDialog> {
    pub fn error(parent: Box<dyn State>, report: &Report) -> Self {
        Self::new(parent, MessageDialog::new("Error".into(), &format!("{report:?}")))
    }
}

impl<D: Dialog> Modal<D> {
    pub fn new(parent: Box<dyn State>, dialog: D) -> Self {
        Self { parent, dialog }
    }
}

impl<D: Dialog + Clone + 'static> State for Modal<D> {
    fn update(&mut self, event: UiMessage, ctx: &mut Context) -> Result<StateCommand> {
        match self.dialog.update(event, ctx)? {
            DialogResult::Stay => cmd::none(),
            DialogResult::Close(task) => {
                cmd::transition_with_task(self.parent.clone(), task.map(Message::from))
            }
        }
    }

    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, UiMessage> {
        stack![
            self.parent.view(ctx),
            opaque(dim_layer()),
            container(self.dialog.view(ctx)).center(Length::Fill)
        ]
        .into()
    }

    fn clone(&self) -> Box<dyn State> {
        Box::new(Self {
            parent: self.parent.clone(),
            dialog: self.dialog.clone(),
        })
    }
}

fn dim_layer() -> Element<'static, UiMessage> {
    container(space())
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| container::Style::default().background(Color::from_rgba(0., 0., 0., 0.1)))
        .into()
}

fn modal_outer_container<'a>(child: impl Into<Element<'a, UiMessage>>) -> Container<'a, UiMessage> {
    container(scrollable(child))
        .height(Length::Shrink)
        .padding(20)
        .max_width(700)
        .max_height(700)
        .style(|_theme| container::background(Color::WHITE).border(Border::default().rounded(10)))
}
