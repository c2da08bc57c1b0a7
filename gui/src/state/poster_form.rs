use color_eyre::Result;
use engine::{
    poster::{ArtStyle, Model},
    workflow::{FieldUpdate, NotificationKind},
};
use iced::{
    Alignment, Border, Color, Element, Length, Task,
    widget::{
        self, Column, Container, button, column, container, pick_list, row, space, text,
        text_input,
    },
};
use strum::IntoEnumIterator;

use crate::{
    ElemHelper, TryIntoExt, bold_text,
    context::{Context, Preview},
    elem_list, italic_text,
    message::{UiMessage, ui_messages::PosterForm as MyMessage},
    state::{
        Modal, State, StateCommand, StateExt, cmd, modal::input::InputDialog,
    },
    top_level_container,
};

const CARD_WIDTH: u32 = 420;

#[derive(Debug, Clone)]
pub struct PosterForm;

impl PosterForm {
    pub fn new() -> Self {
        Self
    }

    fn open_api_key_dialog(&self, ctx: &Context) -> Result<StateCommand> {
        let dialog = api_key_dialog(ctx.workflow.credential().expose());
        cmd::transition(Modal::new(State::clone(self), dialog))
    }
}

/// Secure key entry, prefilled with the current key so confirming without edits keeps it.
fn api_key_dialog(current: &str) -> InputDialog<fn(String) -> Task<UiMessage>> {
    let on_save: fn(String) -> Task<UiMessage> = key_entered;
    InputDialog::new("OpenAI API Key", "sk-...", on_save)
        .secure()
        .with_initial(current)
        .description(indoc::indoc! {"
            Enter your OpenAI API key to use the poster generator. The key is kept in
            memory only and is sent nowhere but to OpenAI.

            Don't have an API key? Get one from https://platform.openai.com/api-keys
        "})
}

fn key_entered(key: String) -> Task<UiMessage> {
    Task::done(MyMessage::ApiKeyEntered(key).into())
}

impl State for PosterForm {
    fn update(&mut self, event: UiMessage, ctx: &mut Context) -> Result<StateCommand> {
        use MyMessage::*;
        match event.try_into_ex()? {
            TitleChanged(title) => {
                ctx.workflow.update_field(FieldUpdate::Title(title));
                cmd::none()
            }
            StyleSelected(style) => {
                ctx.workflow.update_field(FieldUpdate::Style(style));
                cmd::none()
            }
            ModelSelected(model) => {
                ctx.workflow.update_field(FieldUpdate::Model(model));
                cmd::none()
            }
            ApiKeyButtonPressed => self.open_api_key_dialog(ctx),
            ApiKeyEntered(key) => {
                ctx.workflow.update_field(FieldUpdate::Credential(key));
                cmd::none()
            }
            Submit => cmd::task(ctx.submit()),
            Download => cmd::task(ctx.download()),
            Share => {
                ctx.workflow.share();
                cmd::none()
            }
            DismissNotification => {
                ctx.dismiss_notification();
                cmd::none()
            }
        }
    }

    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, UiMessage> {
        let key_label = if ctx.workflow.has_credential() {
            "Update API Key"
        } else {
            "Enter API Key"
        };

        let mut page = Column::new()
            .spacing(20)
            .align_x(Alignment::Center)
            .width(Length::Fill);
        if let Some((_, notification)) = &ctx.notification {
            page = page.push(notification_banner(
                notification.kind,
                notification.title,
                &notification.description,
            ));
        }

        page = page.extend(elem_list![
            bold_text("AI Movie Poster Generator").size(32),
            text(
                "Transform your favorite movies into unique artistic posters using AI. \
                 Simply enter a movie title and choose an art style to create something amazing."
            )
            .center(),
            button(key_label).on_press(MyMessage::ApiKeyButtonPressed.into()),
            row![form_card(ctx), result_card(ctx)].spacing(20),
        ]);

        top_level_container(page).into()
    }

    fn clone(&self) -> Box<dyn State> {
        Clone::clone(self).boxed()
    }
}

fn form_card(ctx: &Context) -> Container<'_, UiMessage> {
    let params = ctx.workflow.params();
    let busy = ctx.workflow.is_busy();

    card(column![
        bold_text("Create Your Poster").size(20),
        text("Fill in the details below to generate your custom movie poster"),
        space().height(10),
        text("Movie Title"),
        text_input("Enter a movie title", &params.title)
            .on_input(|s| MyMessage::TitleChanged(s).into())
            .on_submit_maybe((!busy).then(|| MyMessage::Submit.into())),
        text("Art Style"),
        pick_list(ArtStyle::iter().collect::<Vec<_>>(), params.style, |s| {
            MyMessage::StyleSelected(s).into()
        })
        .placeholder("Select an art style")
        .width(Length::Fill),
        text("AI Model"),
        pick_list(Model::iter().collect::<Vec<_>>(), Some(params.model), |m| {
            MyMessage::ModelSelected(m).into()
        })
        .width(Length::Fill),
        space().height(10),
        button(if busy { "Generating..." } else { "Generate Poster" })
            .width(Length::Fill)
            .on_press_maybe((!busy).then(|| MyMessage::Submit.into())),
    ])
}

fn result_card(ctx: &Context) -> Container<'_, UiMessage> {
    let workflow = &ctx.workflow;
    let params = workflow.params();
    let style_label = params.style.map(|s| s.value()).unwrap_or_default();

    let mut content = Column::new().spacing(10).push(bold_text("Your Poster").size(20));

    match workflow.result() {
        _ if workflow.is_busy() => {
            content = content.push(text("Your generated poster will appear here"));
            content = content.push(centered(italic_text("Creating your masterpiece...")));
        }
        Some(url) => {
            content = content.push(text!(
                r#"Generated poster for "{}" in {} style"#,
                params.title,
                style_label
            ));
            content = content.push(match &ctx.preview {
                Preview::Loaded(handle) => centered(widget::image(handle).width(320)),
                Preview::Loading => centered(italic_text("Loading preview...")),
                Preview::Unavailable => centered(
                    column![
                        italic_text("Preview unavailable"),
                        text(url).size(12),
                    ]
                    .spacing(4)
                    .align_x(Alignment::Center),
                ),
            });

            let mut actions = row![button("Download").on_press(MyMessage::Download.into())]
                .spacing(16);
            if workflow.can_share() {
                actions = actions.push(button("Share").on_press(MyMessage::Share.into()));
            }
            content = content.push(centered(actions));
        }
        None => {
            content = content.push(text("Your generated poster will appear here"));
            content = content.push(centered(
                column![
                    container(text("?").size(40))
                        .center(Length::Fixed(120.))
                        .style(|_| {
                            container::Style::default().border(
                                Border::default()
                                    .rounded(8)
                                    .width(2)
                                    .color(Color::from_rgba(0., 0., 0., 0.3)),
                            )
                        }),
                    text("Fill out the form to generate your poster"),
                ]
                .spacing(10)
                .align_x(Alignment::Center),
            ));
        }
    }

    card(content.height(Length::Shrink))
}

fn card<'a>(content: impl Into<Element<'a, UiMessage>>) -> Container<'a, UiMessage> {
    container(content)
        .padding(20)
        .width(CARD_WIDTH)
        .style(|_theme| {
            container::background(Color::from_rgb(0.97, 0.97, 0.97))
                .border(Border::default().rounded(10))
        })
}

fn centered<'a>(elem: impl Into<Element<'a, UiMessage>>) -> Element<'a, UiMessage> {
    container(elem).center_x(Length::Fill).padding(10).into_elem()
}

fn notification_banner<'a>(
    kind: NotificationKind,
    title: &'a str,
    description: &'a str,
) -> Container<'a, UiMessage> {
    let background = match kind {
        NotificationKind::Success => Color::from_rgb(0.85, 0.95, 0.85),
        NotificationKind::Error => Color::from_rgb(0.98, 0.86, 0.86),
    };

    container(
        row![
            column![bold_text(title), text(description)].spacing(4),
            space::horizontal(),
            button("x").on_press(MyMessage::DismissNotification.into()),
        ]
        .align_y(Alignment::Center)
        .spacing(10),
    )
    .padding(12)
    .width(Length::Fill)
    .style(move |_theme| container::background(background).border(Border::default().rounded(8)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::testing::context,
        message::ui_messages::InputDialog as DialogMessage,
        state::{Dialog, modal::DialogResult},
    };

    #[test]
    fn key_dialog_starts_with_the_current_key() -> Result<()> {
        let mut ctx = context(Some("sk-seed"));
        let mut form = PosterForm::new();

        let cmd = form.update(MyMessage::ApiKeyButtonPressed.into(), &mut ctx)?;
        assert!(cmd.transition.is_some());

        let mut dialog = api_key_dialog(ctx.workflow.credential().expose());
        assert_eq!(dialog.value(), "sk-seed");
        let saved = dialog.value().to_string();
        assert!(matches!(
            dialog.update(DialogMessage::Save.into(), &mut ctx)?,
            DialogResult::Close(_)
        ));

        form.update(MyMessage::ApiKeyEntered(saved).into(), &mut ctx)?;
        assert!(ctx.workflow.has_credential());
        assert_eq!(ctx.workflow.credential().expose(), "sk-seed");
        Ok(())
    }

    #[test]
    fn key_dialog_starts_empty_without_a_key() {
        let ctx = context(None);
        let dialog = api_key_dialog(ctx.workflow.credential().expose());
        assert_eq!(dialog.value(), "");
    }

    #[test]
    fn form_fields_reach_the_workflow() -> Result<()> {
        let mut ctx = context(None);
        let mut form = PosterForm::new();
        form.update(MyMessage::TitleChanged("Alien".into()).into(), &mut ctx)?;
        form.update(MyMessage::StyleSelected(ArtStyle::Noir).into(), &mut ctx)?;
        form.update(MyMessage::ModelSelected(Model::DallE2).into(), &mut ctx)?;

        let params = ctx.workflow.params();
        assert_eq!(params.title, "Alien");
        assert_eq!(params.style, Some(ArtStyle::Noir));
        assert_eq!(params.model, Model::DallE2);
        Ok(())
    }
}
