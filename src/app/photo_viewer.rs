// SPDX-License-Identifier: GPL-3.0-only

//! Full-screen photo viewer screen

use crate::app::state::{AppModel, Message};
use crate::app::view::overlay_container_style;
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length, Radians, Rotation};
use cosmic::widget::{self, icon};

/// Icon button over the photo; `None` draws it disabled
fn overlay_button<'a>(name: &'static str, message: Option<Message>) -> Element<'a, Message> {
    let mut btn = widget::button::icon(icon::from_name(name)).class(cosmic::theme::Button::Text);
    let enabled = message.is_some();
    if let Some(message) = message {
        btn = btn.on_press(message);
    }

    let button = widget::container(btn).style(overlay_container_style);
    if enabled {
        button.into()
    } else {
        widget::container(button)
            .style(|_theme| widget::container::Style {
                text_color: Some(Color::from_rgba(1.0, 1.0, 1.0, ui::DISABLED_ALPHA)),
                ..Default::default()
            })
            .into()
    }
}

impl AppModel {
    pub(crate) fn build_viewer_screen(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let Some(viewer) = self.viewer.as_ref() else {
            return widget::Space::new(Length::Fill, Length::Fill).into();
        };

        let photo: Element<'_, Message> = match viewer.current() {
            Some(photo) => widget::image(photo.handle().clone())
                .content_fit(cosmic::iced::ContentFit::Contain)
                .rotation(Rotation::Floating(Radians(viewer.angle().to_radians())))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => widget::container(widget::text::body(fl!("no-photos")))
                .center(Length::Fill)
                .into(),
        };

        let mut top_row = widget::row()
            .push(overlay_button("go-previous-symbolic", Some(Message::NavigateBack)))
            .push(widget::Space::new(Length::Fill, Length::Shrink));
        if viewer.shows_paging() {
            top_row = top_row.push(
                widget::container(widget::text::body(format!(
                    "{} / {}",
                    viewer.page() + 1,
                    viewer.len()
                )))
                .padding([spacing.space_xxs, spacing.space_s])
                .style(overlay_container_style),
            );
            top_row = top_row.push(widget::Space::new(Length::Fill, Length::Shrink));
        }
        let save = (!self.is_exporting).then_some(Message::ViewerSave);
        top_row = top_row
            .push(overlay_button("document-save-symbolic", save))
            .push(overlay_button("object-rotate-right-symbolic", Some(Message::ViewerRotate)))
            .spacing(spacing.space_xs)
            .padding(spacing.space_s)
            .align_y(Alignment::Center);

        let mut middle_row = widget::row().align_y(Alignment::Center).padding(spacing.space_s);
        if viewer.shows_paging() {
            middle_row = middle_row
                .push(overlay_button(
                    "go-previous-symbolic",
                    viewer.has_previous().then_some(Message::ViewerPrevious),
                ))
                .push(widget::Space::new(Length::Fill, Length::Shrink))
                .push(overlay_button(
                    "go-next-symbolic",
                    viewer.has_next().then_some(Message::ViewerNext),
                ));
        }

        let mut controls = widget::column()
            .push(top_row)
            .push(widget::vertical_space().height(Length::Fill))
            .push(middle_row)
            .push(widget::vertical_space().height(Length::Fill));
        if let Some(path) = &self.last_export {
            controls = controls.push(
                widget::container(
                    widget::container(widget::text::caption(fl!(
                        "photo-saved",
                        path = path.display().to_string()
                    )))
                    .padding([spacing.space_xxs, spacing.space_s])
                    .style(overlay_container_style),
                )
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding(spacing.space_s),
            );
        }

        widget::container(cosmic::iced::widget::stack![photo, controls])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }
}
