// SPDX-License-Identifier: GPL-3.0-only

//! Gallery button widget implementation

use crate::app::state::{AppModel, ContextPage, Message};
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Border, Color, Length};
use cosmic::widget;

/// Thumbnail edge length
const THUMBNAIL_SIZE: f32 = 40.0;

impl AppModel {
    /// Build the gallery button widget
    ///
    /// Shows the newest photo with a badge counting the session's photos.
    /// Returns `None` before the first photo is taken.
    pub fn build_gallery_button(&self) -> Option<Element<'_, Message>> {
        let photos = self.camera.state().photos();
        let latest = photos.last()?;

        let image = widget::image(latest.handle().clone())
            .content_fit(cosmic::iced::ContentFit::Cover)
            .width(Length::Fixed(THUMBNAIL_SIZE))
            .height(Length::Fixed(THUMBNAIL_SIZE));

        let thumbnail = widget::container(image)
            .width(Length::Fixed(THUMBNAIL_SIZE))
            .height(Length::Fixed(THUMBNAIL_SIZE))
            .clip(true)
            .style(|_theme| widget::container::Style {
                border: Border {
                    radius: [ui::GALLERY_CORNER_RADIUS / 2.0; 4].into(),
                    ..Default::default()
                },
                ..Default::default()
            });

        let btn = widget::button::custom(thumbnail)
            .padding(0)
            .width(Length::Fixed(THUMBNAIL_SIZE))
            .height(Length::Fixed(THUMBNAIL_SIZE))
            .class(cosmic::theme::Button::Image)
            .on_press(Message::ToggleContextPage(ContextPage::Gallery));

        let badge = widget::container(widget::text(photos.len().to_string()).size(11))
            .width(Length::Fixed(ui::BADGE_SIZE))
            .height(Length::Fixed(ui::BADGE_SIZE))
            .center(Length::Fixed(ui::BADGE_SIZE))
            .style(|theme: &cosmic::Theme| {
                let cosmic = theme.cosmic();
                widget::container::Style {
                    background: Some(Background::Color(cosmic.accent_color().into())),
                    text_color: Some(Color::WHITE),
                    border: Border {
                        radius: [ui::BADGE_SIZE / 2.0; 4].into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            });

        // Badge hangs off the top-right corner of the thumbnail
        let slot = THUMBNAIL_SIZE + ui::BADGE_SIZE / 2.0;
        let stacked = cosmic::iced::widget::stack![
            widget::container(btn)
                .width(Length::Fixed(slot))
                .height(Length::Fixed(slot))
                .align_x(Alignment::Start)
                .align_y(Alignment::End),
            widget::container(badge)
                .width(Length::Fixed(slot))
                .height(Length::Fixed(slot))
                .align_x(Alignment::End)
                .align_y(Alignment::Start),
        ];

        Some(stacked.into())
    }
}
