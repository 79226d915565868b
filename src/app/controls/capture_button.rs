// SPDX-License-Identifier: GPL-3.0-only

//! Capture button widget implementation

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::{Background, Color, Length, Radians, Rotation};
use cosmic::widget;
use std::time::Instant;

/// Camera glyph shown spinning while a capture runs
const CAPTURING_ICON: &[u8] = include_bytes!("../../../resources/button_icons/camera.svg");

impl AppModel {
    /// Build the capture button widget
    ///
    /// A white circle when idle. While a capture is in flight (and until its
    /// turn finishes) it becomes a spinning camera glyph with no action.
    pub fn build_capture_button(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let now = Instant::now();
        let is_capturing = self.camera.state().is_capturing();

        let content: Element<'_, Message> = if is_capturing || self.icon_spin.is_animating(now) {
            let angle = self.icon_spin.angle_at(now);
            widget::svg(widget::svg::Handle::from_memory(CAPTURING_ICON))
                .width(Length::Fixed(ui::CAPTURING_ICON_SIZE))
                .height(Length::Fixed(ui::CAPTURING_ICON_SIZE))
                .rotation(Rotation::Floating(Radians(angle.to_radians())))
                .into()
        } else {
            let button_inner = widget::container(widget::Space::new(
                Length::Fixed(ui::CAPTURE_BUTTON_INNER),
                Length::Fixed(ui::CAPTURE_BUTTON_INNER),
            ))
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::WHITE)),
                border: cosmic::iced::Border {
                    radius: [ui::CAPTURE_BUTTON_RADIUS; 4].into(),
                    ..Default::default()
                },
                ..Default::default()
            });

            widget::button::custom(button_inner)
                .on_press(Message::Capture)
                .padding(0)
                .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
                .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
                .into()
        };

        // Fixed-size slot so the swap to the spinning glyph does not shift the bar
        let slot = ui::CAPTURING_ICON_SIZE.max(ui::CAPTURE_BUTTON_OUTER);
        widget::container(content)
            .width(Length::Fixed(slot))
            .height(Length::Fixed(slot))
            .center_x(slot)
            .center_y(slot)
            .padding([spacing.space_xxs, 0])
            .into()
    }
}
