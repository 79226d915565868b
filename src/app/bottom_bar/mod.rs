// SPDX-License-Identifier: GPL-3.0-only

//! Bottom bar module
//!
//! This module handles the bottom control bar UI components:
//! - Gallery button (with photo count badge)
//! - Capture button (controls module), centered

pub mod gallery_button;

use crate::app::state::{AppModel, Message};
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

/// Fixed height for the bottom bar
const BOTTOM_BAR_HEIGHT: f32 = 104.0;

impl AppModel {
    /// Build the complete bottom bar widget
    ///
    /// Three columns keep the capture button truly centered whether or not
    /// the gallery button is present.
    pub fn build_bottom_bar(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let mut left_section = widget::row()
            .push(widget::horizontal_space().width(spacing.space_m))
            .align_y(Alignment::Center)
            .width(Length::Fill);
        if let Some(gallery) = self.build_gallery_button() {
            left_section = left_section.push(gallery);
        }

        let right_section = widget::Space::new(Length::Fill, Length::Shrink);

        let bottom_row = widget::row()
            .push(left_section)
            .push(self.build_capture_button())
            .push(right_section)
            .padding(spacing.space_xs)
            .align_y(Alignment::Center);

        widget::container(bottom_row)
            .width(Length::Fill)
            .height(Length::Fixed(BOTTOM_BAR_HEIGHT))
            .center_y(BOTTOM_BAR_HEIGHT)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::TRANSPARENT)),
                ..Default::default()
            })
            .into()
    }
}
