// SPDX-License-Identifier: GPL-3.0-only

//! Camera switcher button widget implementation

use crate::app::state::{AppModel, Message};
use crate::app::view::overlay_container_style;
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::Length;
use cosmic::widget;

/// Camera switch icon SVG (camera with circular arrows)
const CAMERA_SWITCH_ICON: &[u8] =
    include_bytes!("../../../resources/button_icons/camera-switch.svg");

impl AppModel {
    /// Build the front/back switch button
    pub fn build_camera_switcher(&self) -> Element<'_, Message> {
        let switch_icon = widget::icon::from_svg_bytes(CAMERA_SWITCH_ICON).symbolic(true);
        let icon_content = widget::container(widget::icon(switch_icon).size(20))
            .width(Length::Fixed(ui::OVERLAY_BUTTON_SIZE))
            .height(Length::Fixed(ui::OVERLAY_BUTTON_SIZE))
            .center(Length::Fixed(ui::OVERLAY_BUTTON_SIZE));

        // Use Button::Text for theme-aware styling (transparent background, themed icon color)
        let btn = widget::button::custom(icon_content)
            .padding(0)
            .class(cosmic::theme::Button::Text)
            .on_press(Message::ToggleCameraFacing);

        // Wrap in container with themed background for better visibility on camera preview
        widget::container(btn).style(overlay_container_style).into()
    }
}
