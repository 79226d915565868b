// SPDX-License-Identifier: GPL-3.0-only

//! Flash mode toggle

use crate::app::state::{AppModel, Message};
use crate::app::view::overlay_container_style;
use crate::constants::ui;
use crate::flash::FlashMode;
use cosmic::Element;
use cosmic::iced::Length;
use cosmic::widget;

/// Flash icon SVG (lightning bolt)
const FLASH_ICON: &[u8] = include_bytes!("../../../resources/button_icons/flash.svg");
/// Flash off icon SVG (lightning bolt with strike-through)
const FLASH_OFF_ICON: &[u8] = include_bytes!("../../../resources/button_icons/flash-off.svg");
/// Flash auto icon SVG (lightning bolt with an "A")
const FLASH_AUTO_ICON: &[u8] = include_bytes!("../../../resources/button_icons/flash-auto.svg");

impl AppModel {
    /// Build the flash button; each press cycles Off, On, Auto
    pub fn build_flash_button(&self) -> Element<'_, Message> {
        let mode = self.camera.state().flash_mode();
        let icon_bytes = match mode {
            FlashMode::Off => FLASH_OFF_ICON,
            FlashMode::On => FLASH_ICON,
            FlashMode::Auto => FLASH_AUTO_ICON,
        };
        let flash_icon = widget::icon::from_svg_bytes(icon_bytes).symbolic(true);

        let icon_content = widget::container(widget::icon(flash_icon).size(20))
            .width(Length::Fixed(ui::OVERLAY_BUTTON_SIZE))
            .height(Length::Fixed(ui::OVERLAY_BUTTON_SIZE))
            .center(Length::Fixed(ui::OVERLAY_BUTTON_SIZE));

        let btn = widget::button::custom(icon_content)
            .padding(0)
            .class(if mode == FlashMode::Off {
                cosmic::theme::Button::Text
            } else {
                cosmic::theme::Button::Suggested
            })
            .on_press(Message::CycleFlashMode);

        widget::container(btn).style(overlay_container_style).into()
    }
}
