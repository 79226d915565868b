// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! One screen per route:
//! - Permission request (rationale dialog is drawn by `Application::dialog`)
//! - Camera preview with overlaid controls (controls, bottom_bar modules)
//! - Photo viewer (photo_viewer module)

use crate::app::permission::PermissionEvent;
use crate::app::route::Route;
use crate::app::state::{AppModel, Message};
use crate::backends::portal::StoredAccess;
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Border, Color, Length};
use cosmic::widget;

/// Themed translucent background for buttons drawn over the preview
pub fn overlay_container_style(theme: &cosmic::Theme) -> widget::container::Style {
    let cosmic = theme.cosmic();
    let mut background: Color = cosmic.background.base.into();
    background.a = ui::OVERLAY_BACKGROUND_ALPHA;

    widget::container::Style {
        background: Some(Background::Color(background)),
        border: Border {
            radius: cosmic.corner_radii.radius_xl.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Full-window solid color layer
fn color_layer<'a>(color: Color) -> Element<'a, Message> {
    widget::container(widget::Space::new(Length::Fill, Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(color)),
            ..Default::default()
        })
        .into()
}

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        match self.router.current() {
            Route::Intro => self.build_permission_screen(),
            Route::Camera => self.build_camera_screen(),
            Route::Viewer { .. } => self.build_viewer_screen(),
        }
    }

    fn build_permission_screen(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let content = widget::column()
            .push(widget::icon(widget::icon::from_svg_bytes(crate::app::APP_ICON)).size(96))
            .push(widget::text::title2(fl!("app-title")))
            .push(widget::text::body(fl!("permission-message")))
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::button::suggested(fl!("grant-permission"))
                    .on_press(Message::RequestPermission),
            )
            .spacing(spacing.space_s)
            .align_x(Alignment::Center);

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .padding(spacing.space_l)
            .into()
    }

    /// Rationale dialog for the oldest denied permission
    pub fn build_rationale_dialog(&self) -> Option<Element<'_, Message>> {
        if self.router.current() != Route::Intro {
            return None;
        }
        let permission = self.permission.state().visible_rationale()?;

        // A permanent denial cannot be asked again; send the user to settings
        let permanently_denied = self.stored_access == StoredAccess::Denied;
        let (body, confirm) = if permanently_denied {
            (
                fl!("permission-permanently-declined", permission = permission.as_str()),
                fl!("grant-permission"),
            )
        } else {
            (
                fl!("permission-rationale", permission = permission.as_str()),
                fl!("okay"),
            )
        };

        let dialog = widget::dialog()
            .title(fl!("permission-required"))
            .body(body)
            .primary_action(widget::button::suggested(confirm).on_press(Message::RationaleConfirm))
            .secondary_action(
                widget::button::standard(fl!("dismiss"))
                    .on_press(Message::Permission(PermissionEvent::DismissRationaleDialog)),
            );

        Some(dialog.into())
    }

    fn build_camera_screen(&self) -> Element<'_, Message> {
        let state = self.camera.state();

        // Simulated front flash: nothing but white while the frame is taken
        if state.simulate_front_flash() {
            return color_layer(Color::WHITE);
        }

        let preview: Element<'_, Message> = match &self.preview {
            Some(frame) => widget::image(frame.handle.clone())
                .content_fit(cosmic::iced::ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => widget::container(widget::text::body(fl!("starting-camera")))
                .width(Length::Fill)
                .height(Length::Fill)
                .center(Length::Fill)
                .style(|_theme| widget::container::Style {
                    text_color: Some(Color::WHITE),
                    ..Default::default()
                })
                .into(),
        };

        let spacing = cosmic::theme::spacing();
        let top_row = widget::row()
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .push(self.build_camera_switcher())
            .push(self.build_flash_button())
            .spacing(spacing.space_xs)
            .padding(spacing.space_s)
            .align_y(Alignment::Center);

        let controls = widget::column()
            .push(top_row)
            .push(widget::vertical_space().height(Length::Fill))
            .push(self.build_bottom_bar())
            .width(Length::Fill)
            .height(Length::Fill);

        let mut layers = cosmic::iced::widget::stack![preview].width(Length::Fill).height(Length::Fill);
        if state.is_capturing() {
            layers = layers.push(color_layer(Color::from_rgba(1.0, 1.0, 1.0, ui::CAPTURE_VEIL_ALPHA)));
        }
        layers = layers.push(controls);

        widget::container(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }
}
