// SPDX-License-Identifier: GPL-3.0-only

//! Gallery drawer: the session's photos in a two-column grid

use crate::app::state::{AppModel, ContextPage, Message};
use crate::constants::ui;
use crate::fl;
use crate::pipelines::photo::Photo;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::{Alignment, Border, Length};
use cosmic::widget::{self, icon};

impl AppModel {
    /// Create the gallery view for the context drawer
    pub fn gallery_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let photos = self.camera.state().photos();

        let content: Element<'_, Message> = if photos.is_empty() {
            widget::container(widget::text(fl!("no-photos")))
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding(spacing.space_l)
                .into()
        } else {
            let mut grid = widget::column().spacing(spacing.space_s);
            for (row_index, chunk) in photos.chunks(ui::GALLERY_COLUMNS).enumerate() {
                let mut row = widget::row().spacing(spacing.space_s);
                for (column, photo) in chunk.iter().enumerate() {
                    let index = row_index * ui::GALLERY_COLUMNS + column;
                    row = row.push(gallery_tile(photo, index));
                }
                // Keep a lone last photo at column width
                for _ in chunk.len()..ui::GALLERY_COLUMNS {
                    row = row.push(widget::Space::new(Length::Fill, Length::Shrink));
                }
                grid = grid.push(row);
            }
            grid.into()
        };

        context_drawer::context_drawer(content, Message::ToggleContextPage(ContextPage::Gallery))
            .title(fl!("gallery"))
    }
}

/// One thumbnail; tapping opens the viewer, the corner button deletes
fn gallery_tile(photo: &Photo, index: usize) -> Element<'_, Message> {
    let image = widget::image(photo.handle().clone())
        .content_fit(cosmic::iced::ContentFit::Cover)
        .width(Length::Fill)
        .height(Length::Fixed(ui::GALLERY_TILE_HEIGHT));

    let open = widget::button::custom(image)
        .padding(0)
        .width(Length::Fill)
        .class(cosmic::theme::Button::Image)
        .on_press(Message::OpenViewer(index));

    let delete = widget::container(
        widget::button::icon(icon::from_name("edit-delete-symbolic"))
            .class(cosmic::theme::Button::Text)
            .on_press(Message::DeletePhoto(photo.id())),
    )
    .style(crate::app::view::overlay_container_style);

    let delete_corner = widget::container(delete)
        .width(Length::Fill)
        .padding(4)
        .align_x(Alignment::End);

    widget::container(cosmic::iced::widget::stack![open, delete_corner])
        .width(Length::Fill)
        .height(Length::Fixed(ui::GALLERY_TILE_HEIGHT))
        .clip(true)
        .style(|_theme| widget::container::Style {
            border: Border {
                radius: [ui::GALLERY_CORNER_RADIUS; 4].into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}
