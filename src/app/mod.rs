// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for Shutter
//!
//! This module contains the application state, message handling, UI rendering,
//! and the screen state machines.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, ContextPage)
//! - `route`: Screen back stack
//! - `signal`: One-shot signal channels from view-models to the app
//! - `permission`, `camera`, `viewer`: Per-screen state machines
//! - `animation`, `keys`: Animation clocks and keyboard shortcuts
//! - `controls`, `bottom_bar`: Buttons drawn over the preview
//! - `gallery`, `settings`: Context drawer pages
//! - `view`, `photo_viewer`: Screen rendering
//! - `update`, `handlers`: Message handling

pub mod animation;
mod bottom_bar;
pub mod camera;
mod controls;
mod gallery;
mod handlers;
pub mod keys;
pub mod permission;
mod photo_viewer;
pub mod route;
mod settings;
pub mod signal;
mod state;
mod update;
pub mod viewer;
mod view;

use crate::app::animation::IconSpin;
use crate::app::camera::CameraViewModel;
use crate::app::keys::KeyDebouncer;
use crate::app::permission::PermissionViewModel;
use crate::app::route::{Route, Router};
use crate::backends::camera::CameraBackendManager;
use crate::backends::camera::types::Facing;
use crate::backends::portal::StoredAccess;
use crate::config::{AppTheme, Config};
use crate::constants::{pipeline, timing};
use crate::fl;
use crate::flash::{FlashDevice, ScreenBrightness};
use crate::pipelines::photo::{BackendCaptureAdapter, CaptureAdapter};
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::{Subscription, event, keyboard};
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, ContextPage, KeyAction, Message, PreviewImage};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

const REPOSITORY: &str = "https://github.com/cosmic-utils/shutter";
pub(crate) const APP_ICON: &[u8] =
    include_bytes!("../../resources/icons/hicolor/scalable/apps/io.github.cosmic-utils.shutter.svg");

/// Backend manager, capture adapter and LED availability for `config`
pub(crate) fn capture_stack(
    config: &Config,
) -> (CameraBackendManager, Arc<dyn CaptureAdapter>, bool) {
    let manager = CameraBackendManager::new(config.backend);
    manager.set_device_override(Facing::Front, &config.front_camera_path);
    manager.set_device_override(Facing::Back, &config.back_camera_path);

    let flash_devices = FlashDevice::discover();
    let has_flash_led = !flash_devices.is_empty();
    info!(leds = flash_devices.len(), "Flash LEDs discovered");

    let adapter = BackendCaptureAdapter::new(manager.clone(), config.output_size())
        .with_flash(flash_devices);
    (manager, Arc::new(adapter), has_flash_led)
}

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.cosmic-utils.shutter";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        // Create the about widget
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        let (backend_manager, capture_adapter, has_flash_led) = capture_stack(&config);
        if !backend_manager.is_available() {
            warn!(backend = %config.backend, "Camera backend not available");
        }

        let screen_brightness = ScreenBrightness::discover();
        if screen_brightness.is_none() {
            info!("No writable backlight, front flash will not boost brightness");
        }

        let theme_options = vec![
            fl!("theme-system"),
            fl!("theme-dark"),
            fl!("theme-light"),
        ];

        let mut permission = PermissionViewModel::new();
        let permission_signals = Some(permission.subscribe());

        // Construct the app model with the runtime's core.
        let mut app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            theme_options,
            camera: CameraViewModel::new(config.front_flash_threshold()),
            key_debouncer: KeyDebouncer::new(Duration::from_millis(config.key_debounce_ms)),
            config,
            config_handler,
            router: Router::new(Route::Intro),
            permission,
            permission_signals,
            stored_access: StoredAccess::NotDetermined,
            camera_signals: None,
            backend_manager,
            capture_adapter,
            preview: None,
            screen_brightness,
            has_flash_led,
            icon_spin: IconSpin::default(),
            viewer: None,
            is_exporting: false,
            last_export: None,
            last_tick: None,
        };
        app.apply_config();

        let theme_task = if app.config.app_theme == AppTheme::System {
            Task::none()
        } else {
            cosmic::command::set_theme(app.config.app_theme.theme())
        };

        let status_task = Self::load_permission_status(Self::APP_ID);

        (app, Task::batch([status_task, theme_task]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
            ContextPage::Gallery => self.gallery_view(),
        })
    }

    /// Rationale dialog of the permission screen
    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        self.build_rationale_dialog()
    }

    fn on_escape(&mut self) -> Task<cosmic::Action<Self::Message>> {
        self.handle_navigate_back()
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        let keyboard_sub = event::listen_with(|event, status, _window_id| match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                let action = keys::action_for(&key)?;
                // Arrow keys belong to focused widgets first
                if action != KeyAction::Shutter && status == event::Status::Captured {
                    return None;
                }
                Some(Message::Key(action))
            }
            _ => None,
        });

        let mut subscriptions = vec![config_sub, keyboard_sub];

        if self.router.current() == Route::Camera {
            subscriptions.push(self.preview_subscription());
        }

        if self.is_animating(Instant::now()) {
            subscriptions
                .push(cosmic::iced::time::every(timing::ANIMATION_FRAME).map(Message::AnimationTick));
        }

        Subscription::batch(subscriptions)
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}

impl AppModel {
    /// Preview frames for the current facing
    ///
    /// Restarts whenever the facing, backend or pinned devices change.
    fn preview_subscription(&self) -> Subscription<Message> {
        use cosmic::iced::futures::{SinkExt, StreamExt};

        let facing = self.camera.state().facing();
        let manager = self.backend_manager.clone();
        let id = (
            "preview",
            facing,
            manager.backend_type(),
            self.config.front_camera_path.clone(),
            self.config.back_camera_path.clone(),
        );

        Subscription::run_with_id(
            id,
            cosmic::iced::stream::channel(pipeline::PREVIEW_CHANNEL_CAPACITY, move |mut output| async move {
                info!(%facing, "Preview subscription started");
                loop {
                    let (sender, mut receiver) =
                        cosmic::iced::futures::channel::mpsc::channel(pipeline::PREVIEW_CHANNEL_CAPACITY);

                    // Device discovery and pipeline startup block
                    let starter = manager.clone();
                    let started = tokio::task::spawn_blocking(move || {
                        starter.start_preview(facing, sender)
                    })
                    .await;

                    let handle = match started {
                        Ok(Ok(handle)) => handle,
                        Ok(Err(e)) => {
                            error!(error = %e, %facing, "Failed to start preview");
                            tokio::time::sleep(timing::PREVIEW_RETRY).await;
                            continue;
                        }
                        Err(e) => {
                            error!(error = %e, "Preview start task failed");
                            tokio::time::sleep(timing::PREVIEW_RETRY).await;
                            continue;
                        }
                    };

                    while let Some(frame) = receiver.next().await {
                        if output.send(Message::CameraFrame(frame)).await.is_err() {
                            info!("Preview subscription closed");
                            return;
                        }
                    }

                    warn!(%facing, "Preview stream ended, restarting");
                    drop(handle);
                    tokio::time::sleep(timing::PREVIEW_RETRY).await;
                }
            }),
        )
    }
}
