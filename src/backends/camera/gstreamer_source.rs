// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer camera backend
//!
//! Enumerates cameras with a `DeviceMonitor`, streams preview frames through
//! an `appsink` callback and grabs stills with short-lived one-shot pipelines.
//! PipeWire lets both pipelines read the same camera at once, so a still
//! capture does not interrupt the preview.

use super::types::*;
use super::{CameraBackend, PreviewHandle};
use crate::constants::{pipeline, timing};
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

static PREVIEW_FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Frames between periodic preview log lines
const FRAME_LOG_INTERVAL: u64 = 300;

/// GStreamer backend (PipeWire first, V4L2 fallback)
#[derive(Debug, Default)]
pub struct GStreamerBackend;

impl GStreamerBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CameraBackend for GStreamerBackend {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        if let Err(e) = gstreamer::init() {
            warn!(error = %e, "GStreamer init failed - no cameras");
            return Vec::new();
        }

        let monitor = gstreamer::DeviceMonitor::new();
        monitor.add_filter(Some("Video/Source"), None);
        if let Err(e) = monitor.start() {
            warn!(error = %e, "Device monitor failed to start");
            return Vec::new();
        }

        let mut pipewire = Vec::new();
        let mut v4l2 = Vec::new();

        for device in monitor.devices() {
            let name = device.display_name().to_string();
            let Some(props) = device.properties() else {
                debug!(name = %name, "Device without properties, skipping");
                continue;
            };

            let api = property_string(&props, "device.api").unwrap_or_default();
            let location = property_string(&props, "api.libcamera.location")
                .and_then(|loc| Facing::from_location(&loc));
            let rotation = property_string(&props, "api.libcamera.rotation")
                .map(|deg| SensorRotation::from_degrees(&deg))
                .unwrap_or_default();

            match api.as_str() {
                "pipewire" => {
                    let path = property_string(&props, "object.serial").unwrap_or_default();
                    debug!(name = %name, serial = %path, ?location, %rotation, "Found PipeWire camera");
                    pipewire.push(CameraDevice {
                        name,
                        path,
                        kind: SourceKind::PipeWire,
                        location,
                        rotation,
                    });
                }
                "v4l2" => {
                    let Some(path) = property_string(&props, "api.v4l2.path")
                        .or_else(|| property_string(&props, "device.path"))
                    else {
                        continue;
                    };
                    debug!(name = %name, path = %path, "Found V4L2 camera");
                    v4l2.push(CameraDevice {
                        name,
                        path,
                        kind: SourceKind::V4l2,
                        location,
                        rotation,
                    });
                }
                other => debug!(name = %name, api = other, "Ignoring device"),
            }
        }

        monitor.stop();

        // Both providers report the same hardware; PipeWire allows shared access
        let cameras = if pipewire.is_empty() { v4l2 } else { pipewire };
        info!(count = cameras.len(), "Enumerated cameras");
        cameras
    }

    fn capture_still(&self, device: &CameraDevice) -> BackendResult<CameraFrame> {
        gstreamer::init()?;
        info!(device = %device.name, "Capturing still frame");

        let (pipeline, appsink) = build_pipeline(device, "max-buffers=1 drop=true sync=false")?;
        pipeline.set_state(gstreamer::State::Playing)?;

        let result = pull_settled_frame(&pipeline, &appsink);

        if let Err(e) = pipeline.set_state(gstreamer::State::Null) {
            warn!(error = %e, "Failed to stop still pipeline");
        }

        result
    }

    fn start_preview(
        &self,
        device: &CameraDevice,
        sender: FrameSender,
    ) -> BackendResult<PreviewHandle> {
        gstreamer::init()?;
        info!(device = %device.name, "Starting preview pipeline");

        let (pipeline, appsink) = build_pipeline(
            device,
            &format!(
                "max-buffers={} drop=true sync=false emit-signals=true enable-last-sample=false",
                pipeline::MAX_BUFFERS
            ),
        )?;

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_num = PREVIEW_FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
                    let sample = appsink
                        .pull_sample()
                        .map_err(|_| gstreamer::FlowError::Eos)?;

                    let frame = match frame_from_sample(&sample) {
                        Ok(frame) => frame,
                        Err(e) => {
                            if frame_num % FRAME_LOG_INTERVAL == 0 {
                                warn!(frame = frame_num, error = %e, "Dropping malformed preview frame");
                            }
                            return Ok(gstreamer::FlowSuccess::Ok);
                        }
                    };

                    if frame_num % FRAME_LOG_INTERVAL == 0 {
                        debug!(
                            frame = frame_num,
                            width = frame.width,
                            height = frame.height,
                            "Preview frame"
                        );
                    }

                    // UI busy: dropping frames is fine for live preview
                    let mut sender = sender.clone();
                    if let Err(e) = sender.try_send(frame) {
                        if e.is_disconnected() {
                            return Err(gstreamer::FlowError::Eos);
                        }
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline.set_state(gstreamer::State::Playing)?;

        let (result, state, _) = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::PIPELINE_STATE_TIMEOUT_SECS,
        ));
        debug!(?result, ?state, "Preview pipeline state");
        if let Some(message) = pending_error(&pipeline) {
            let _ = pipeline.set_state(gstreamer::State::Null);
            return Err(BackendError::InitializationFailed(message));
        }

        Ok(PreviewHandle::new(move || {
            info!("Stopping preview pipeline");
            appsink.set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
            if let Err(e) = pipeline.set_state(gstreamer::State::Null) {
                error!(error = %e, "Failed to stop preview pipeline");
            }
        }))
    }

    fn backend_type(&self) -> CameraBackendType {
        CameraBackendType::GStreamer
    }

    fn is_available(&self) -> bool {
        gstreamer::init().is_ok()
            && (gstreamer::ElementFactory::find("pipewiresrc").is_some()
                || gstreamer::ElementFactory::find("v4l2src").is_some())
    }
}

/// `source ! videoconvert ! RGBA ! appsink`
fn build_pipeline(
    device: &CameraDevice,
    sink_options: &str,
) -> BackendResult<(gstreamer::Pipeline, AppSink)> {
    let description = format!(
        "{} ! videoconvert ! video/x-raw,format=RGBA ! appsink name=sink {}",
        device.source_element(),
        sink_options
    );
    debug!(pipeline = %description, "Building pipeline");

    let pipeline = gstreamer::parse::launch(&description)?
        .downcast::<gstreamer::Pipeline>()
        .map_err(|_| BackendError::InitializationFailed("Not a pipeline".into()))?;

    let appsink = pipeline
        .by_name("sink")
        .ok_or_else(|| BackendError::InitializationFailed("Failed to find appsink".into()))?
        .downcast::<AppSink>()
        .map_err(|_| BackendError::InitializationFailed("Failed to cast appsink".into()))?;

    Ok((pipeline, appsink))
}

/// Pull frames until auto-exposure had a few frames to settle
fn pull_settled_frame(
    pipeline: &gstreamer::Pipeline,
    appsink: &AppSink,
) -> BackendResult<CameraFrame> {
    let timeout = gstreamer::ClockTime::from_mseconds(
        timing::STILL_CAPTURE_TIMEOUT.as_millis() as u64,
    );

    let mut last = None;
    for _ in 0..=timing::STILL_CAPTURE_WARMUP_FRAMES {
        match appsink.try_pull_sample(timeout) {
            Some(sample) => last = Some(sample),
            None => break,
        }
    }

    match last {
        Some(sample) => frame_from_sample(&sample),
        None => Err(pending_error(pipeline)
            .map(BackendError::Other)
            .unwrap_or(BackendError::Timeout)),
    }
}

/// Convert an RGBA sample to a tightly packed frame
fn frame_from_sample(sample: &gstreamer::Sample) -> BackendResult<CameraFrame> {
    let caps = sample
        .caps()
        .ok_or_else(|| BackendError::InvalidFrame("No caps in sample".into()))?;
    let info = VideoInfo::from_caps(caps)
        .map_err(|e| BackendError::InvalidFrame(format!("Bad caps: {}", e)))?;
    let buffer = sample
        .buffer()
        .ok_or_else(|| BackendError::InvalidFrame("No buffer in sample".into()))?;
    let map = buffer
        .map_readable()
        .map_err(|e| BackendError::InvalidFrame(format!("Failed to map buffer: {}", e)))?;

    let stride = info.stride()[0].max(0) as usize;
    CameraFrame::from_strided(info.width(), info.height(), stride, map.as_slice())
}

/// First error message waiting on the pipeline bus, if any
fn pending_error(pipeline: &gstreamer::Pipeline) -> Option<String> {
    let bus = pipeline.bus()?;
    let message = bus.pop_filtered(&[gstreamer::MessageType::Error])?;
    match message.view() {
        gstreamer::MessageView::Error(err) => Some(err.error().to_string()),
        _ => None,
    }
}

/// Read a device property as text regardless of its GValue type
fn property_string(props: &gstreamer::StructureRef, key: &str) -> Option<String> {
    if let Ok(value) = props.get::<String>(key) {
        return Some(value);
    }
    let value = props.value(key).ok()?;
    let serialized = value.serialize().ok()?;
    Some(serialized.trim_matches('"').to_string())
}
