//! Real-device audio: cpal input capture to WAV, rodio playback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, StreamConfig};
use rodio::{Decoder, OutputStreamBuilder, Sink};

use super::backend::{AudioBackend, AudioError};

type WavHandle = Arc<Mutex<Option<hound::WavWriter<std::io::BufWriter<File>>>>>;

/// Audio implementation backed by the host's default devices.
pub struct DeviceAudio {
    sample_rate: u32,
}

impl DeviceAudio {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl AudioBackend for DeviceAudio {
    fn record(&self, path: &Path, seconds: u32) -> Result<(), AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(AudioError::NoInputDevice)?;

        let supported = device.default_input_config().map_err(backend_err)?;
        let sample_format = supported.sample_format();
        let channels = supported.channels();
        let sample_rate = pick_sample_rate(&device, self.sample_rate, supported.sample_rate().0);

        let config = StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let writer: WavHandle = Arc::new(Mutex::new(Some(
            hound::WavWriter::create(path, spec).map_err(backend_err)?,
        )));

        // The input callback cannot return errors, so the stream error
        // callback parks the first failure here for reporting afterwards.
        let failure: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let err_fn = {
            let failure = failure.clone();
            move |e: cpal::StreamError| {
                if let Ok(mut slot) = failure.lock() {
                    slot.get_or_insert(e.to_string());
                }
            }
        };

        let frame = usize::from(channels);
        let stream = match sample_format {
            SampleFormat::F32 => {
                let writer = writer.clone();
                device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        write_chunk(&writer, data, frame);
                    },
                    err_fn,
                    None,
                )
            }
            SampleFormat::I16 => {
                let writer = writer.clone();
                device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        let floats: Vec<f32> = data.iter().map(|&s| f32::from_sample(s)).collect();
                        write_chunk(&writer, &floats, frame);
                    },
                    err_fn,
                    None,
                )
            }
            SampleFormat::U16 => {
                let writer = writer.clone();
                device.build_input_stream(
                    &config,
                    move |data: &[u16], _: &cpal::InputCallbackInfo| {
                        let floats: Vec<f32> = data.iter().map(|&s| f32::from_sample(s)).collect();
                        write_chunk(&writer, &floats, frame);
                    },
                    err_fn,
                    None,
                )
            }
            other => {
                return Err(AudioError::Backend(format!(
                    "unsupported input sample format {other:?}"
                )));
            }
        }
        .map_err(backend_err)?;

        stream.play().map_err(backend_err)?;
        thread::sleep(Duration::from_secs(u64::from(seconds)));
        drop(stream);

        if let Some(msg) = failure.lock().ok().and_then(|mut s| s.take()) {
            return Err(AudioError::Backend(msg));
        }

        let finished = writer.lock().ok().and_then(|mut w| w.take());
        match finished {
            Some(w) => w.finalize().map_err(backend_err),
            None => Ok(()),
        }
    }

    fn play(&self, path: &Path) -> Result<(), AudioError> {
        let file = File::open(path).map_err(|source| AudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut stream = OutputStreamBuilder::open_default_stream().map_err(backend_err)?;
        // rodio logs to stderr when the stream is dropped; noisy for a CLI.
        stream.log_on_drop(false);

        let source = Decoder::new(BufReader::new(file)).map_err(backend_err)?;
        let sink = Sink::connect_new(stream.mixer());
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

/// Use the configured rate when the device supports it, otherwise fall back
/// to the device's own default.
fn pick_sample_rate(device: &Device, requested: u32, device_default: u32) -> u32 {
    if let Ok(mut ranges) = device.supported_input_configs() {
        if ranges.any(|r| r.min_sample_rate().0 <= requested && requested <= r.max_sample_rate().0)
        {
            return requested;
        }
    }
    device_default
}

/// Downmix interleaved frames to mono and append them to the WAV writer.
fn write_chunk(writer: &WavHandle, data: &[f32], channels: usize) {
    let Ok(mut guard) = writer.lock() else {
        return;
    };
    let Some(w) = guard.as_mut() else {
        return;
    };

    for frame in data.chunks(channels.max(1)) {
        let mixed = frame.iter().sum::<f32>() / frame.len() as f32;
        let sample = (mixed.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        // A full disk mid-capture surfaces at finalize time.
        let _ = w.write_sample(sample);
    }
}

fn backend_err(e: impl std::fmt::Display) -> AudioError {
    AudioError::Backend(e.to_string())
}
