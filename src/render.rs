//! Chart generation pipeline
//!
//! POSTs the current style settings to the renderer endpoint as
//! `{ "mplstyle": { ... } }` and decodes the PNG it returns. The round trip
//! runs on a small tokio runtime owned by the client; finished outcomes cross
//! back to the UI thread over an mpsc channel drained once per frame.

use std::io::Cursor;
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::info;

use crate::settings::StyleSettings;

/// The one user-facing message shown for any failed generation. The actual
/// cause goes to the log only.
pub const GENERATION_FAILED: &str = "Failed to generate chart. Please try again.";

/// Request body understood by the renderer service.
#[derive(Debug, Serialize)]
pub struct RenderRequest {
    pub mplstyle: StyleSettings,
}

/// Decoded RGBA chart, ready for upload as a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Outcome of one generation round: a chart or a user-facing error message.
#[derive(Debug)]
pub enum RenderResult {
    Chart(ChartImage),
    Failed(String),
}

/// Lifecycle of the current generation round.
#[derive(Debug, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Loading,
    Done(RenderResult),
}

impl RenderState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RenderState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RenderState::Done(RenderResult::Failed(message)) => Some(message),
            _ => None,
        }
    }

    pub fn chart(&self) -> Option<&ChartImage> {
        match self {
            RenderState::Done(RenderResult::Chart(image)) => Some(image),
            _ => None,
        }
    }
}

/// Client for the chart renderer endpoint.
pub struct ChartClient {
    http: reqwest::Client,
    endpoint: String,
    runtime: tokio::runtime::Runtime,
    tx: Sender<Result<ChartImage>>,
    rx: Receiver<Result<ChartImage>>,
}

impl ChartClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .context("Failed to start chart client runtime")?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            runtime,
            tx,
            rx,
        })
    }

    /// Kick off one generation round for a snapshot of `settings`. The
    /// outcome arrives later via [`try_recv`](Self::try_recv).
    pub fn submit(&self, settings: &StyleSettings) {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        let request = RenderRequest {
            mplstyle: settings.clone(),
        };
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let outcome = fetch_chart(&http, &endpoint, &request).await;
            // Receiver only disappears when the window closed mid-flight.
            let _ = tx.send(outcome);
        });
    }

    /// Finished outcome, if one is waiting.
    pub fn try_recv(&self) -> Option<Result<ChartImage>> {
        self.rx.try_recv().ok()
    }
}

async fn fetch_chart(
    http: &reqwest::Client,
    endpoint: &str,
    request: &RenderRequest,
) -> Result<ChartImage> {
    let resp = http
        .post(endpoint)
        .json(request)
        .send()
        .await
        .context("Failed to reach chart renderer")?;

    if !resp.status().is_success() {
        anyhow::bail!("Chart renderer returned {}", resp.status());
    }

    let body = resp
        .bytes()
        .await
        .context("Failed to read renderer response")?;
    info!(bytes = body.len(), "Received rendered chart");

    decode_png_rgba(&body)
}

/// Decode a PNG body into RGBA pixels. RGB input gets an opaque alpha
/// channel added; other color types are rejected.
pub fn decode_png_rgba(bytes: &[u8]) -> Result<ChartImage> {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder
        .read_info()
        .context("Renderer response is not a PNG image")?;
    let buf_size = reader
        .output_buffer_size()
        .context("PNG output buffer size overflowed")?;
    let mut buf = vec![0; buf_size];
    let frame = reader
        .next_frame(&mut buf)
        .context("Failed to decode PNG frame")?;
    let data = &buf[..frame.buffer_size()];

    if frame.bit_depth != png::BitDepth::Eight {
        anyhow::bail!("Unsupported chart bit depth {:?}", frame.bit_depth);
    }

    let rgba = match frame.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => {
            let mut rgba = Vec::with_capacity(data.len() / 3 * 4);
            for chunk in data.chunks_exact(3) {
                rgba.extend_from_slice(chunk);
                rgba.push(0xFF);
            }
            rgba
        }
        other => {
            return Err(anyhow!(
                "Unsupported chart color type {other:?} (expected RGB or RGBA)"
            ));
        }
    };

    Ok(ChartImage {
        width: frame.width,
        height: frame.height,
        rgba,
    })
}

#[cfg(test)]
pub(crate) mod test_server {
    //! Canned single-endpoint HTTP fixture for pipeline tests.

    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;

    pub struct RendererFixture {
        pub endpoint: String,
        /// Requests answered so far.
        pub served: Arc<AtomicUsize>,
        /// Raw captured requests (head + body), one per round.
        pub requests: Arc<Mutex<Vec<String>>>,
    }

    impl RendererFixture {
        /// JSON body of the captured request at `index`.
        pub fn request_payload(&self, index: usize) -> serde_json::Value {
            let requests = self.requests.lock().unwrap();
            let raw = &requests[index];
            let (_, body) = raw.split_once("\r\n\r\n").expect("request has no body");
            serde_json::from_str(body).expect("request body is not JSON")
        }
    }

    /// Encode a one-color PNG usable as a canned renderer response.
    pub fn encode_png(width: u32, height: u32, color: png::ColorType, pixel: &[u8]) -> Vec<u8> {
        let samples = match color {
            png::ColorType::Rgba => 4,
            _ => 3,
        };
        let data: Vec<u8> = pixel
            .iter()
            .copied()
            .cycle()
            .take((width * height) as usize * samples)
            .collect();

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&data).unwrap();
        }
        out
    }

    /// Serve up to `rounds` requests with a fixed response, capturing each
    /// request for later assertions.
    pub fn spawn_renderer(
        rounds: usize,
        status_line: &'static str,
        body: Vec<u8>,
    ) -> RendererFixture {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind renderer fixture");
        let endpoint = format!("http://{}/generate-chart", listener.local_addr().unwrap());
        let served = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let served_in = Arc::clone(&served);
        let requests_in = Arc::clone(&requests);
        thread::spawn(move || {
            for _ in 0..rounds {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let request = read_request(&mut stream);
                requests_in.lock().unwrap().push(request);

                let header = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(header.as_bytes());
                let _ = stream.write_all(&body);
                served_in.fetch_add(1, Ordering::SeqCst);
            }
        });

        RendererFixture {
            endpoint,
            served,
            requests,
        }
    }

    /// Read one HTTP request: headers plus a content-length body.
    fn read_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            if let Some(pos) = data.windows(4).position(|window| window == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&data[..pos]).to_string();
                let content_length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if data.len() >= pos + 4 + content_length {
                    return String::from_utf8_lossy(&data).to_string();
                }
            }

            let n = stream.read(&mut buf).expect("renderer fixture read failed");
            assert!(n > 0, "request ended before the body completed");
            data.extend_from_slice(&buf[..n]);
        }
    }
}
