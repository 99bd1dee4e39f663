//! Shared test fixtures for the campaign studio integration tests.
//!
//! Provides `FakeProvider`, a scripted in-memory [`Provider`] that routes
//! each `generateContent` request by its shape (analysis, lifestyle image,
//! script, B-roll) and records every call so tests can assert on what was
//! sent to the network boundary.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, Once};
use std::time::Duration;

use campaign_studio::models::ImageData;
use campaign_studio::wire::{
    ApiErrorBody, Candidate, Content, GenerateContentRequest, GenerateContentResponse,
    GenerateVideoResponse, GeneratedSample, InlineData, Operation, OperationResponse, Part,
    PredictVideoRequest, VideoRef,
};
use campaign_studio::{CampaignStudio, CampaignStudioBuilder, Download, Provider, Result, StudioError};

pub const MUG_ANALYSIS: &str = r#"{
    "productName": "Ceramic Mug",
    "productType": "Drinkware",
    "materials": ["ceramic", "glaze"],
    "primaryColors": ["white", "sage green"],
    "targetAudience": "Coffee lovers who enjoy slow mornings"
}"#;

pub const SCRIPT: &str = "HOOK: Your morning coffee deserves better.\nCTA: Tap the link to get yours.";

pub const BROLL: &str = r#"["Steam rising from the mug in slow motion", "Hands wrapping around the mug by a window", "Coffee poured into the mug, top-down shot"]"#;

pub const VIDEO_URI: &str = "https://generativelanguage.googleapis.com/v1beta/files/video-1:download";

/// A 1x1 PNG.
pub const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn product_image() -> ImageData {
    ImageData::from_raw("image/png", PNG_1X1)
}

pub fn rendered_image() -> ImageData {
    ImageData::new("image/png", "cmVuZGVyZWQ=")
}

// ---------------------------------------------------------------------------
// Response builders
// ---------------------------------------------------------------------------

pub fn text_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".into()),
                parts: vec![Part::text(text)],
            }),
            finish_reason: Some("STOP".into()),
        }],
    }
}

pub fn image_response(image: &ImageData) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".into()),
                parts: vec![
                    Part::text("Here is your image."),
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        }),
                    },
                ],
            }),
            finish_reason: Some("STOP".into()),
        }],
    }
}

pub fn pending_operation(name: &str) -> Operation {
    Operation {
        name: name.to_string(),
        done: false,
        response: None,
        error: None,
    }
}

pub fn finished_operation(name: &str, uri: Option<&str>) -> Operation {
    Operation {
        name: name.to_string(),
        done: true,
        response: Some(OperationResponse {
            generate_video_response: Some(GenerateVideoResponse {
                generated_samples: vec![GeneratedSample {
                    video: Some(VideoRef {
                        uri: uri.map(str::to_string),
                    }),
                }],
            }),
        }),
        error: None,
    }
}

pub fn failed_operation(name: &str, code: i64, message: &str) -> Operation {
    Operation {
        name: name.to_string(),
        done: true,
        response: None,
        error: Some(ApiErrorBody {
            code: Some(code),
            message: message.to_string(),
            status: None,
        }),
    }
}

// ---------------------------------------------------------------------------
// Gate: blocks a fake call until the test releases it
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct Gate {
    state: Mutex<(bool, bool)>, // (entered, released)
    cv: Condvar,
}

impl Gate {
    fn pass(&self) {
        let mut state = self.state.lock().unwrap();
        state.0 = true;
        self.cv.notify_all();
        while !state.1 {
            state = self.cv.wait(state).unwrap();
        }
    }

    /// Block until a call has reached the gate.
    pub fn wait_entered(&self) {
        let mut state = self.state.lock().unwrap();
        while !state.0 {
            let (s, timeout) = self
                .cv
                .wait_timeout(state, Duration::from_secs(5))
                .unwrap();
            state = s;
            assert!(!timeout.timed_out() || state.0, "call never reached the gate");
        }
    }

    pub fn release(&self) {
        let mut state = self.state.lock().unwrap();
        state.1 = true;
        self.cv.notify_all();
    }
}

// ---------------------------------------------------------------------------
// FakeProvider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Analysis,
    Image,
    Script,
    BRoll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Generate(RequestKind),
    SubmitVideo,
    GetOperation(String),
    DownloadMedia(String),
    Fetch(String),
}

/// Scripted outcome of a `generateContent` call.
#[derive(Clone)]
pub enum Reply {
    Respond(GenerateContentResponse),
    Fail(u16, String),
}

struct Script {
    analysis: Reply,
    image: Reply,
    script: Reply,
    broll: Reply,
    submit: std::result::Result<Operation, (u16, String)>,
    polls: VecDeque<Operation>,
    media: Download,
    fetch: Download,
}

#[derive(Default)]
struct Inner {
    script: Mutex<Option<Script>>,
    calls: Mutex<Vec<Call>>,
    last_video_request: Mutex<Option<PredictVideoRequest>>,
    script_gate: Mutex<Option<Arc<Gate>>>,
}

#[derive(Clone)]
pub struct FakeProvider {
    inner: Arc<Inner>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProvider {
    /// A provider where every call succeeds on the first try and the video
    /// job finishes after two pending polls.
    pub fn new() -> Self {
        let script = Script {
            analysis: Reply::Respond(text_response(MUG_ANALYSIS)),
            image: Reply::Respond(image_response(&rendered_image())),
            script: Reply::Respond(text_response(SCRIPT)),
            broll: Reply::Respond(text_response(BROLL)),
            submit: Ok(pending_operation("models/veo/operations/op-1")),
            polls: VecDeque::from([
                pending_operation("models/veo/operations/op-1"),
                pending_operation("models/veo/operations/op-1"),
                finished_operation("models/veo/operations/op-1", Some(VIDEO_URI)),
            ]),
            media: Download {
                bytes: b"fake-mp4-bytes".to_vec(),
                content_type: Some("video/mp4".into()),
            },
            fetch: Download {
                bytes: PNG_1X1.to_vec(),
                content_type: Some("image/png".into()),
            },
        };
        let inner = Inner::default();
        *inner.script.lock().unwrap() = Some(script);
        Self {
            inner: Arc::new(inner),
        }
    }

    fn edit(self, f: impl FnOnce(&mut Script)) -> Self {
        if let Some(script) = self.inner.script.lock().unwrap().as_mut() {
            f(script);
        }
        self
    }

    pub fn with_analysis(self, reply: Reply) -> Self {
        self.edit(|s| s.analysis = reply)
    }

    pub fn with_image(self, reply: Reply) -> Self {
        self.edit(|s| s.image = reply)
    }

    pub fn with_script(self, reply: Reply) -> Self {
        self.edit(|s| s.script = reply)
    }

    pub fn with_broll(self, reply: Reply) -> Self {
        self.edit(|s| s.broll = reply)
    }

    pub fn with_submit_error(self, status: u16, message: &str) -> Self {
        let message = message.to_string();
        self.edit(|s| s.submit = Err((status, message)))
    }

    pub fn with_polls(self, polls: Vec<Operation>) -> Self {
        self.edit(|s| s.polls = polls.into())
    }

    pub fn with_media(self, download: Download) -> Self {
        self.edit(|s| s.media = download)
    }

    pub fn with_fetch(self, download: Download) -> Self {
        self.edit(|s| s.fetch = download)
    }

    /// Make the next script request block on `gate`.
    pub fn gate_script(&self, gate: Arc<Gate>) {
        *self.inner.script_gate.lock().unwrap() = Some(gate);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn last_video_request(&self) -> Option<PredictVideoRequest> {
        self.inner.last_video_request.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.inner.calls.lock().unwrap().push(call);
    }

    fn with_script_state<T>(&self, f: impl FnOnce(&mut Script) -> T) -> T {
        let mut guard = self.inner.script.lock().unwrap();
        f(guard.as_mut().expect("fake provider script"))
    }
}

/// Classify a request the way the studio builds them.
pub fn classify(request: &GenerateContentRequest) -> RequestKind {
    let config = request.generation_config.as_ref();
    if config.and_then(|c| c.response_modalities.as_ref()).is_some() {
        return RequestKind::Image;
    }
    match config
        .and_then(|c| c.response_schema.as_ref())
        .and_then(|s| s.get("type"))
        .and_then(|t| t.as_str())
    {
        Some("OBJECT") => RequestKind::Analysis,
        Some("ARRAY") => RequestKind::BRoll,
        _ => RequestKind::Script,
    }
}

fn api_error(status: u16, message: &str) -> StudioError {
    StudioError::Api {
        status,
        message: message.to_string(),
    }
}

impl Provider for FakeProvider {
    fn generate_content(
        &self,
        _model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let kind = classify(request);
        self.record(Call::Generate(kind));
        if kind == RequestKind::Script {
            let gate = self.inner.script_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                gate.pass();
            }
        }
        let reply = self.with_script_state(|s| match kind {
            RequestKind::Analysis => s.analysis.clone(),
            RequestKind::Image => s.image.clone(),
            RequestKind::Script => s.script.clone(),
            RequestKind::BRoll => s.broll.clone(),
        });
        match reply {
            Reply::Respond(resp) => Ok(resp),
            Reply::Fail(status, message) => Err(api_error(status, &message)),
        }
    }

    fn submit_video(&self, _model: &str, request: &PredictVideoRequest) -> Result<Operation> {
        self.record(Call::SubmitVideo);
        *self.inner.last_video_request.lock().unwrap() = Some(request.clone());
        self.with_script_state(|s| s.submit.clone())
            .map_err(|(status, message)| api_error(status, &message))
    }

    fn get_operation(&self, name: &str) -> Result<Operation> {
        self.record(Call::GetOperation(name.to_string()));
        self.with_script_state(|s| s.polls.pop_front())
            .ok_or_else(|| api_error(500, "no scripted poll left"))
    }

    fn download_media(&self, uri: &str) -> Result<Download> {
        self.record(Call::DownloadMedia(uri.to_string()));
        Ok(self.with_script_state(|s| s.media.clone()))
    }

    fn fetch(&self, url: &str) -> Result<Download> {
        self.record(Call::Fetch(url.to_string()));
        Ok(self.with_script_state(|s| s.fetch.clone()))
    }
}

// ---------------------------------------------------------------------------
// Studio setup
// ---------------------------------------------------------------------------

pub fn builder(provider: &FakeProvider) -> CampaignStudioBuilder {
    init_tracing();
    CampaignStudio::builder()
        .provider(provider.clone())
        .poll_interval(Duration::ZERO)
}

/// A studio backed by `provider` with the product image already uploaded.
pub fn studio_with_image(provider: &FakeProvider) -> CampaignStudio {
    let studio = builder(provider).build().unwrap();
    studio.upload_image(product_image());
    studio
}

/// A studio with the product image uploaded and analyzed.
pub fn analyzed_studio(provider: &FakeProvider) -> CampaignStudio {
    let studio = studio_with_image(provider);
    studio.analyze().unwrap();
    studio
}
