//! Byte extraction from opaque file inputs.
//!
//! Each [`FileInput`] carries exactly one [`ByteSource`] adapter, chosen when
//! the input is constructed. Priority among capabilities is whole buffer,
//! then chunked stream, then raw coercion.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, StreamExt};
use std::fmt;
use std::io;

use super::error::ExtractionError;

/// Which extraction strategy an adapter implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    WholeBuffer,
    ChunkedStream,
    RawCoercion,
    Unavailable,
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ExtractionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WholeBuffer => "whole_buffer",
            Self::ChunkedStream => "chunked_stream",
            Self::RawCoercion => "raw_coercion",
            Self::Unavailable => "unavailable",
        }
    }
}

/// A one-shot source of the full content of an input.
#[async_trait]
pub trait ByteSource: Send {
    /// The strategy this source implements.
    fn strategy(&self) -> ExtractionStrategy;

    /// Materializes the whole content. May return an empty buffer; emptiness
    /// is judged by [`extract`].
    async fn read_all(self: Box<Self>) -> Result<Bytes, ExtractionError>;
}

/// Content already held as one contiguous buffer.
pub struct BufferSource(Bytes);

#[async_trait]
impl ByteSource for BufferSource {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::WholeBuffer
    }

    async fn read_all(self: Box<Self>) -> Result<Bytes, ExtractionError> {
        Ok(self.0)
    }
}

/// Content pulled chunk by chunk until the stream is exhausted.
pub struct StreamSource(BoxStream<'static, io::Result<Bytes>>);

#[async_trait]
impl ByteSource for StreamSource {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::ChunkedStream
    }

    async fn read_all(self: Box<Self>) -> Result<Bytes, ExtractionError> {
        let mut stream = self.0;
        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

/// A plain value reinterpreted as bytes.
///
/// UTF-8 `data:<mime>;base64,<payload>` values are decoded; anything else is
/// passed through unchanged.
pub struct RawSource(Bytes);

#[async_trait]
impl ByteSource for RawSource {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::RawCoercion
    }

    async fn read_all(self: Box<Self>) -> Result<Bytes, ExtractionError> {
        coerce_raw(self.0)
    }
}

/// Placeholder for inputs with no readable capability.
pub struct NoSource;

#[async_trait]
impl ByteSource for NoSource {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::Unavailable
    }

    async fn read_all(self: Box<Self>) -> Result<Bytes, ExtractionError> {
        Err(ExtractionError::NoStrategy)
    }
}

fn coerce_raw(value: Bytes) -> Result<Bytes, ExtractionError> {
    let is_data_url = value.starts_with(b"data:") && std::str::from_utf8(&value).is_ok();
    if !is_data_url {
        return Ok(value);
    }
    let text =
        std::str::from_utf8(&value).map_err(|e| ExtractionError::coercion(e.to_string()))?;
    let (_, payload) = text["data:".len()..]
        .split_once(";base64,")
        .ok_or_else(|| ExtractionError::coercion("data URL is not base64 encoded"))?;
    STANDARD
        .decode(payload.trim())
        .map(Bytes::from)
        .map_err(|e| ExtractionError::coercion(e.to_string()))
}

/// Every byte-access capability an incoming value might expose.
#[derive(Default)]
pub struct Capabilities {
    pub buffer: Option<Bytes>,
    pub stream: Option<BoxStream<'static, io::Result<Bytes>>>,
    pub raw: Option<Bytes>,
}

/// One item of a batch: an optional display name and its byte source.
pub struct FileInput {
    name: Option<String>,
    source: Box<dyn ByteSource>,
}

impl FileInput {
    /// Wraps an explicit source. Empty names count as absent.
    pub fn new(name: Option<String>, source: Box<dyn ByteSource>) -> Self {
        Self {
            name: name.filter(|n| !n.trim().is_empty()),
            source,
        }
    }

    /// Picks the highest-priority capability present.
    pub fn from_capabilities(name: Option<String>, capabilities: Capabilities) -> Self {
        let source: Box<dyn ByteSource> = match capabilities {
            Capabilities {
                buffer: Some(bytes),
                ..
            } => Box::new(BufferSource(bytes)),
            Capabilities {
                stream: Some(stream),
                ..
            } => Box::new(StreamSource(stream)),
            Capabilities { raw: Some(raw), .. } => Box::new(RawSource(raw)),
            _ => Box::new(NoSource),
        };
        Self::new(name, source)
    }

    pub fn from_bytes(name: Option<String>, bytes: impl Into<Bytes>) -> Self {
        Self::new(name, Box::new(BufferSource(bytes.into())))
    }

    pub fn from_stream<S>(name: Option<String>, stream: S) -> Self
    where
        S: futures::Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self::new(name, Box::new(StreamSource(stream.boxed())))
    }

    pub fn from_raw(name: Option<String>, value: impl Into<Bytes>) -> Self {
        Self::new(name, Box::new(RawSource(value.into())))
    }

    /// Builds an input from chunks received off the wire. A single chunk is
    /// already contiguous; several are replayed through the stream adapter.
    pub fn from_chunks(name: Option<String>, mut chunks: Vec<Bytes>) -> Self {
        match chunks.len() {
            0 => Self::from_bytes(name, Bytes::new()),
            1 => Self::from_bytes(name, chunks.remove(0)),
            _ => Self::from_stream(name, stream::iter(chunks.into_iter().map(Ok))),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn strategy(&self) -> ExtractionStrategy {
        self.source.strategy()
    }

    pub fn into_parts(self) -> (Option<String>, Box<dyn ByteSource>) {
        (self.name, self.source)
    }
}

impl fmt::Debug for FileInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileInput")
            .field("name", &self.name)
            .field("strategy", &self.strategy())
            .finish()
    }
}

/// Reads the full content of a source. Zero bytes is a failure.
pub async fn extract(source: Box<dyn ByteSource>) -> Result<Bytes, ExtractionError> {
    let bytes = source.read_all().await?;
    if bytes.is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(bytes)
}

/// Derives the artifact base name: the declared name minus its last
/// extension, or `image-<n>` (1-based position) when no usable name was
/// declared.
pub fn base_name(declared: Option<&str>, index: usize) -> String {
    let Some(name) = declared.map(str::trim).filter(|n| !n.is_empty()) else {
        return format!("image-{}", index + 1);
    };
    // Browsers may send a full client path.
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    if file.is_empty() {
        return format!("image-{}", index + 1);
    }
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file.to_string(),
    }
}
