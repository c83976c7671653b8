use crate::common::{SignalError, SignalResult};
use crate::config::{ChannelConfig, SimulatorConfig};
use crate::domains::signal::{SignalChannel, WIRE_VERSION};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Largest payload accepted in a single frame (1 MiB).
pub const MAX_FRAME_PAYLOAD: usize = 1024 * 1024;

const READ_CHUNK: usize = 4096;

/// One named-stream frame on the simulator socket.
///
/// Wire format: `[u8 name_len][name][u32 LE payload_len][payload]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFrame {
    pub stream: String,
    pub payload: Vec<u8>,
}

impl StreamFrame {
    pub fn new(stream: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            stream: stream.into(),
            payload: payload.into(),
        }
    }

    pub fn encode(&self) -> SignalResult<Vec<u8>> {
        let name = self.stream.as_bytes();
        let name_len = u8::try_from(name.len())
            .map_err(|_| SignalError::invalid(format!("stream name '{}' is too long", self.stream)))?;
        if self.payload.len() > MAX_FRAME_PAYLOAD {
            return Err(SignalError::invalid(format!(
                "payload of {} bytes exceeds {}",
                self.payload.len(),
                MAX_FRAME_PAYLOAD
            )));
        }

        let mut buf = Vec::with_capacity(1 + name.len() + 4 + self.payload.len());
        buf.push(name_len);
        buf.extend_from_slice(name);
        buf.extend_from_slice(&(self.payload.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.payload);
        Ok(buf)
    }

    /// Parses the first frame in `buf`. Returns the frame and the bytes it
    /// used, or `None` while the frame is still incomplete.
    pub fn decode(buf: &[u8]) -> SignalResult<Option<(Self, usize)>> {
        let Some(&name_len) = buf.first() else {
            return Ok(None);
        };
        let name_end = 1 + name_len as usize;
        let header_end = name_end + 4;
        if buf.len() < header_end {
            return Ok(None);
        }

        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&buf[name_end..header_end]);
        let payload_len = u32::from_le_bytes(len_bytes) as usize;
        if payload_len > MAX_FRAME_PAYLOAD {
            return Err(SignalError::malformed(format!(
                "frame payload of {} bytes exceeds {}",
                payload_len, MAX_FRAME_PAYLOAD
            )));
        }
        let frame_end = header_end + payload_len;
        if buf.len() < frame_end {
            return Ok(None);
        }

        let stream = std::str::from_utf8(&buf[1..name_end])
            .map_err(|e| SignalError::malformed(format!("stream name is not UTF-8: {}", e)))?
            .to_string();
        let payload = buf[header_end..frame_end].to_vec();
        Ok(Some((Self { stream, payload }, frame_end)))
    }
}

/// Signal channel over a TCP connection to the simulator.
pub struct TcpSignalChannel {
    stream: TcpStream,
    outbound: String,
    inbound: String,
    buffer: Vec<u8>,
    ready: VecDeque<Vec<u8>>,
    peer_closed: bool,
}

impl TcpSignalChannel {
    /// Connects once; a failure is not retried.
    pub async fn connect(simulator: &SimulatorConfig, channel: &ChannelConfig) -> SignalResult<Self> {
        let endpoint = simulator.endpoint();
        tracing::info!("Connecting to simulator at {}", endpoint);

        let connect = TcpStream::connect(endpoint.as_str());
        let stream = match tokio::time::timeout(simulator.connect_timeout(), connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(SignalError::ConnectionFailure {
                    endpoint,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(SignalError::ConnectionFailure {
                    endpoint,
                    reason: format!("no connection within {:?}", simulator.connect_timeout()),
                })
            }
        };
        stream.set_nodelay(true)?;

        tracing::info!("Connected to simulator at {} (wire layout v{})", endpoint, WIRE_VERSION);
        Ok(Self::from_stream(
            stream,
            channel.outbound_stream.clone(),
            channel.inbound_stream.clone(),
        ))
    }

    pub fn from_stream(stream: TcpStream, outbound: String, inbound: String) -> Self {
        Self {
            stream,
            outbound,
            inbound,
            buffer: Vec::new(),
            ready: VecDeque::new(),
            peer_closed: false,
        }
    }

    pub async fn close(mut self) -> SignalResult<()> {
        self.stream.shutdown().await?;
        tracing::info!("Signal channel closed");
        Ok(())
    }

    /// Moves whatever the socket has buffered into `self.buffer` without waiting.
    fn read_available(&mut self) -> SignalResult<()> {
        let mut chunk = [0u8; READ_CHUNK];
        while !self.peer_closed {
            match self.stream.try_read(&mut chunk) {
                Ok(0) => self.peer_closed = true,
                Ok(n) => self.buffer.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn collect_frames(&mut self) -> SignalResult<()> {
        while let Some((frame, used)) = StreamFrame::decode(&self.buffer)? {
            self.buffer.drain(..used);
            if frame.stream == self.inbound {
                self.ready.push_back(frame.payload);
            } else {
                tracing::warn!(
                    "Dropping {} byte frame for unexpected stream '{}'",
                    frame.payload.len(),
                    frame.stream
                );
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SignalChannel for TcpSignalChannel {
    async fn send(&mut self, payload: &[u8]) -> SignalResult<()> {
        let frame = StreamFrame::new(self.outbound.as_str(), payload).encode()?;
        self.stream.write_all(&frame).await?;
        Ok(())
    }

    async fn try_recv(&mut self) -> SignalResult<Option<Vec<u8>>> {
        self.read_available()?;
        self.collect_frames()?;
        if let Some(payload) = self.ready.pop_front() {
            return Ok(Some(payload));
        }
        if self.peer_closed {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "simulator closed the signal channel",
            )
            .into());
        }
        Ok(None)
    }
}
