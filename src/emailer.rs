//! Outbound opt-in confirmation requests handed to the emailer service.

use std::sync::Mutex;

use thiserror::Error;

use crate::models::zmq::ZmqOptInConfirmationMessage;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("zmq error: {0}")]
    Zmq(#[from] zmq::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("sender lock poisoned")]
    Poisoned,
}

/// Delivers confirmation requests; rendering is the receiver's concern.
#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
pub trait ConfirmationSender {
    fn send_confirmation(
        &self,
        message: &ZmqOptInConfirmationMessage,
    ) -> Result<(), NotificationError>;
}

/// Socket settings for [`ZmqConfirmationSender::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZmqSenderOptions {
    pub endpoint: String,
    /// Connect to the endpoint instead of binding it.
    pub connect: bool,
    pub linger_ms: i32,
    pub send_timeout_ms: i32,
}

impl ZmqSenderOptions {
    /// PUB socket connecting to the emailer's SUB endpoint.
    pub fn pub_default(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            connect: true,
            linger_ms: 1000,
            send_timeout_ms: 1000,
        }
    }
}

/// Publishes JSON messages on a ZeroMQ PUB socket.
pub struct ZmqConfirmationSender {
    _context: zmq::Context,
    socket: Mutex<zmq::Socket>,
}

impl ZmqConfirmationSender {
    pub fn start(options: ZmqSenderOptions) -> Result<Self, NotificationError> {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::PUB)?;
        socket.set_linger(options.linger_ms)?;
        socket.set_sndtimeo(options.send_timeout_ms)?;
        if options.connect {
            socket.connect(&options.endpoint)?;
        } else {
            socket.bind(&options.endpoint)?;
        }

        Ok(Self {
            _context: context,
            socket: Mutex::new(socket),
        })
    }
}

impl ConfirmationSender for ZmqConfirmationSender {
    fn send_confirmation(
        &self,
        message: &ZmqOptInConfirmationMessage,
    ) -> Result<(), NotificationError> {
        let bytes = serde_json::to_vec(message)?;
        let socket = self.socket.lock().map_err(|_| NotificationError::Poisoned)?;
        socket.send(bytes, 0)?;
        log::info!(
            "Sent opt-in confirmation request for lead capture {}",
            message.lead_capture_id
        );
        Ok(())
    }
}
