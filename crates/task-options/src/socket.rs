use crate::mapper::{set_value, ApplyConfig};
use rdkafka::config::ClientConfig;
use serde::Deserialize;

/// Socket tuning shared by consumers and producers. Always applied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SocketOptions {
    /// Default timeout for network requests.
    pub socket_timeout_ms: i32,
    /// Maximum time allowed for broker connection setup (TCP and SSL handshake
    /// plus SASL authentication).
    pub socket_connection_setup_timeout_ms: i32,
    /// Enable TCP keep-alives (SO_KEEPALIVE) on broker sockets.
    pub socket_keepalive_enable: bool,
    /// Disconnect from a broker after this many send failures. 0 disables.
    pub socket_max_fails: i32,
    /// Disable the Nagle algorithm (TCP_NODELAY) on broker sockets.
    pub socket_nagle_disable: bool,
    /// Broker socket receive buffer size. 0 uses the system default.
    pub socket_receive_buffer_bytes: i32,
    /// Broker socket send buffer size. 0 uses the system default.
    pub socket_send_buffer_bytes: i32,
}

impl Default for SocketOptions {
    fn default() -> Self {
        Self {
            socket_timeout_ms: 60000,
            socket_connection_setup_timeout_ms: 30000,
            socket_keepalive_enable: false,
            socket_max_fails: 1,
            socket_nagle_disable: false,
            socket_receive_buffer_bytes: 0,
            socket_send_buffer_bytes: 0,
        }
    }
}

impl ApplyConfig for SocketOptions {
    fn apply(&self, config: &mut ClientConfig) {
        set_value(config, "socket.timeout.ms", self.socket_timeout_ms);
        set_value(
            config,
            "socket.connection.setup.timeout.ms",
            self.socket_connection_setup_timeout_ms,
        );
        set_value(config, "socket.keepalive.enable", self.socket_keepalive_enable);
        set_value(config, "socket.max.fails", self.socket_max_fails);
        set_value(config, "socket.nagle.disable", self.socket_nagle_disable);
        set_value(
            config,
            "socket.receive.buffer.bytes",
            self.socket_receive_buffer_bytes,
        );
        set_value(config, "socket.send.buffer.bytes", self.socket_send_buffer_bytes);
    }
}
