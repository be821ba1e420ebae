//! Dashboard settings: the values the page needs to reach the MQTT broker.
//!
//! The page's client-side script reads this mapping verbatim, so it
//! serializes with the upper-case keys the script expects
//! (`WEBSOCK_BROKER_ADDRESS`, `PINS`, …). Deserialization uses the
//! lower-case field names, which is what the configuration file uses.

use serde::{Deserialize, Serialize};

/// Broker connection values and switch layout handed to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "SCREAMING_SNAKE_CASE"))]
pub struct DashboardSettings {
    /// Hostname of the MQTT-over-WebSocket broker.
    pub websock_broker_address: String,
    /// Path component of the broker WebSocket URL.
    pub websocket_basepath: String,
    /// Broker WebSocket port.
    pub websock_port: u16,
    /// Use `wss://` instead of `ws://`.
    pub websock_use_ssl: bool,
    pub use_wss: bool,
    /// Quality-of-service level for published switch messages (0, 1 or 2).
    pub qos: u8,
    /// Delay before the page retries a lost broker connection, in milliseconds.
    pub websocket_reconnect_timeout: u64,
    /// Send `mqtt_user` / `mqtt_pass` when connecting.
    pub use_creds: bool,
    pub clean_session: bool,
    /// Publish switch messages with the retained flag.
    pub retained: bool,
    pub mqtt_user: String,
    pub mqtt_pass: String,
    /// Shared token; also used by the page as the MQTT topic prefix.
    pub token: String,
    /// Display name shown next to the connection status.
    pub user_name: String,
    /// Board pins, one per switch, in display order.
    pub pins: Vec<String>,
    /// Human labels for [`pins`](Self::pins), by position.
    pub switch_name: Vec<String>,
    /// Background image URL; empty for none.
    pub wall_url: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            websock_broker_address: "test.mosquitto.org".to_string(),
            websocket_basepath: String::new(),
            websock_port: 8081,
            websock_use_ssl: false,
            use_wss: true,
            qos: 0,
            websocket_reconnect_timeout: 5000,
            use_creds: false,
            clean_session: true,
            retained: true,
            mqtt_user: "default_user".to_string(),
            mqtt_pass: "default_password".to_string(),
            token: "default_token".to_string(),
            user_name: "user".to_string(),
            pins: default_pins(),
            switch_name: default_pins(),
            wall_url: String::new(),
        }
    }
}

fn default_pins() -> Vec<String> {
    ["D1", "D2", "D3", "D4"].map(String::from).to_vec()
}

/// One switch control on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Switch {
    /// Zero-based position, stable for element ids.
    pub index: usize,
    /// Board pin the switch drives (e.g. `D1`).
    pub pin: String,
    /// Label displayed next to the control.
    pub label: String,
}

impl DashboardSettings {
    /// Pair every pin with its label.
    ///
    /// Pins without a matching entry in `switch_name` (or with a blank one)
    /// are labeled with the pin itself; extra labels are ignored.
    #[must_use]
    pub fn switches(&self) -> Vec<Switch> {
        self.pins
            .iter()
            .enumerate()
            .map(|(index, pin)| {
                let label = self
                    .switch_name
                    .get(index)
                    .map(|name| name.trim())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(pin.as_str());
                Switch {
                    index,
                    pin: pin.clone(),
                    label: label.to_string(),
                }
            })
            .collect()
    }

    /// Whether a wallpaper is configured.
    #[must_use]
    pub fn has_wallpaper(&self) -> bool {
        !self.wall_url.trim().is_empty()
    }
}
