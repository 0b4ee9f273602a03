//! MQTT client for remote control
//!
//! Connects to an MQTT broker and subscribes to a topic. Each message is
//! parsed into a [`Command`] and forwarded to the main loop, which applies
//! it exactly like a key press.

use crate::control::Command;
use crate::error::{FireError, Result};
use rumqttc::{Client, Event, MqttOptions, Packet, QoS};
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const DEFAULT_PORT: u16 = 1883;

/// JSON format for incoming messages (optional)
#[derive(Deserialize)]
struct JsonMessage {
    command: String,
}

/// Parse a payload: either a bare command word or `{"command": "<word>"}`
pub fn parse_payload(payload: &[u8]) -> Option<Command> {
    let text = std::str::from_utf8(payload).ok()?.trim();
    if text.is_empty() {
        return None;
    }
    match serde_json::from_str::<JsonMessage>(text) {
        Ok(json) => Command::parse(&json.command),
        Err(_) => Command::parse(text),
    }
}

/// MQTT client that receives commands in a background thread
pub struct MqttClient {
    receiver: Receiver<Command>,
    _thread: thread::JoinHandle<()>,
}

impl MqttClient {
    /// Create a new MQTT client and connect to the broker.
    /// Fails immediately if connection cannot be established.
    pub fn new(host: &str, topic: &str) -> Result<Self> {
        let mut options = MqttOptions::new("doomfire", host, DEFAULT_PORT);
        options.set_keep_alive(Duration::from_secs(30));

        let (client, mut connection) = Client::new(options, 10);

        client
            .subscribe(topic, QoS::AtMostOnce)
            .map_err(|e| FireError::Mqtt(format!("failed to subscribe to '{}': {}", topic, e)))?;

        // Poll once so an unreachable broker fails fast
        match connection.iter().next() {
            Some(Ok(_)) => {},
            Some(Err(e)) => {
                return Err(FireError::Mqtt(format!(
                    "failed to connect to {}:{} - {}",
                    host, DEFAULT_PORT, e
                )));
            },
            None => {
                return Err(FireError::Mqtt(format!(
                    "failed to connect to {}:{} - connection closed",
                    host, DEFAULT_PORT
                )));
            },
        }

        let (sender, receiver) = mpsc::channel();
        let topic_owned = topic.to_string();

        let handle = thread::spawn(move || {
            Self::message_loop(connection, sender, &topic_owned);
        });

        log::info!("mqtt: connected to {}:{}, subscribed to '{}'", host, DEFAULT_PORT, topic);

        Ok(Self {
            receiver,
            _thread: handle,
        })
    }

    fn message_loop(mut connection: rumqttc::Connection, sender: Sender<Command>, topic: &str) {
        for event in connection.iter() {
            match event {
                Ok(Event::Incoming(Packet::Publish(publish))) if publish.topic == topic => {
                    match parse_payload(&publish.payload) {
                        Some(command) => {
                            if sender.send(command).is_err() {
                                // Main thread gone
                                break;
                            }
                        },
                        None => log::warn!(
                            "mqtt: ignoring unknown command {:?}",
                            String::from_utf8_lossy(&publish.payload)
                        ),
                    }
                },
                Ok(_) => {},
                Err(e) => {
                    // rumqttc reconnects on the next poll
                    log::warn!("mqtt error: {}", e);
                    thread::sleep(Duration::from_secs(1));
                },
            }
        }
    }

    /// Drain every command received since the last poll (non-blocking)
    pub fn poll(&self) -> Vec<Command> {
        self.receiver.try_iter().collect()
    }
}
