//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                       | Connects to              |
//! |------------|----------------------------------|--------------------------|
//! | `hardware` | MotionInputPort, AlarmOutputPort | PIR input, relay GPIO    |
//! | `log_sink` | EventSink                        | Serial log output        |
//! | `mqtt`     | SessionPort                      | ESP-IDF MQTT client      |
//! | `sntp`     | -                                | ESP-IDF SNTP service     |
//! | `time`     | ClockPort                        | ESP32 timer, system time |
//! | `wifi`     | LinkPort                         | ESP-IDF WiFi STA         |

pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod sntp;
pub mod time;
pub mod wifi;
