//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements                  | Connects to               |
//! |--------------|-----------------------------|---------------------------|
//! | `json_store` | DocumentStore, ConfigPort   | `~/.desktop_pet/*.json`   |
//! | `memory`     | DocumentStore, ConfigPort   | in-process cells          |
//! | `log_sink`   | EventSink                   | `log` output              |
//! | `notifier`   | Notifier                    | `log` output              |
//! | `pointer`    | PointerSource               | scripted waypoints        |
//! | `time`       | Clock                       | system clock              |

pub mod json_store;
pub mod log_sink;
pub mod memory;
pub mod notifier;
pub mod pointer;
pub mod time;
