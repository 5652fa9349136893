//! Stub sensor and actuator for running the relay without a simulation.
//!
//! The stub sensor emits an SVG scene whose fill color changes every
//! cycle, which makes the end-to-end path (sensor -> channel -> browser)
//! visible at a glance. The logging actuator prints every relayed browser
//! event so input capture can be verified from the server logs.

use rand::Rng;
use tracing::info;
use vitrine_types::InputEvent;

use crate::avatar::{Actuator, Sensor};

/// Sensor producing an SVG circle with a random fill color each cycle.
#[derive(Debug, Default)]
pub struct StubSvgSensor;

impl Sensor for StubSvgSensor {
    fn sense(&mut self) -> Option<String> {
        Some(format!(
            r#"<svg id="root" xmlns="http://www.w3.org/2000/svg"><circle id="stub-circle" cx="100" cy="100" r="50" fill="{}" /></svg>"#,
            random_color()
        ))
    }
}

/// A random `#RRGGBB` color string.
fn random_color() -> String {
    let mut rng = rand::rng();
    format!(
        "#{:02X}{:02X}{:02X}",
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random::<u8>()
    )
}

/// Actuator logging every relayed browser event.
#[derive(Debug, Default)]
pub struct LoggingActuator;

impl Actuator for LoggingActuator {
    fn attempt(&mut self, event: &InputEvent) {
        info!(
            kind = event.kind.name(),
            target = ?event.target,
            "browser event"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn stub_sensor_emits_svg_with_hex_fill() {
        let mut sensor = StubSvgSensor;
        let scene = sensor.sense().unwrap();
        assert!(scene.starts_with("<svg"));
        assert!(scene.contains(r##"fill="#"##));
    }

    #[test]
    fn random_color_is_seven_chars() {
        let color = random_color();
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
    }
}
