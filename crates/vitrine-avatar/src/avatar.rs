//! The avatar cycle driver.
//!
//! The avatar is the collaborator that connects the relay to a
//! simulation: each cycle it pulls sensed scene state, pushes it onto the
//! scene channel, drains the relay's buffered browser events, and
//! dispatches them to its actuators. The relay is shared by handle; the
//! avatar owns no transport state.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use vitrine_core::{RelayError, RelayService};
use vitrine_types::InputEvent;

/// Produces the latest scene markup each cycle.
pub trait Sensor: Send {
    /// Sense the current scene, or `None` when nothing changed since the
    /// previous cycle.
    fn sense(&mut self) -> Option<String>;
}

/// Receives browser events relayed from the transport.
pub trait Actuator: Send {
    /// Act on one relayed event.
    fn attempt(&mut self, event: &InputEvent);
}

/// Drives sensors and actuators against a shared relay handle.
pub struct Avatar {
    sensors: Vec<Box<dyn Sensor>>,
    actuators: Vec<Box<dyn Actuator>>,
    relay: Arc<RelayService>,
    scene_route: String,
}

impl Avatar {
    /// Create an avatar pushing scenes onto `scene_route`.
    ///
    /// The route must have been opened on the relay before the first
    /// cycle runs.
    pub fn new(
        relay: Arc<RelayService>,
        scene_route: impl Into<String>,
        sensors: Vec<Box<dyn Sensor>>,
        actuators: Vec<Box<dyn Actuator>>,
    ) -> Self {
        Self {
            sensors,
            actuators,
            relay,
            scene_route: scene_route.into(),
        }
    }

    /// Run one cycle: sense, push, drain, dispatch.
    ///
    /// Returns the number of browser events dispatched to actuators.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownRoute`] if the scene route was never
    /// opened on the relay.
    pub fn cycle(&mut self) -> Result<usize, RelayError> {
        for sensor in &mut self.sensors {
            if let Some(scene) = sensor.sense() {
                self.relay.push(&self.scene_route, scene)?;
            }
        }

        let events = self.relay.pull_events();
        for event in &events {
            for actuator in &mut self.actuators {
                actuator.attempt(event);
            }
        }
        Ok(events.len())
    }

    /// Drive cycles on a fixed interval until an error occurs.
    ///
    /// Missed ticks are skipped rather than bursted, so a slow cycle
    /// never causes a backlog of catch-up cycles.
    ///
    /// # Errors
    ///
    /// Returns the first [`RelayError`] a cycle produces.
    pub async fn run(&mut self, interval: Duration) -> Result<(), RelayError> {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(route = %self.scene_route, "avatar loop starting");
        loop {
            ticker.tick().await;
            let dispatched = self.cycle()?;
            if dispatched > 0 {
                debug!(dispatched, "browser events dispatched");
            }
        }
    }
}
